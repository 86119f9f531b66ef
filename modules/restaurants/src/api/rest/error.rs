use webgis_errors::{Problem, ValidationViolation};

use crate::domain::error::DomainError;

/// Map domain error to RFC 9457 Problem
pub fn domain_error_to_problem(e: &DomainError, instance: &str) -> Problem {
    let problem = match e {
        DomainError::Validation { field, message } => {
            Problem::from_kind(e.kind(), e.to_string())
                .with_errors(vec![ValidationViolation::new(field, message)])
        }
        DomainError::NotFound { .. } | DomainError::NoMatch { .. } => {
            Problem::from_kind(e.kind(), e.to_string())
        }
        DomainError::Database(msg) => {
            tracing::error!(error = %msg, "Database error occurred");
            Problem::from_kind(e.kind(), "An internal database error occurred")
        }
    };
    problem.with_instance(instance)
}

impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        domain_error_to_problem(&e, "/")
    }
}
