use webgis_errors::{Problem, ValidationViolation};

use crate::domain::error::DomainError;

/// Map domain error to RFC 9457 Problem
pub fn domain_error_to_problem(e: &DomainError, instance: &str) -> Problem {
    let problem = match e {
        DomainError::Validation { field, message } => {
            Problem::from_kind(e.kind(), e.to_string())
                .with_errors(vec![ValidationViolation::new(field, message)])
        }
        DomainError::InvalidCredentials
        | DomainError::Deactivated
        | DomainError::UserNotFound(_)
        | DomainError::ProfileNotFound(_)
        | DomainError::EmailTaken(_) => Problem::from_kind(e.kind(), e.to_string()),
        DomainError::Database(_) => {
            tracing::error!(error = ?e, "Database error occurred");
            Problem::from_kind(e.kind(), "An internal database error occurred")
        }
        DomainError::Internal(msg) => {
            tracing::error!(error = ?e, "Internal error: {msg}");
            Problem::from_kind(e.kind(), "An internal error occurred")
        }
    };
    problem.with_instance(instance)
}

impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        domain_error_to_problem(&e, "/")
    }
}
