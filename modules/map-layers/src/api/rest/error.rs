use webgis_errors::{Problem, ValidationViolation};

use crate::domain::error::DomainError;

/// Map domain error to RFC 9457 Problem
pub fn domain_error_to_problem(e: &DomainError, instance: &str) -> Problem {
    let problem = match e {
        DomainError::Validation { field, message } => {
            Problem::from_kind(e.kind(), e.to_string())
                .with_errors(vec![ValidationViolation::new(field, message)])
        }
        DomainError::LayerNotFound(_)
        | DomainError::FeatureNotFound(_)
        | DomainError::NoMatch(_)
        | DomainError::DuplicateFeature { .. } => Problem::from_kind(e.kind(), e.to_string()),
        DomainError::Upstream(msg) => {
            tracing::warn!(error = %msg, "Feature source failure");
            Problem::from_kind(e.kind(), "The feature source could not be reached")
        }
        DomainError::Database(_) => {
            tracing::error!(error = ?e, "Database error occurred");
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

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn duplicate_feature_is_conflict() {
        let p = domain_error_to_problem(
            &DomainError::DuplicateFeature {
                name: "restaurants.1".to_owned(),
                layer_id: 1,
            },
            "/api/features",
        );
        assert_eq!(p.status, StatusCode::CONFLICT);
        assert_eq!(p.instance, "/api/features");
    }

    #[test]
    fn upstream_and_database_failures_hide_details() {
        let p: Problem = DomainError::Upstream("connection refused 10.0.0.5".to_owned()).into();
        assert_eq!(p.status, StatusCode::BAD_GATEWAY);
        assert!(!p.detail.contains("10.0.0.5"));

        let p: Problem = DomainError::database("relation \"features\" does not exist").into();
        assert_eq!(p.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!p.detail.contains("relation"));
    }
}
