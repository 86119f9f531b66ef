//! RFC 9457 Problem Details for HTTP APIs.

use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ErrorKind;

/// Content type for Problem Details as per RFC 9457.
pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires &T signature
fn serialize_status_code<S>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u16(status.as_u16())
}

fn deserialize_status_code<'de, D>(deserializer: D) -> Result<StatusCode, D::Error>
where
    D: Deserializer<'de>,
{
    let code = u16::deserialize(deserializer)?;
    StatusCode::from_u16(code).map_err(serde::de::Error::custom)
}

/// Error body returned by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[must_use]
pub struct Problem {
    #[serde(rename = "type")]
    pub type_url: String,
    pub title: String,
    #[serde(
        serialize_with = "serialize_status_code",
        deserialize_with = "deserialize_status_code"
    )]
    pub status: StatusCode,
    pub detail: String,
    /// Request path that produced the problem.
    pub instance: String,
    pub code: String,
    pub trace_id: Option<String>,
    /// Field-level violations, only set for validation problems.
    pub errors: Option<Vec<ValidationViolation>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationViolation {
    pub field: String,
    pub message: String,
}

impl ValidationViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl Problem {
    pub fn new(status: StatusCode, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            type_url: "about:blank".to_owned(),
            title: title.into(),
            status,
            detail: detail.into(),
            instance: String::new(),
            code: String::new(),
            trace_id: None,
            errors: None,
        }
    }

    /// Builds a problem from the shared taxonomy and attaches the current span id.
    pub fn from_kind(kind: ErrorKind, detail: impl Into<String>) -> Self {
        let problem = Self::new(kind.status(), kind.title(), detail)
            .with_type(format!("https://webgis.dev/problems/{}", kind.code().to_lowercase()))
            .with_code(kind.code());
        match current_trace_id() {
            Some(id) => problem.with_trace_id(id),
            None => problem,
        }
    }

    pub fn with_type(mut self, type_url: impl Into<String>) -> Self {
        self.type_url = type_url.into();
        self
    }

    pub fn with_instance(mut self, uri: impl Into<String>) -> Self {
        self.instance = uri.into();
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    pub fn with_errors(mut self, errors: Vec<ValidationViolation>) -> Self {
        self.errors = Some(errors);
        self
    }
}

pub fn bad_request(detail: impl Into<String>) -> Problem {
    Problem::from_kind(ErrorKind::Validation, detail)
}

pub fn not_found(detail: impl Into<String>) -> Problem {
    Problem::from_kind(ErrorKind::NotFound, detail)
}

fn current_trace_id() -> Option<String> {
    tracing::Span::current()
        .id()
        .map(|id| id.into_u64().to_string())
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = self.status;
        let mut resp = axum::Json(self).into_response();
        *resp.status_mut() = status;
        resp.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(APPLICATION_PROBLEM_JSON),
        );
        resp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_kind_fills_title_code_and_status() {
        let p = Problem::from_kind(ErrorKind::Forbidden, "account is not activated")
            .with_instance("/api/login");

        assert_eq!(p.status, StatusCode::FORBIDDEN);
        assert_eq!(p.title, "Forbidden");
        assert_eq!(p.code, "FORBIDDEN");
        assert_eq!(p.type_url, "https://webgis.dev/problems/forbidden");
        assert_eq!(p.instance, "/api/login");
    }

    #[test]
    fn problem_serializes_status_as_u16() {
        let p = not_found("Restaurant 7 not found");
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["status"], 404);
        assert_eq!(json["type"], "https://webgis.dev/problems/not_found");
        assert_eq!(json["detail"], "Restaurant 7 not found");
    }

    #[test]
    fn problem_deserializes_status_from_u16() {
        let json = r#"{"type":"about:blank","title":"Not Found","status":404,"detail":"x","instance":"","code":"","trace_id":null,"errors":null}"#;
        let p: Problem = serde_json::from_str(json).unwrap();
        assert_eq!(p.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn into_response_sets_problem_content_type() {
        let resp = bad_request("name is required")
            .with_errors(vec![ValidationViolation::new("name", "is required")])
            .into_response();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            APPLICATION_PROBLEM_JSON
        );
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["errors"][0]["field"], "name");
    }
}
