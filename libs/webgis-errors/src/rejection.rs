use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::StatusCode;
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::{ErrorKind, Problem};

/// `axum::Json` whose rejections are reported as validation problems.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let path = req.uri().path().to_owned();
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(json_problem(&rejection).with_instance(path)),
        }
    }
}

/// `axum::extract::Path` whose rejections are reported as validation problems.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Path::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Path(value)) => Ok(Self(value)),
            Err(rejection) => Err(path_problem(&rejection).with_instance(parts.uri.path())),
        }
    }
}

/// `axum::extract::Query` whose rejections are reported as validation problems.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Query::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(query_problem(&rejection).with_instance(parts.uri.path())),
        }
    }
}

fn json_problem(rejection: &JsonRejection) -> Problem {
    tracing::debug!(error = %rejection.body_text(), "rejected request body");
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return Problem::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            "Payload Too Large",
            rejection.body_text(),
        )
        .with_code("PAYLOAD_TOO_LARGE");
    }
    Problem::from_kind(ErrorKind::Validation, rejection.body_text())
}

fn path_problem(rejection: &PathRejection) -> Problem {
    // Missing route params mean the handler is mounted on the wrong route.
    if rejection.status().is_server_error() {
        tracing::error!(error = %rejection.body_text(), "path parameters unavailable");
        return Problem::from_kind(ErrorKind::Internal, "Internal server error");
    }
    tracing::debug!(error = %rejection.body_text(), "rejected path parameters");
    Problem::from_kind(ErrorKind::Validation, rejection.body_text())
}

fn query_problem(rejection: &QueryRejection) -> Problem {
    tracing::debug!(error = %rejection.body_text(), "rejected query string");
    Problem::from_kind(ErrorKind::Validation, rejection.body_text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::header;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Login {
        email: String,
    }

    #[tokio::test]
    async fn malformed_body_becomes_bad_request() {
        let req = Request::builder()
            .method("POST")
            .uri("/api/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let err = ValidJson::<Login>::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.instance, "/api/login");
    }

    #[tokio::test]
    async fn well_formed_body_is_extracted() {
        let req = Request::builder()
            .method("POST")
            .uri("/api/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"email":"a@b.c"}"#))
            .unwrap();

        let ValidJson(login) = ValidJson::<Login>::from_request(req, &()).await.unwrap();
        assert_eq!(login.email, "a@b.c");
    }

    #[derive(Debug, Deserialize)]
    struct Page {
        page: Option<u64>,
    }

    #[tokio::test]
    async fn non_numeric_query_becomes_bad_request() {
        let req = Request::builder()
            .uri("/api/restaurants?page=x")
            .body(Body::empty())
            .unwrap();
        let (mut parts, _) = req.into_parts();

        let err = ValidQuery::<Page>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.instance, "/api/restaurants");
        assert!(err.detail.contains("page"), "{}", err.detail);
    }

    #[tokio::test]
    async fn query_without_params_is_extracted() {
        let req = Request::builder()
            .uri("/api/restaurants")
            .body(Body::empty())
            .unwrap();
        let (mut parts, _) = req.into_parts();

        let ValidQuery(page) = ValidQuery::<Page>::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(page.page.is_none());
    }

    #[tokio::test]
    async fn path_outside_a_route_is_internal() {
        let req = Request::builder()
            .uri("/api/restaurants/7")
            .body(Body::empty())
            .unwrap();
        let (mut parts, _) = req.into_parts();

        let err = ValidPath::<i32>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
