//! Integer id path parameter.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use crate::error::AppError;

/// The `{id}` segment of a route, parsed as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathId(pub i64);

impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::InvalidId)?;

        raw.parse().map(Self).map_err(|_| AppError::InvalidId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use tower::ServiceExt;

    async fn echo(PathId(id): PathId) -> String {
        id.to_string()
    }

    async fn call(uri: &str) -> StatusCode {
        Router::new()
            .route("/items/{id}", get(echo))
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_parses_integer_ids() {
        assert_eq!(call("/items/42").await, StatusCode::OK);
        assert_eq!(call("/items/-1").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rejects_non_integer_ids() {
        assert_eq!(call("/items/abc").await, StatusCode::BAD_REQUEST);
        assert_eq!(call("/items/1.5").await, StatusCode::BAD_REQUEST);
    }
}
