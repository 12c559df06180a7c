//! Router setup and configuration.

use axum::{Router, routing::get};

use crate::api::handlers::{answers, health, method_not_allowed, not_found, questions};
use crate::api::middleware::apply_pipeline;
use crate::api::state::AppState;

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    let timeout = state.config.server.request_timeout();

    // Probes carry no deadline
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready));

    let app = Router::new()
        .merge(health_routes)
        .merge(questions::routes(timeout))
        .merge(answers::routes(timeout))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed);

    apply_pipeline(app).with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::config::AppConfig;
    use crate::storage::MemoryStorage;

    fn app() -> Router {
        let state = AppState::new(
            Arc::new(AppConfig::default()),
            Arc::new(MemoryStorage::new()),
        );
        create_router(state)
    }

    async fn send(app: Router, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, body) = send(app(), "GET", "/nope", "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "not found" }));
    }

    #[tokio::test]
    async fn test_create_and_fetch_question() {
        let app = app();

        let (status, created) = send(app.clone(), "POST", "/questions", r#"{"text":"why?"}"#).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["id"], 1);
        assert_eq!(created["text"], "why?");

        let (status, view) = send(app, "GET", "/questions/1", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["question"]["text"], "why?");
        assert_eq!(view["answers"], json!([]));
    }

    #[tokio::test]
    async fn test_wrong_method_renders_json_error() {
        let request = Request::builder()
            .method("PUT")
            .uri("/questions")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "error": "method not allowed" }));
    }

    #[tokio::test]
    async fn test_body_is_validated_before_id() {
        let (status, body) = send(app(), "POST", "/questions/abc/answers", "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "empty request body" }));
    }

    #[tokio::test]
    async fn test_invalid_id() {
        let (status, body) = send(app(), "DELETE", "/answers/abc", "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "invalid id" }));
    }

    #[tokio::test]
    async fn test_ready_reports_backend() {
        let (status, body) = send(app(), "GET", "/ready", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["backend"], "memory");
    }
}
