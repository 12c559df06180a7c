//! Panic recovery.

use std::any::Any;
use std::backtrace::Backtrace;

use axum::response::{IntoResponse, Response};

use crate::error::AppError;

/// Turn a caught handler panic into the generic internal error response.
///
/// Used with [`tower_http::catch_panic::CatchPanicLayer::custom`].
#[allow(clippy::needless_pass_by_value)]
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");

    AppError::internal(anyhow::anyhow!("handler panicked: {message}")).into_response()
}

/// Route panic reports through `tracing` with a captured backtrace.
///
/// Replaces the default hook, which would write to stderr outside the
/// structured log.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map_or_else(|| "unknown".to_string(), ToString::to_string);
        let backtrace = Backtrace::force_capture();

        tracing::error!(
            %location,
            panic = %info,
            stacktrace = %backtrace,
            "PANIC"
        );
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_panic_renders_internal_error() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "unhandled internal error" }));
    }

    #[test]
    fn test_formatted_panic_payload() {
        let response = handle_panic(Box::new(format!("index {} out of range", 3)));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
