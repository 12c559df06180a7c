//! Health check handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};
use tracing::warn;

use crate::api::state::AppState;

/// Liveness probe - always returns 200 if the service is running.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness probe - checks if the storage backend can serve requests.
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let storage_ok = match state.storage.health_check().await {
        Ok(()) => true,
        Err(err) => {
            warn!(error = %err, "Storage health check failed");
            false
        }
    };

    let status_code = if storage_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = Json(json!({
        "ready": storage_ok,
        "backend": state.storage.backend_name(),
    }));

    (status_code, response)
}
