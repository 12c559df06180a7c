//! Per-route request deadline.

use std::time::Duration;

use axum::extract::{Request, State};
use axum::middleware::{Next, from_fn_with_state};
use axum::response::{IntoResponse, Response};
use axum::routing::MethodRouter;
use tracing::warn;

use crate::error::AppError;
use crate::storage::Deadline;

/// Attach a deadline to the request and bound the whole handler by it.
///
/// Handlers pick the deadline up through the [`Deadline`] extractor and pass
/// it down to storage. If the handler is still running once the deadline
/// passes, it is dropped and a timeout response is sent instead.
pub async fn enforce_timeout(
    State(limit): State<Duration>,
    mut req: Request,
    next: Next,
) -> Response {
    let deadline = Deadline::after(limit);
    req.extensions_mut().insert(deadline);

    let Some(instant) = deadline.instant() else {
        return next.run(req).await;
    };

    if let Ok(response) = tokio::time::timeout_at(instant, next.run(req)).await {
        response
    } else {
        warn!(limit_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX), "handler exceeded deadline");
        AppError::Timeout { source: None }.into_response()
    }
}

/// Give a route its own deadline of `limit`.
pub fn with_timeout<S>(route: MethodRouter<S>, limit: Duration) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    route.layer(from_fn_with_state(limit, enforce_timeout))
}
