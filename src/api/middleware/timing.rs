//! Request duration logging.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tokio::time::Instant;
use tracing::info;

/// Log the outcome and duration of each request once it completes.
pub async fn time_elapsed(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let path = req.uri().path().to_owned();

    let response = next.run(req).await;

    let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    info!(
        elapsed_ms,
        %path,
        status = response.status().as_u16(),
        "request completed"
    );

    response
}
