//! Request logging middleware.

use std::fmt;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

/// Per-request identifier, stored in the request extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// Generate a fresh random id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Tag the request with an id and log its arrival.
///
/// Everything logged further down the chain runs inside a `request` span
/// carrying the id, method and route.
pub async fn log_request(mut req: Request, next: Next) -> Response {
    let id = RequestId::new();
    let span = info_span!(
        "request",
        id = %id,
        method = %req.method(),
        route = %req.uri().path(),
    );

    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());
    req.extensions_mut().insert(id);

    async move {
        match peer {
            Some(ip) => info!(%ip, "new request"),
            None => info!("new request"),
        }
        next.run(req).await
    }
    .instrument(span)
    .await
}
