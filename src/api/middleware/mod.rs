//! HTTP middleware.
//!
//! The global pipeline wraps every route, outermost first: request logging,
//! completion timing, then panic recovery. Each business route additionally
//! carries its own [`timeout`] layer, and routes taking a body put JSON
//! validation in front of it.

mod recover;
mod request_log;
pub mod timeout;
mod timing;
mod validate;

use axum::Router;
use axum::middleware::from_fn;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;

pub use recover::{handle_panic, install_panic_hook};
pub use request_log::{RequestId, log_request};
pub use timeout::{enforce_timeout, with_timeout};
pub use timing::time_elapsed;
pub use validate::{decode, validate_json, with_validation};

/// Wrap a router in the global middleware chain.
///
/// Recovery sits innermost so a panicking handler still produces a response
/// that the logging and timing layers observe.
pub fn apply_pipeline<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(
        ServiceBuilder::new()
            .layer(from_fn(log_request))
            .layer(from_fn(time_elapsed))
            .layer(CatchPanicLayer::custom(handle_panic)),
    )
}
