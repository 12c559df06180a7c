//! Validated body extractor.

use std::convert::Infallible;
use std::future::Future;

use axum::{extract::FromRequestParts, http::request::Parts};

/// Extension slot filled by the validation layer.
#[derive(Debug, Clone)]
pub struct Validated<T>(pub T);

/// Typed input produced by the validation layer for this request.
///
/// `None` when the route has no validation layer; the service decides what
/// a missing payload means.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub Option<T>);

impl<T, S> FromRequestParts<S> for ValidatedJson<T>
where
    T: Clone + Send + Sync + 'static,
    S: Send + Sync,
{
    type Rejection = Infallible;

    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        let input = parts
            .extensions
            .remove::<Validated<T>>()
            .map(|Validated(input)| input);
        std::future::ready(Ok(Self(input)))
    }
}
