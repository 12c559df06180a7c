//! Deadline extractor.

use std::future::Future;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::storage::Deadline;

impl<S> FromRequestParts<S> for Deadline
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        // Set by the timeout middleware; routes without it run unbounded.
        let deadline = parts
            .extensions
            .get::<Self>()
            .copied()
            .unwrap_or_default();
        std::future::ready(Ok(deadline))
    }
}
