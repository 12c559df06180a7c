//! JSON body validation.
//!
//! Runs ahead of the route deadline: the body is read once, decoded strictly
//! into a [`Dto`], checked against its `validator` rules and converted into
//! the DTO's typed input, which the handler picks up through
//! [`ValidatedJson`](crate::api::extractors::ValidatedJson).

use axum::body::{Body, to_bytes};
use axum::extract::Request;
use axum::middleware::{Next, from_fn};
use axum::response::{IntoResponse, Response};
use axum::routing::MethodRouter;
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::api::extractors::Validated;
use crate::domain::Dto;
use crate::error::{AppError, FieldErrors, Result};

/// Largest body the validation stage will buffer.
const BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Parameters rendered for rules whose code is not itself a parameter name.
const BOUND_PARAMS: [&str; 3] = ["equal", "min", "max"];

/// Decode and validate the body as `T`, then hand its input to the next layer.
pub async fn validate_json<T>(req: Request, next: Next) -> Response
where
    T: DeserializeOwned + Validate + Dto + 'static,
{
    let (mut parts, body) = req.into_parts();

    let bytes = match to_bytes(body, BODY_LIMIT).await {
        Ok(bytes) => bytes,
        Err(err) => return AppError::BodyRead { source: err.into() }.into_response(),
    };

    match decode::<T>(&bytes) {
        Ok(input) => {
            parts.extensions.insert(Validated(input));
            next.run(Request::from_parts(parts, Body::empty())).await
        }
        Err(err) => err.into_response(),
    }
}

/// Validate the body of every request to `route` as `T`.
pub fn with_validation<T, S>(route: MethodRouter<S>) -> MethodRouter<S>
where
    T: DeserializeOwned + Validate + Dto + 'static,
    S: Clone + Send + Sync + 'static,
{
    route.layer(from_fn(validate_json::<T>))
}

/// Decode, validate and convert a raw body.
///
/// # Errors
///
/// `EmptyBody` for a blank body, `Validation` for unknown keys or rule
/// violations, `BodyRead` for anything that is not a matching JSON object.
pub fn decode<T>(body: &[u8]) -> Result<T::Input>
where
    T: DeserializeOwned + Validate + Dto,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::EmptyBody);
    }

    let value: Value = serde_json::from_slice(body).map_err(body_read)?;

    if let Some(object) = value.as_object() {
        let mut unknown = FieldErrors::default();
        for key in object.keys().filter(|key| !T::accepts(key)) {
            unknown.insert(key, "unknown");
        }
        if !unknown.is_empty() {
            return Err(AppError::Validation(unknown));
        }
    }

    let dto: T = serde_json::from_value(value).map_err(body_read)?;
    dto.validate().map_err(violations::<T>)?;

    dto.into_input().map_err(AppError::internal)
}

fn body_read(err: serde_json::Error) -> AppError {
    AppError::BodyRead { source: err.into() }
}

/// Flatten validator output into one tag per wire field.
fn violations<T: Dto>(errors: ValidationErrors) -> AppError {
    let nested = errors
        .errors()
        .values()
        .any(|kind| !matches!(kind, ValidationErrorsKind::Field(_)));
    if nested {
        return AppError::internal(errors);
    }

    let mut fields = FieldErrors::default();
    for (field, kind) in errors.errors() {
        if let ValidationErrorsKind::Field(list) = kind
            && let Some(first) = list.first()
        {
            fields.insert(T::wire_name(field), tag(first));
        }
    }

    AppError::Validation(fields)
}

/// `code`, or `param: value` for the rule's parameter.
///
/// A parameter named like the code wins; otherwise the first bound among
/// `equal`, `min` and `max` is used.
fn tag(error: &ValidationError) -> String {
    let code = error.code.as_ref();
    let param = error.params.get(code).map(|value| (code, value)).or_else(|| {
        BOUND_PARAMS
            .into_iter()
            .find_map(|name| error.params.get(name).map(|value| (name, value)))
    });

    match param {
        Some((name, Value::String(value))) => format!("{name}: {value}"),
        Some((name, value)) => format!("{name}: {value}"),
        None => code.to_string(),
    }
}
