//! Request extractors.
//!
//! Extractors that can fail reject with an [`AppError`](crate::error::AppError)
//! so that failures still go through the common error renderer.

mod deadline;
mod path_id;
mod validated_json;

pub use path_id::PathId;
pub use validated_json::{Validated, ValidatedJson};
