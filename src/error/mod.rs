//! Error handling module.
//!
//! Every failure leaving a handler is an [`AppError`]. Its `IntoResponse`
//! implementation is the only place that writes an error body, so status
//! mapping, logging and the wire shape live together here.

mod fields;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

pub use fields::FieldErrors;

/// Coarse classification of an [`AppError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Classified failure with its own status and message.
    Domain,
    /// Request payload violated declared field constraints.
    Validation,
    /// Anything else; reported as a generic internal error.
    Unclassified,
}

/// Application-level error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The referenced question does not exist.
    #[error("question not found")]
    QuestionNotFound,

    /// The referenced answer does not exist.
    #[error("answer not found")]
    AnswerNotFound,

    /// Generic missing resource (unknown route).
    #[error("not found")]
    NotFound,

    /// Known route, unsupported method.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// The request deadline expired.
    #[error("request timed out")]
    Timeout {
        /// Storage failure that surfaced the deadline, if any.
        #[source]
        source: Option<StorageError>,
    },

    /// Path parameter is not an integer id.
    #[error("invalid id")]
    InvalidId,

    /// Request body was empty.
    #[error("empty request body")]
    EmptyBody,

    /// Request body could not be read or decoded.
    #[error("failed to read request body")]
    BodyRead {
        /// Underlying decode or transport failure.
        #[source]
        source: anyhow::Error,
    },

    /// A handler reached the service without a decoded payload.
    #[error("missing dto")]
    MissingDto,

    /// Payload violated field constraints.
    #[error("validation failed")]
    Validation(FieldErrors),

    /// Anything not classified above.
    #[error("unhandled internal error")]
    Internal(#[source] anyhow::Error),
}

impl AppError {
    /// Wrap any error as an unclassified internal failure.
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }

    /// Timeout raised by the storage layer.
    #[must_use]
    pub fn deadline(source: StorageError) -> Self {
        Self::Timeout {
            source: Some(source),
        }
    }

    /// Get the kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Internal(_) => ErrorKind::Unclassified,
            _ => ErrorKind::Domain,
        }
    }

    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::QuestionNotFound | Self::AnswerNotFound | Self::NotFound => {
                StatusCode::NOT_FOUND
            }
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Timeout { .. } => StatusCode::REQUEST_TIMEOUT,
            Self::InvalidId | Self::EmptyBody | Self::BodyRead { .. } | Self::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::MissingDto | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Internal cause, logged but never sent to the client.
    #[must_use]
    pub fn cause(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Timeout {
                source: Some(source),
            } => Some(source),
            Self::BodyRead { source } | Self::Internal(source) => Some(&**source),
            _ => None,
        }
    }

    /// Build the wire body for this error.
    #[must_use]
    pub fn to_body(&self) -> ErrorResponse {
        match self {
            Self::Validation(fields) => ErrorResponse {
                error: self.to_string(),
                fields: Some(fields.clone()),
            },
            _ => ErrorResponse {
                error: self.to_string(),
                fields: None,
            },
        }
    }
}

/// Wire representation of an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    /// User-facing message.
    pub error: String,

    /// Field violations, present only for validation errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Runs inside the request span, so route and request id are attached.
        match (self.kind(), self.cause()) {
            (ErrorKind::Unclassified, Some(cause)) => {
                tracing::error!(status = %status, error = %cause, "unhandled internal error");
            }
            (ErrorKind::Domain, Some(cause)) => {
                tracing::error!(status = %status, error = %cause, "internal error");
            }
            _ => {
                tracing::debug!(status = %status, message = %self, "request rejected");
            }
        }

        (status, Json(self.to_body())).into_response()
    }
}

/// Storage-specific error type.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No row matched the requested id.
    #[error("not found in storage")]
    NotFound,

    /// The request deadline expired before the store answered.
    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// Database driver failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failure.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Backend not available.
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias using `StorageError`.
pub type StorageResult<T> = std::result::Result<T, StorageError>;
