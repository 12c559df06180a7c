//! Data Transfer Objects for API requests and responses.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::domain::NewAnswer;

/// A request payload decoded by the validation stage.
///
/// Violation tags are the rule `code`, followed by the rule parameter when
/// there is one: `length(min = 3)` and `length(min = 3, code = "min")` both
/// report `min: 3`.
pub trait Dto: Sized {
    /// Value handed to the handler once the payload passed validation.
    type Input: Clone + Send + Sync + 'static;

    /// Pairs of (struct field, JSON key) accepted in the payload.
    const FIELDS: &'static [(&'static str, &'static str)];

    /// Convert a payload that passed its rules into typed input.
    ///
    /// # Errors
    ///
    /// Only when the rules let through something the conversion rejects.
    fn into_input(self) -> Result<Self::Input, ValidationError>;

    /// JSON key for a struct field, falling back to the field name itself.
    fn wire_name(field: &str) -> &str {
        Self::FIELDS
            .iter()
            .find(|(name, _)| *name == field)
            .map_or(field, |&(_, wire)| wire)
    }

    /// Whether a JSON key belongs to this payload.
    fn accepts(key: &str) -> bool {
        Self::FIELDS.iter().any(|(_, wire)| *wire == key)
    }
}

/// Payload for `POST /questions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct QuestionDto {
    /// Question text.
    #[serde(default)]
    #[validate(length(min = 1, code = "required"))]
    pub text: String,
}

impl Dto for QuestionDto {
    type Input = Self;

    const FIELDS: &'static [(&'static str, &'static str)] = &[("text", "text")];

    fn into_input(self) -> Result<Self, ValidationError> {
        Ok(self)
    }
}

/// Payload for `POST /questions/{id}/answers`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AnswerDto {
    /// Author id; must be a UUID.
    #[serde(default, rename = "userID")]
    #[validate(length(min = 1, code = "required"), custom = "validate_uuid")]
    pub user_id: String,

    /// Answer text.
    #[serde(default)]
    #[validate(length(min = 1, code = "required"))]
    pub text: String,
}

impl Dto for AnswerDto {
    type Input = NewAnswer;

    const FIELDS: &'static [(&'static str, &'static str)] =
        &[("user_id", "userID"), ("text", "text")];

    fn into_input(self) -> Result<NewAnswer, ValidationError> {
        let user_id = Uuid::parse_str(&self.user_id).map_err(|_| ValidationError::new("uuid"))?;
        Ok(NewAnswer {
            user_id,
            text: self.text,
        })
    }
}

fn validate_uuid(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || Uuid::parse_str(value).is_ok() {
        // Emptiness is reported by the `required` rule.
        Ok(())
    } else {
        Err(ValidationError::new("uuid"))
    }
}

/// Body returned by operations without a payload of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

impl MessageResponse {
    /// The generic success message.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            message: "ok".to_string(),
        }
    }
}
