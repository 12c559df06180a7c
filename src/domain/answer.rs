//! Answer entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An answer attached to a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Answer {
    /// Store-assigned identity.
    pub id: i64,

    /// Owning question.
    #[serde(rename = "questionID")]
    pub question_id: i64,

    /// Author.
    #[serde(rename = "userID")]
    pub user_id: Uuid,

    /// Answer text.
    pub text: String,

    /// Creation time.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    /// Last update time.
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// A validated answer submission, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnswer {
    /// Author.
    pub user_id: Uuid,

    /// Answer text.
    pub text: String,
}
