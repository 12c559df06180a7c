//! Question entity and its read view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Answer;

/// A posted question. Id and timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Store-assigned identity.
    pub id: i64,

    /// Question text.
    pub text: String,

    /// Creation time.
    pub created_at: DateTime<Utc>,

    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// One question plus its answers, oldest answer first.
///
/// Assembled per request; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionWithAnswers {
    /// The question.
    pub question: Question,

    /// Answers ordered by creation time ascending.
    pub answers: Vec<Answer>,
}
