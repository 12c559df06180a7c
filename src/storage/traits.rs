//! Storage trait definitions.
//!
//! One trait per operation so that each service function can ask for
//! exactly the capability it uses, and tests can fake just that method.
//! The family traits and [`Storage`] tie them together for the backends.

use async_trait::async_trait;

use crate::domain::{Answer, NewAnswer, Question, QuestionDto, QuestionWithAnswers};
use crate::error::StorageResult;
use crate::storage::Deadline;

/// Lists every question.
#[async_trait]
pub trait QuestionLister: Send + Sync {
    /// All questions; empty when none exist.
    async fn list_questions(&self, deadline: Deadline) -> StorageResult<Vec<Question>>;
}

/// Persists new questions.
#[async_trait]
pub trait QuestionCreator: Send + Sync {
    /// Insert a question; id and timestamps come from the store.
    async fn create_question(&self, deadline: Deadline, dto: &QuestionDto)
    -> StorageResult<Question>;
}

/// Reads a question with its answers.
#[async_trait]
pub trait QuestionFetcher: Send + Sync {
    /// The question and its answers, oldest first.
    async fn get_question(&self, deadline: Deadline, id: i64)
    -> StorageResult<QuestionWithAnswers>;
}

/// Removes questions.
#[async_trait]
pub trait QuestionDeleter: Send + Sync {
    /// Hard-delete a question. Zero affected rows is `NotFound`.
    async fn delete_question(&self, deadline: Deadline, id: i64) -> StorageResult<()>;
}

/// Reads single answers.
#[async_trait]
pub trait AnswerFetcher: Send + Sync {
    /// The answer with this id.
    async fn get_answer(&self, deadline: Deadline, id: i64) -> StorageResult<Answer>;
}

/// Persists new answers.
#[async_trait]
pub trait AnswerCreator: Send + Sync {
    /// Insert an answer under `question_id`.
    ///
    /// A missing question surfaces as `NotFound`.
    async fn create_answer(
        &self,
        deadline: Deadline,
        question_id: i64,
        answer: &NewAnswer,
    ) -> StorageResult<Answer>;
}

/// Removes answers.
#[async_trait]
pub trait AnswerDeleter: Send + Sync {
    /// Hard-delete an answer. Zero affected rows is `NotFound`.
    async fn delete_answer(&self, deadline: Deadline, id: i64) -> StorageResult<()>;
}

/// Every question operation.
pub trait QuestionStorage: QuestionLister + QuestionCreator + QuestionFetcher + QuestionDeleter {}

impl<T> QuestionStorage for T where
    T: QuestionLister + QuestionCreator + QuestionFetcher + QuestionDeleter + ?Sized
{
}

/// Every answer operation.
pub trait AnswerStorage: AnswerFetcher + AnswerCreator + AnswerDeleter {}

impl<T> AnswerStorage for T where T: AnswerFetcher + AnswerCreator + AnswerDeleter + ?Sized {}

/// Combined storage trait for all storage operations.
#[async_trait]
pub trait Storage: QuestionStorage + AnswerStorage {
    /// Check if the storage backend is healthy and reachable.
    async fn health_check(&self) -> StorageResult<()>;

    /// Get the storage backend name.
    fn backend_name(&self) -> &'static str;
}
