//! Answer operations.

use crate::domain::{Answer, NewAnswer};
use crate::error::{AppError, Result};
use crate::service::{NotFoundPolicy, translate};
use crate::storage::{AnswerCreator, AnswerDeleter, AnswerFetcher, Deadline};

/// Fetch a single answer.
///
/// # Errors
///
/// Returns `AnswerNotFound`, `Timeout`, or an internal error.
pub async fn get_answer<S>(storage: &S, deadline: Deadline, id: i64) -> Result<Answer>
where
    S: AnswerFetcher + ?Sized,
{
    storage
        .get_answer(deadline, id)
        .await
        .map_err(|err| translate(err, NotFoundPolicy::Answer))
}

/// Attach an answer to a question.
///
/// A missing owner surfaces as `QuestionNotFound`, not as an answer error.
///
/// # Errors
///
/// Returns `MissingDto` without input, otherwise `QuestionNotFound`,
/// `Timeout`, or an internal error.
pub async fn create_answer<S>(
    storage: &S,
    deadline: Deadline,
    question_id: i64,
    input: Option<&NewAnswer>,
) -> Result<Answer>
where
    S: AnswerCreator + ?Sized,
{
    let new = input.ok_or(AppError::MissingDto)?;

    storage
        .create_answer(deadline, question_id, new)
        .await
        .map_err(|err| translate(err, NotFoundPolicy::Question))
}

/// Delete an answer.
///
/// # Errors
///
/// Returns `AnswerNotFound`, `Timeout`, or an internal error.
pub async fn delete_answer<S>(storage: &S, deadline: Deadline, id: i64) -> Result<()>
where
    S: AnswerDeleter + ?Sized,
{
    storage
        .delete_answer(deadline, id)
        .await
        .map_err(|err| translate(err, NotFoundPolicy::Answer))
}
