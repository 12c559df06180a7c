//! Question operations.

use crate::domain::{Question, QuestionDto, QuestionWithAnswers};
use crate::error::{AppError, Result};
use crate::service::{NotFoundPolicy, translate};
use crate::storage::{Deadline, QuestionCreator, QuestionDeleter, QuestionFetcher, QuestionLister};

/// List every question.
///
/// # Errors
///
/// Returns `Timeout` if the deadline passed, otherwise an internal error.
pub async fn get_all_questions<S>(storage: &S, deadline: Deadline) -> Result<Vec<Question>>
where
    S: QuestionLister + ?Sized,
{
    storage
        .list_questions(deadline)
        .await
        .map_err(|err| translate(err, NotFoundPolicy::Unclassified))
}

/// Create a question from a validated payload.
///
/// # Errors
///
/// Returns `MissingDto` when called without a payload, `Timeout` if the
/// deadline passed, otherwise an internal error.
pub async fn create_question<S>(
    storage: &S,
    deadline: Deadline,
    dto: Option<&QuestionDto>,
) -> Result<Question>
where
    S: QuestionCreator + ?Sized,
{
    let dto = dto.ok_or(AppError::MissingDto)?;
    storage
        .create_question(deadline, dto)
        .await
        .map_err(|err| translate(err, NotFoundPolicy::Unclassified))
}

/// Fetch a question together with its answers.
///
/// # Errors
///
/// Returns `QuestionNotFound`, `Timeout`, or an internal error.
pub async fn get_question_with_answers<S>(
    storage: &S,
    deadline: Deadline,
    id: i64,
) -> Result<QuestionWithAnswers>
where
    S: QuestionFetcher + ?Sized,
{
    storage
        .get_question(deadline, id)
        .await
        .map_err(|err| translate(err, NotFoundPolicy::Question))
}

/// Delete a question.
///
/// # Errors
///
/// Returns `QuestionNotFound`, `Timeout`, or an internal error.
pub async fn delete_question<S>(storage: &S, deadline: Deadline, id: i64) -> Result<()>
where
    S: QuestionDeleter + ?Sized,
{
    storage
        .delete_question(deadline, id)
        .await
        .map_err(|err| translate(err, NotFoundPolicy::Question))
}
