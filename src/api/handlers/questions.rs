//! Question handlers.

use std::time::Duration;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use crate::api::extractors::{PathId, ValidatedJson};
use crate::api::middleware::{with_timeout, with_validation};
use crate::api::state::AppState;
use crate::domain::{MessageResponse, Question, QuestionDto, QuestionWithAnswers};
use crate::error::Result;
use crate::service;
use crate::storage::Deadline;

/// Question routes, each bounded by `timeout`.
///
/// Bodies are validated before the deadline starts.
pub fn routes(timeout: Duration) -> Router<AppState> {
    Router::new()
        .route(
            "/questions",
            with_timeout(get(list_questions), timeout).merge(with_validation::<QuestionDto, _>(
                with_timeout(post(create_question), timeout),
            )),
        )
        .route(
            "/questions/{id}",
            with_timeout(get(get_question).delete(delete_question), timeout),
        )
}

/// List all questions.
///
/// GET /questions
pub async fn list_questions(
    State(state): State<AppState>,
    deadline: Deadline,
) -> Result<Json<Vec<Question>>> {
    let questions = service::get_all_questions(state.storage.as_ref(), deadline).await?;
    Ok(Json(questions))
}

/// Create a question.
///
/// POST /questions
pub async fn create_question(
    State(state): State<AppState>,
    deadline: Deadline,
    ValidatedJson(dto): ValidatedJson<QuestionDto>,
) -> Result<(StatusCode, Json<Question>)> {
    let question = service::create_question(state.storage.as_ref(), deadline, dto.as_ref()).await?;
    Ok((StatusCode::CREATED, Json(question)))
}

/// Get a question with its answers.
///
/// GET /questions/{id}
pub async fn get_question(
    State(state): State<AppState>,
    deadline: Deadline,
    PathId(id): PathId,
) -> Result<Json<QuestionWithAnswers>> {
    let view = service::get_question_with_answers(state.storage.as_ref(), deadline, id).await?;
    Ok(Json(view))
}

/// Delete a question.
///
/// DELETE /questions/{id}
pub async fn delete_question(
    State(state): State<AppState>,
    deadline: Deadline,
    PathId(id): PathId,
) -> Result<Json<MessageResponse>> {
    service::delete_question(state.storage.as_ref(), deadline, id).await?;
    Ok(Json(MessageResponse::ok()))
}
