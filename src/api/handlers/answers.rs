//! Answer handlers.

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
use crate::domain::{Answer, AnswerDto, MessageResponse, NewAnswer};
use crate::error::Result;
use crate::service;
use crate::storage::Deadline;

/// Answer routes, each bounded by `timeout`.
///
/// Bodies are validated before the deadline starts.
pub fn routes(timeout: Duration) -> Router<AppState> {
    Router::new()
        .route(
            "/questions/{id}/answers",
            with_validation::<AnswerDto, _>(with_timeout(post(create_answer), timeout)),
        )
        .route(
            "/answers/{id}",
            with_timeout(get(get_answer).delete(delete_answer), timeout),
        )
}

/// Answer a question.
///
/// POST /questions/{id}/answers
pub async fn create_answer(
    State(state): State<AppState>,
    deadline: Deadline,
    ValidatedJson(input): ValidatedJson<NewAnswer>,
    PathId(question_id): PathId,
) -> Result<(StatusCode, Json<Answer>)> {
    let answer =
        service::create_answer(state.storage.as_ref(), deadline, question_id, input.as_ref())
            .await?;
    Ok((StatusCode::CREATED, Json(answer)))
}

/// Get a single answer.
///
/// GET /answers/{id}
pub async fn get_answer(
    State(state): State<AppState>,
    deadline: Deadline,
    PathId(id): PathId,
) -> Result<Json<Answer>> {
    let answer = service::get_answer(state.storage.as_ref(), deadline, id).await?;
    Ok(Json(answer))
}

/// Delete an answer.
///
/// DELETE /answers/{id}
pub async fn delete_answer(
    State(state): State<AppState>,
    deadline: Deadline,
    PathId(id): PathId,
) -> Result<Json<MessageResponse>> {
    service::delete_answer(state.storage.as_ref(), deadline, id).await?;
    Ok(Json(MessageResponse::ok()))
}
