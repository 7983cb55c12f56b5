use axum::body::Body;
use axum::extract::{Path, RawQuery, State};
use axum::http::Request;
use axum::response::Response;

use super::{query_filter, read_json};
use crate::db::operations::{blank_history, fillin_history};
use crate::response::{AppError, SuccessResponse};
use crate::services::exercises::{self, BlankAttemptInput, FillinAttemptInput};
use crate::state::AppState;

pub async fn record_blank_attempt(
    State(state): State<AppState>,
    req: Request<Body>,
) -> Result<Response, AppError> {
    let db = state.require_db()?;
    let input: BlankAttemptInput = read_json(req).await?;
    let attempt = exercises::record_blank_attempt(&db, input).await?;
    Ok(SuccessResponse::created(attempt))
}

pub async fn list_blank_attempts(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Response, AppError> {
    let db = state.require_db()?;
    let phrase_id = query_filter(query.as_deref(), "phraseId")?;
    let attempts = blank_history::list_blank_attempts(&db, user_id.trim(), phrase_id.as_deref()).await?;
    Ok(SuccessResponse::ok(attempts))
}

pub async fn record_fillin_attempt(
    State(state): State<AppState>,
    req: Request<Body>,
) -> Result<Response, AppError> {
    let db = state.require_db()?;
    let input: FillinAttemptInput = read_json(req).await?;
    let attempt = exercises::record_fillin_attempt(&db, input).await?;
    Ok(SuccessResponse::created(attempt))
}

pub async fn list_fillin_attempts(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Response, AppError> {
    let db = state.require_db()?;
    let sentence_id = query_filter(query.as_deref(), "sentenceId")?;
    let attempts =
        fillin_history::list_fillin_attempts_for_user(&db, user_id.trim(), sentence_id.as_deref()).await?;
    Ok(SuccessResponse::ok(attempts))
}

pub async fn list_fillin_attempts_for_sentence(
    State(state): State<AppState>,
    Path(sentence_id): Path<String>,
) -> Result<Response, AppError> {
    let db = state.require_db()?;
    let attempts = fillin_history::list_fillin_attempts_for_sentence(&db, sentence_id.trim()).await?;
    Ok(SuccessResponse::ok(attempts))
}
