use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::Request;
use axum::response::Response;

use super::read_json;
use crate::db::operations::phrases;
use crate::db::operations::InsertOutcome;
use crate::response::{AppError, SuccessResponse};
use crate::services::bookmarks::{self, SavePhraseInput};
use crate::state::AppState;

pub async fn save_phrase(
    State(state): State<AppState>,
    req: Request<Body>,
) -> Result<Response, AppError> {
    let db = state.require_db()?;
    let input: SavePhraseInput = read_json(req).await?;

    match bookmarks::save_phrase(&db, input).await? {
        InsertOutcome::Created(saved) => Ok(SuccessResponse::created(saved)),
        InsertOutcome::AlreadyExists => Err(AppError::conflict("phrase already saved for this user")),
    }
}

pub async fn list_phrases(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Response, AppError> {
    let db = state.require_db()?;
    let saved = phrases::list_saved_phrases(&db, user_id.trim()).await?;
    Ok(SuccessResponse::ok(saved))
}

pub async fn get_phrase(
    State(state): State<AppState>,
    Path((user_id, phrase_id)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let db = state.require_db()?;
    match phrases::find_saved_phrase(&db, user_id.trim(), phrase_id.trim()).await? {
        Some(saved) => Ok(SuccessResponse::ok(saved)),
        None => Err(AppError::not_found("phrase is not saved for this user")),
    }
}
