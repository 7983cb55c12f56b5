use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::Request;
use axum::response::Response;

use super::read_json;
use crate::db::operations::feedback as feedback_ops;
use crate::response::{AppError, SuccessResponse};
use crate::services::feedback::{self, FeedbackInput};
use crate::state::AppState;

pub async fn submit_feedback(
    State(state): State<AppState>,
    req: Request<Body>,
) -> Result<Response, AppError> {
    let db = state.require_db()?;
    let input: FeedbackInput = read_json(req).await?;
    let stored = feedback::submit_feedback(&db, input).await?;
    Ok(SuccessResponse::created(stored))
}

pub async fn list_feedback(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Response, AppError> {
    let db = state.require_db()?;
    let entries = feedback_ops::list_feedback(&db, user_id.trim()).await?;
    Ok(SuccessResponse::ok(entries))
}
