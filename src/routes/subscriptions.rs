use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::Request;
use axum::response::Response;

use super::read_json;
use crate::db::operations::{content_notify, notify_me, InsertOutcome};
use crate::response::{AppError, SuccessResponse};
use crate::services::subscriptions::{self, ContentSubscriptionInput, NotifySubscriptionInput};
use crate::state::AppState;

pub async fn subscribe_content_level(
    State(state): State<AppState>,
    req: Request<Body>,
) -> Result<Response, AppError> {
    let db = state.require_db()?;
    let input: ContentSubscriptionInput = read_json(req).await?;

    match subscriptions::subscribe_content_level(&db, input).await? {
        InsertOutcome::Created(subscription) => Ok(SuccessResponse::created(subscription)),
        InsertOutcome::AlreadyExists => {
            Err(AppError::conflict("already subscribed to this level"))
        }
    }
}

pub async fn list_content_subscriptions(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Response, AppError> {
    let db = state.require_db()?;
    let subscriptions = content_notify::list_content_subscriptions(&db, user_id.trim()).await?;
    Ok(SuccessResponse::ok(subscriptions))
}

pub async fn register_notify_me(
    State(state): State<AppState>,
    req: Request<Body>,
) -> Result<Response, AppError> {
    let db = state.require_db()?;
    let input: NotifySubscriptionInput = read_json(req).await?;
    let subscription = subscriptions::register_notify_me(&db, input).await?;
    Ok(SuccessResponse::created(subscription))
}

pub async fn list_notify_subscriptions(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Response, AppError> {
    let db = state.require_db()?;
    let subscriptions = notify_me::list_notify_subscriptions(&db, user_id.trim()).await?;
    Ok(SuccessResponse::ok(subscriptions))
}
