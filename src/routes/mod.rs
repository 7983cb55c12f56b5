mod auth;
mod exercises;
mod feedback;
mod health;
mod phrases;
mod subscriptions;

use std::string::FromUtf8Error;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::de::DeserializeOwned;

use crate::response::{json_error, AppError};
use crate::state::AppState;

const MAX_BODY_BYTES: usize = 64 * 1024;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/passwordlogin", post(auth::password_login))
        .route("/api/phrases", post(phrases::save_phrase))
        .route("/api/users/:user_id/phrases", get(phrases::list_phrases))
        .route(
            "/api/users/:user_id/phrases/:phrase_id",
            get(phrases::get_phrase),
        )
        .route("/api/blank-history", post(exercises::record_blank_attempt))
        .route(
            "/api/users/:user_id/blank-history",
            get(exercises::list_blank_attempts),
        )
        .route("/api/fillin-history", post(exercises::record_fillin_attempt))
        .route(
            "/api/users/:user_id/fillin-history",
            get(exercises::list_fillin_attempts),
        )
        .route(
            "/api/sentences/:sentence_id/fillin-history",
            get(exercises::list_fillin_attempts_for_sentence),
        )
        .route("/api/content-notify", post(subscriptions::subscribe_content_level))
        .route(
            "/api/users/:user_id/content-notify",
            get(subscriptions::list_content_subscriptions),
        )
        .route("/api/notify-me", post(subscriptions::register_notify_me))
        .route(
            "/api/users/:user_id/notify-me",
            get(subscriptions::list_notify_subscriptions),
        )
        .route("/api/feedback", post(feedback::submit_feedback))
        .route("/api/users/:user_id/feedback", get(feedback::list_feedback))
        .nest("/health", health::router())
        .fallback(fallback_handler)
        .with_state(state)
}

async fn fallback_handler() -> Response {
    json_error(StatusCode::NOT_FOUND, "NOT_FOUND", "route not found").into_response()
}

/// Reads the whole body and decodes it as JSON. Malformed input is a
/// validation failure, not a server fault.
pub(crate) async fn read_json<T: DeserializeOwned>(req: Request<Body>) -> Result<T, AppError> {
    let bytes = axum::body::to_bytes(req.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|_| {
            json_error(
                StatusCode::BAD_REQUEST,
                "BODY_TOO_LARGE",
                "request body too large",
            )
        })?;

    serde_json::from_slice(&bytes)
        .map_err(|err| AppError::bad_request(format!("invalid JSON body: {err}")))
}

/// First value for `key` in a form-encoded query string.
pub(crate) fn get_query_param(query: &str, key: &str) -> Result<Option<String>, FromUtf8Error> {
    for pair in query.split('&') {
        if pair.is_empty() {
            continue;
        }
        let mut iter = pair.splitn(2, '=');
        let k = iter.next().unwrap_or("");
        if decode_component(k)? != key {
            continue;
        }
        let value = iter.next().unwrap_or("");
        return decode_component(value).map(Some);
    }
    Ok(None)
}

fn decode_component(raw: &str) -> Result<String, FromUtf8Error> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).map(|decoded| decoded.into_owned())
}

/// Optional filter parameter for list endpoints. Values are trimmed like the
/// identifiers they are matched against; blank values are ignored.
pub(crate) fn query_filter(query: Option<&str>, key: &str) -> Result<Option<String>, AppError> {
    let Some(query) = query else {
        return Ok(None);
    };
    get_query_param(query, key)
        .map(|value| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        })
        .map_err(|_| AppError::bad_request(format!("query parameter `{key}` is not valid UTF-8")))
}
