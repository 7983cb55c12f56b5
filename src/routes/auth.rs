use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use super::get_query_param;

const PASSWORD_LOGIN_MESSAGE: &str = "Password login endpoint";

/// Echo of the submitted credentials. This endpoint performs no
/// authentication; it returns exactly what it was given.
#[derive(Debug, Serialize)]
struct PasswordLoginResponse {
    message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<String>,
}

#[derive(Serialize)]
struct PasswordLoginError {
    error: &'static str,
}

pub async fn password_login(req: Request<Body>) -> Response {
    let query = req.uri().query().unwrap_or("");

    let parsed = get_query_param(query, "email")
        .and_then(|email| get_query_param(query, "password").map(|password| (email, password)));

    match parsed {
        Ok((email, password)) => Json(PasswordLoginResponse {
            message: PASSWORD_LOGIN_MESSAGE,
            email,
            password,
        })
        .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "password login query could not be decoded");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(PasswordLoginError {
                    error: "Internal server error",
                }),
            )
                .into_response()
        }
    }
}
