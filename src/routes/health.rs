use std::time::SystemTime;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/info", get(info))
        .route("/live", get(live))
        .route("/ready", get(ready))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: &'static str,
    timestamp: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthInfoResponse {
    service: &'static str,
    version: &'static str,
    start_time: String,
    uptime: u64,
}

#[derive(Serialize)]
struct LivenessResponse {
    status: &'static str,
    timestamp: String,
    uptime: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReadinessResponse {
    ready: bool,
    database: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_ms: Option<u128>,
    timestamp: String,
}

enum DbCheck {
    Connected { latency_ms: u128 },
    Error,
    NotConfigured,
}

impl DbCheck {
    fn label(&self) -> &'static str {
        match self {
            Self::Connected { .. } => "connected",
            Self::Error => "error",
            Self::NotConfigured => "not_configured",
        }
    }
}

async fn database_check(state: &AppState) -> DbCheck {
    let Some(db) = state.db() else {
        return DbCheck::NotConfigured;
    };
    match db.ping().await {
        Ok(latency_ms) => DbCheck::Connected { latency_ms },
        Err(err) => {
            tracing::warn!(error = %err, "database ping failed");
            DbCheck::Error
        }
    }
}

async fn root(State(state): State<AppState>) -> Response {
    let check = database_check(&state).await;
    let ok = matches!(check, DbCheck::Connected { .. });

    let body = HealthResponse {
        status: if ok { "ok" } else { "degraded" },
        database: check.label(),
        timestamp: now_iso(),
    };
    let status = if ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(body)).into_response()
}

async fn info(State(state): State<AppState>) -> Response {
    Json(HealthInfoResponse {
        service: "kalima-backend",
        version: env!("CARGO_PKG_VERSION"),
        start_time: system_time_iso(state.started_at_system()),
        uptime: state.uptime_seconds(),
    })
    .into_response()
}

async fn live(State(state): State<AppState>) -> Response {
    Json(LivenessResponse {
        status: "healthy",
        timestamp: now_iso(),
        uptime: state.uptime_seconds(),
    })
    .into_response()
}

async fn ready(State(state): State<AppState>) -> Response {
    let check = database_check(&state).await;
    let latency_ms = match check {
        DbCheck::Connected { latency_ms } => Some(latency_ms),
        _ => None,
    };
    let ready = latency_ms.is_some();

    let body = ReadinessResponse {
        ready,
        database: check.label(),
        latency_ms,
        timestamp: now_iso(),
    };
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(body)).into_response()
}

fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn system_time_iso(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).to_rfc3339_opts(SecondsFormat::Millis, true)
}
