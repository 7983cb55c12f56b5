pub mod config;
pub mod db;
pub mod logging;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
pub mod types;
pub mod validation;

use std::sync::Arc;

use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::config::DbConfig;
use crate::db::Database;
use crate::state::AppState;

/// Router over an already-opened store. `None` serves every record endpoint
/// with 503 while health and the login stub keep working.
pub fn create_app_with_database(db: Option<Arc<Database>>) -> axum::Router {
    routes::router(AppState::new(db))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Opens the store described by `config`, falling back to a store-less router
/// when it cannot be reached.
pub async fn create_app(config: DbConfig) -> axum::Router {
    let db = match Database::connect(config).await {
        Ok(db) => Some(Arc::new(db)),
        Err(err) => {
            tracing::warn!(error = %err, "record store not initialized");
            None
        }
    };

    create_app_with_database(db)
}
