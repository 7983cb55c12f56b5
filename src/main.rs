use std::net::SocketAddr;
use std::sync::Arc;

use kalima_backend_rust::config::Config;
use kalima_backend_rust::db::Database;
use kalima_backend_rust::{create_app_with_database, logging};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            std::process::exit(1);
        }
    };

    let _log_guard = logging::init_tracing(&config.log_level, "backend");

    let db = match Database::connect(config.database.clone()).await {
        Ok(db) => Some(Arc::new(db)),
        Err(err) => {
            tracing::warn!(error = %err, "record store not initialized");
            None
        }
    };

    let app = create_app_with_database(db.clone());

    let addr = config.bind_addr();
    tracing::info!(%addr, "kalima-backend listening");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(error = %err, %addr, "bind listener failed");
            std::process::exit(1);
        }
    };

    let server = axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal());

    if let Err(e) = server.await {
        tracing::error!(error = %e, "server error");
    }

    if let Some(db) = db {
        db.close().await;
    }

    tracing::info!("graceful shutdown complete");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
