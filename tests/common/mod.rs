#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use kalima_backend_rust::db::config::DbConfig;
use kalima_backend_rust::db::Database;
use tempfile::TempDir;

/// Keeps the temp directory alive for as long as the database is in use.
pub struct TestDb {
    pub db: Arc<Database>,
    _dir: TempDir,
}

pub async fn open_test_db() -> TestDb {
    let dir = TempDir::new().expect("failed to create temp dir");
    let config = DbConfig::for_path(dir.path().join("test.db"));
    let db = Database::connect(config).await.expect("failed to open test db");
    TestDb {
        db: Arc::new(db),
        _dir: dir,
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: TestDb,
}

pub async fn create_test_app() -> TestApp {
    let store = open_test_db().await;
    let router = kalima_backend_rust::create_app_with_database(Some(Arc::clone(&store.db)));
    TestApp { router, store }
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
