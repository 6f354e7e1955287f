//! Static Frontend Tests
//!
//! Integration tests for serving the frontend next to the API.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{create_test_config, create_test_server};
use contact_relay::mail::MemoryTransport;
use serde_json::json;

fn create_static_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    std::fs::write(
        dir.path().join("index.html"),
        "<!doctype html><form id=\"contact\"></form>",
    )
    .unwrap();
    std::fs::write(dir.path().join("app.js"), "console.log('ready');").unwrap();
    dir
}

#[tokio::test]
async fn test_root_serves_index() {
    let dir = create_static_dir();
    let mut config = create_test_config();
    config.server.serve_static = true;
    config.server.static_path = dir.path().to_string_lossy().into_owned();
    let server = create_test_server(&config, Arc::new(MemoryTransport::new()));

    let response = server.get("/").await;

    response.assert_status_ok();
    response.assert_text("<!doctype html><form id=\"contact\"></form>");
}

#[tokio::test]
async fn test_asset_and_missing_file() {
    let dir = create_static_dir();
    let mut config = create_test_config();
    config.server.serve_static = true;
    config.server.static_path = dir.path().to_string_lossy().into_owned();
    let server = create_test_server(&config, Arc::new(MemoryTransport::new()));

    let response = server.get("/app.js").await;
    response.assert_status_ok();
    response.assert_text("console.log('ready');");

    let response = server.get("/missing.js").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_api_alongside_static_files() {
    let dir = create_static_dir();
    let transport = MemoryTransport::new();
    let mut config = create_test_config();
    config.server.serve_static = true;
    config.server.static_path = dir.path().to_string_lossy().into_owned();
    let server = create_test_server(&config, Arc::new(transport.clone()));

    let response = server
        .post("/api/contact")
        .json(&json!({
            "name": "Ada",
            "email": "ada@example.com",
            "message": "Hello"
        }))
        .await;

    response.assert_status_ok();
    assert_eq!(transport.attempts().await, 1);
}

#[tokio::test]
async fn test_missing_static_dir_keeps_api() {
    let mut config = create_test_config();
    config.server.serve_static = true;
    config.server.static_path = "/nonexistent/contact-relay".to_string();
    let server = create_test_server(&config, Arc::new(MemoryTransport::new()));

    server.get("/health").await.assert_status_ok();
    server.get("/").await.assert_status(StatusCode::NOT_FOUND);
}
