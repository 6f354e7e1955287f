//! Router configuration for Web API.

use axum::{
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::handlers::{submit_contact, AppState};
use super::middleware::create_cors_layer;

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let api_routes = Router::new().route("/contact", post(submit_contact));

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

/// Create a router serving the frontend files under `path`.
///
/// `GET /` answers with `index.html`. Returns `None` when the directory does
/// not exist so the API can still start.
pub fn create_static_router(path: &str) -> Option<Router> {
    if !Path::new(path).is_dir() {
        tracing::warn!("Static directory not found: {}. Frontend will not be served.", path);
        return None;
    }

    tracing::info!("Serving static files from: {}", path);
    Some(Router::new().fallback_service(ServeDir::new(path)))
}
