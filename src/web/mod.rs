//! HTTP surface of the contact relay.
//!
//! Serves `POST /api/contact`, a health check and the static frontend.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
