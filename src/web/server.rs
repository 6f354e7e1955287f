//! Web server for the contact relay.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;

use crate::config::{Config, ServerConfig};
use crate::contact::ContactComposer;
use crate::error::{RelayError, Result};
use crate::mail::SharedTransport;

use super::handlers::AppState;
use super::router::{create_health_router, create_router, create_static_router};

/// Web server for the API and the frontend.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// Server configuration.
    server_config: ServerConfig,
}

impl WebServer {
    /// Create a new web server.
    pub fn new(config: &Config, transport: SharedTransport) -> Result<Self> {
        let server_config = config.server.clone();
        let addr = format!("{}:{}", server_config.host, server_config.port)
            .parse()
            .map_err(|e| {
                RelayError::Config(format!(
                    "invalid listen address {}:{}: {}",
                    server_config.host, server_config.port, e
                ))
            })?;

        let app_state = AppState::new(transport, ContactComposer::from_config(&config.mail))
            .with_error_details(server_config.expose_error_details);

        Ok(Self {
            addr,
            app_state: Arc::new(app_state),
            server_config,
        })
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Build the complete router without binding a socket.
    pub fn into_router(self) -> Router {
        let mut router = create_router(self.app_state, &self.server_config.cors_origins)
            .merge(create_health_router());

        if self.server_config.serve_static {
            if let Some(static_router) = create_static_router(&self.server_config.static_path) {
                router = router.merge(static_router);
            }
        }

        router.layer(CompressionLayer::new())
    }

    /// Run the web server.
    pub async fn run(self) -> std::result::Result<(), std::io::Error> {
        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;
        let router = self.into_router();

        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router).await
    }

    /// Run the server and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> std::result::Result<SocketAddr, std::io::Error> {
        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;
        let router = self.into_router();

        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
