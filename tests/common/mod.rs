//! Test helpers for the contact relay integration tests.
//!
//! Provides a ready-made [`TestServer`] around the full router and a stub
//! mail provider bound on a random local port.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode};
use axum::{extract::State, Json, Router};
use axum_test::TestServer;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

use contact_relay::mail::{Envelope, Mailbox, MessageBody};
use contact_relay::{Config, SharedTransport, WebServer};

/// Create a test configuration with both addresses set and no static files.
pub fn create_test_config() -> Config {
    let mut config = Config::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config.server.serve_static = false;
    config.mail.sender_email = Some("site@example.com".to_string());
    config.mail.recipient_email = Some("owner@example.com".to_string());
    config
}

/// Create a test server for the given configuration and transport.
pub fn create_test_server(config: &Config, transport: SharedTransport) -> TestServer {
    let router = WebServer::new(config, transport)
        .expect("Failed to create web server")
        .into_router();
    TestServer::new(router).expect("Failed to create test server")
}

/// A sample envelope as the composer would build it.
pub fn sample_envelope() -> Envelope {
    Envelope {
        from: Mailbox::named("Contact Form", "site@example.com"),
        to: Mailbox::new("owner@example.com"),
        reply_to: Mailbox::named("Ada", "ada@example.com"),
        subject: "New Contact Form Message from Ada: Hi".to_string(),
        body: MessageBody {
            text: "Name: Ada\nEmail: ada@example.com\n\nMessage:\nHello\n".to_string(),
            html: "<p>Hello</p>".to_string(),
        },
    }
}

/// A request captured by [`StubProvider`].
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub headers: HeaderMap,
    pub body: Value,
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    reply: Value,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// A fake mail provider answering every POST with a fixed status and body.
pub struct StubProvider {
    pub addr: SocketAddr,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl StubProvider {
    /// Start a provider on 127.0.0.1 with a random port.
    pub async fn start(status: StatusCode, reply: Value) -> Self {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            status,
            reply,
            captured: captured.clone(),
        };

        let router = Router::new()
            .route("/*path", axum::routing::post(capture))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub provider");
        let addr = listener.local_addr().expect("Failed to read stub address");

        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Self { addr, captured }
    }

    /// URL of the provider's send endpoint.
    pub fn url(&self) -> String {
        format!("http://{}/v3/smtp/email", self.addr)
    }

    /// Requests received so far.
    pub async fn requests(&self) -> Vec<CapturedRequest> {
        self.captured.lock().await.clone()
    }
}

async fn capture(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state
        .captured
        .lock()
        .await
        .push(CapturedRequest { headers, body });
    (state.status, Json(state.reply))
}

/// An address on which nothing is listening.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe listener");
    let addr = listener.local_addr().expect("Failed to read probe address");
    drop(listener);
    addr
}
