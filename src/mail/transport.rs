//! The single-operation delivery interface and transport selection.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::{MailConfig, TransportKind};
use crate::mail::{
    Ack, BrevoTransport, DeliveryError, Envelope, HttpApiTransport, SmtpTransport,
};
use crate::{RelayError, Result};

/// User agent string for provider API calls.
const USER_AGENT: &str = concat!("contact-relay/", env!("CARGO_PKG_VERSION"));

/// Connect timeout in seconds for provider API calls.
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Sends a fully formed [`Envelope`] to an external mail system.
///
/// One call performs exactly one outbound network exchange. Implementations
/// check their own settings before touching the network and report absent
/// ones as [`DeliveryError::ConfigurationMissing`].
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Deliver one message.
    async fn deliver(&self, envelope: Envelope) -> std::result::Result<Ack, DeliveryError>;
}

/// Shared handle to the process-wide transport.
pub type SharedTransport = Arc<dyn MailTransport>;

/// Build the transport selected by `config.transport`.
pub fn from_config(config: &MailConfig) -> Result<SharedTransport> {
    let timeout = Duration::from_secs(config.timeout_secs);
    let transport: SharedTransport = match config.transport {
        TransportKind::Brevo => Arc::new(BrevoTransport::new(&config.brevo, timeout)?),
        TransportKind::HttpApi => Arc::new(HttpApiTransport::new(&config.http_api, timeout)?),
        TransportKind::Smtp => Arc::new(SmtpTransport::new(&config.smtp, timeout)),
    };
    tracing::info!(transport = transport.name(), "Mail transport configured");
    Ok(transport)
}

/// Create the HTTP client used by the API-based transports.
pub(crate) fn http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS).min(timeout))
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| RelayError::Transport(format!("failed to create HTTP client: {e}")))
}

/// Map a failed `send()` to the delivery taxonomy.
///
/// `send()` only fails before a response arrives, so everything here is a
/// reachability problem.
pub(crate) fn send_error(err: reqwest::Error) -> DeliveryError {
    if err.is_timeout() {
        DeliveryError::Unreachable(format!("request timed out: {err}"))
    } else if err.is_connect() {
        DeliveryError::Unreachable(format!("connection failed: {err}"))
    } else {
        DeliveryError::Unreachable(err.to_string())
    }
}

/// Maximum number of provider response bytes kept as diagnostic detail.
const MAX_DIAGNOSTIC_LEN: usize = 2048;

/// Trim a provider response body for logging.
pub(crate) fn diagnostic(body: &str) -> String {
    let body = body.trim();
    if body.len() <= MAX_DIAGNOSTIC_LEN {
        return body.to_string();
    }
    let mut end = MAX_DIAGNOSTIC_LEN;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
