//! In-memory transport for tests and local runs.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::mail::{Ack, DeliveryError, Envelope, MailTransport};

/// Records every envelope it is given instead of sending it.
///
/// A failure can be scripted with [`MemoryTransport::failing`]; the envelope
/// is still recorded so callers can assert that delivery was attempted.
/// Clones share the same record.
#[derive(Clone, Default)]
pub struct MemoryTransport {
    sent: Arc<Mutex<Vec<Envelope>>>,
    failure: Option<DeliveryError>,
}

impl MemoryTransport {
    /// Create a transport that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport that records and then fails every delivery.
    pub fn failing(error: DeliveryError) -> Self {
        Self {
            sent: Arc::default(),
            failure: Some(error),
        }
    }

    /// Envelopes received so far, oldest first.
    pub async fn sent_messages(&self) -> Vec<Envelope> {
        self.sent.lock().await.clone()
    }

    /// Number of delivery attempts so far.
    pub async fn attempts(&self) -> usize {
        self.sent.lock().await.len()
    }
}

#[async_trait]
impl MailTransport for MemoryTransport {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn deliver(&self, envelope: Envelope) -> Result<Ack, DeliveryError> {
        self.sent.lock().await.push(envelope);
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(Ack::accepted()),
        }
    }
}
