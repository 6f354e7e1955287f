//! Response DTOs for Web API.

use serde::Serialize;

/// Reply after a message was handed to the mail system.
pub const SENT_MESSAGE: &str = "Thank you! Your message has been sent successfully.";

/// `{"message": ...}` success body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

impl MessageResponse {
    /// Create a new message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The fixed contact-form success reply.
    pub fn sent() -> Self {
        Self::new(SENT_MESSAGE)
    }
}
