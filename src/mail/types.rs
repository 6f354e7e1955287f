//! Types handed to and returned from mail transports.

use std::fmt;

/// An email address with an optional display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mailbox {
    /// Display name.
    pub name: Option<String>,
    /// Bare address.
    pub email: String,
}

impl Mailbox {
    /// Create a mailbox without a display name.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            name: None,
            email: email.into(),
        }
    }

    /// Create a mailbox with a display name.
    pub fn named(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: email.into(),
        }
    }
}

impl fmt::Display for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} <{}>", name, self.email),
            None => f.write_str(&self.email),
        }
    }
}

/// Message body in both renditions; each transport sends the one it supports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBody {
    /// Plain text rendition.
    pub text: String,
    /// HTML rendition.
    pub html: String,
}

/// A message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Sender (configured address and display name).
    pub from: Mailbox,
    /// Recipient (configured address).
    pub to: Mailbox,
    /// Where replies go: the person who filled in the form.
    pub reply_to: Mailbox,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub body: MessageBody,
}

/// Delivery was accepted by the mail system.
///
/// This does not mean the recipient has received the message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ack {
    /// Provider message identifier, when the provider returns one.
    pub message_id: Option<String>,
}

impl Ack {
    /// Acceptance without an identifier.
    pub fn accepted() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mailbox_display() {
        assert_eq!(Mailbox::new("ada@example.com").to_string(), "ada@example.com");
        assert_eq!(
            Mailbox::named("Ada", "ada@example.com").to_string(),
            "Ada <ada@example.com>"
        );
    }

    #[test]
    fn test_ack() {
        assert!(Ack::accepted().message_id.is_none());
    }
}
