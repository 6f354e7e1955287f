//! Outbound mail delivery.
//!
//! This module provides the [`MailTransport`] abstraction and its
//! implementations:
//! - [`BrevoTransport`]: Brevo transactional email API (API key)
//! - [`HttpApiTransport`]: generic HTTP email API (bearer token)
//! - [`SmtpTransport`]: direct SMTP with STARTTLS and login
//! - [`MemoryTransport`]: records envelopes without sending
//!
//! Exactly one transport is chosen at startup with [`from_config`].

mod brevo;
mod error;
mod http_api;
mod memory;
mod smtp;
mod transport;
mod types;

pub use brevo::BrevoTransport;
pub use error::DeliveryError;
pub(crate) use error::RequiredSettings;
pub use http_api::HttpApiTransport;
pub use memory::MemoryTransport;
pub use smtp::SmtpTransport;
pub use transport::{from_config, MailTransport, SharedTransport};
pub use types::{Ack, Envelope, Mailbox, MessageBody};
