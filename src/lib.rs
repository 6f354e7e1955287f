//! contact-relay - Contact form relay
//!
//! Accepts contact form submissions over HTTP and forwards them by email
//! through a configurable transport (Brevo, a generic HTTP mail API or SMTP).

pub mod config;
pub mod contact;
pub mod error;
pub mod logging;
pub mod mail;
pub mod web;

pub use config::Config;
pub use error::{RelayError, Result};
pub use mail::{DeliveryError, MailTransport, SharedTransport};
pub use web::WebServer;
