//! Error types for the contact relay.

use thiserror::Error;

/// Common error type for startup and configuration.
///
/// Per-request failures use [`crate::mail::DeliveryError`] and
/// [`crate::web::ApiError`] instead; nothing in this enum is produced while
/// handling a request.
#[derive(Error, Debug)]
pub enum RelayError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Mail transport could not be constructed.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Result type alias for contact relay operations.
pub type Result<T> = std::result::Result<T, RelayError>;
