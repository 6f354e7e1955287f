//! API handlers for the contact relay.

use crate::contact::ContactComposer;
use crate::mail::SharedTransport;

pub mod contact;

pub use contact::submit_contact;

/// Application state shared across handlers.
///
/// Everything here is read-only after startup.
pub struct AppState {
    /// The process-wide mail transport.
    pub transport: SharedTransport,
    /// Envelope builder holding the configured addresses.
    pub composer: ContactComposer,
    /// Include delivery diagnostics in 500 responses.
    pub expose_error_details: bool,
}

impl AppState {
    /// Create a new application state.
    pub fn new(transport: SharedTransport, composer: ContactComposer) -> Self {
        Self {
            transport,
            composer,
            expose_error_details: false,
        }
    }

    /// Set whether delivery diagnostics reach the client.
    pub fn with_error_details(mut self, expose: bool) -> Self {
        self.expose_error_details = expose;
        self
    }
}
