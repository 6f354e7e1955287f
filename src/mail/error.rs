//! Delivery failure taxonomy.

use thiserror::Error;

/// Why a delivery attempt failed. Every variant is terminal for the request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// Required server-side settings are absent. Holds the setting names,
    /// never their values.
    #[error("configuration missing: {}", .0.join(", "))]
    ConfigurationMissing(Vec<&'static str>),

    /// The provider or SMTP server refused the message.
    #[error("transport rejected the message{}: {detail}", .status.map(|s| format!(" (status {s})")).unwrap_or_default())]
    TransportRejected {
        /// HTTP status, for HTTP-based providers.
        status: Option<u16>,
        /// Provider diagnostic.
        detail: String,
    },

    /// The mail system could not be reached.
    #[error("mail service unreachable: {0}")]
    Unreachable(String),
}

impl DeliveryError {
    /// Rejection without an HTTP status.
    pub fn rejected(detail: impl Into<String>) -> Self {
        DeliveryError::TransportRejected {
            status: None,
            detail: detail.into(),
        }
    }

    /// Short name of the failure kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            DeliveryError::ConfigurationMissing(_) => "configuration_missing",
            DeliveryError::TransportRejected { .. } => "transport_rejected",
            DeliveryError::Unreachable(_) => "unreachable",
        }
    }

    /// Diagnostic text without the kind prefix.
    pub fn detail(&self) -> String {
        match self {
            DeliveryError::ConfigurationMissing(keys) => {
                format!("missing settings: {}", keys.join(", "))
            }
            DeliveryError::TransportRejected { detail, .. } => detail.clone(),
            DeliveryError::Unreachable(detail) => detail.clone(),
        }
    }
}

/// Collects required settings and reports every absent one at once.
#[derive(Debug, Default)]
pub(crate) struct RequiredSettings {
    missing: Vec<&'static str>,
}

impl RequiredSettings {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record `key` as missing when `value` is absent or blank.
    pub(crate) fn take<'a>(&mut self, key: &'static str, value: Option<&'a str>) -> &'a str {
        match value.filter(|v| !v.trim().is_empty()) {
            Some(v) => v,
            None => {
                self.missing.push(key);
                ""
            }
        }
    }

    pub(crate) fn finish(self) -> Result<(), DeliveryError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(DeliveryError::ConfigurationMissing(self.missing))
        }
    }
}
