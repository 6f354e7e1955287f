//! Configuration module for the contact relay.
//!
//! Configuration is read once at startup from an optional TOML file and then
//! overridden from the process environment. The resulting [`Config`] is
//! immutable; request handling never consults the environment.

use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::{RelayError, Result};

/// A credential value that never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    /// Wrap a credential.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the raw credential. Only transports should call this.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Whether to serve the static frontend.
    #[serde(default = "default_serve_static")]
    pub serve_static: bool,
    /// Path to the static files directory.
    #[serde(default = "default_static_path")]
    pub static_path: String,
    /// CORS allowed origins. Empty means any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Include delivery diagnostics in 500 responses.
    #[serde(default)]
    pub expose_error_details: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5001
}

fn default_serve_static() -> bool {
    true
}

fn default_static_path() -> String {
    "static".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            serve_static: default_serve_static(),
            static_path: default_static_path(),
            cors_origins: vec![],
            expose_error_details: false,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Optional log file, written in addition to stdout.
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Which delivery mechanism the process uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    /// Brevo transactional email API.
    #[default]
    Brevo,
    /// Generic bearer-token HTTP email API.
    HttpApi,
    /// Direct SMTP with STARTTLS and credentials.
    Smtp,
}

impl FromStr for TransportKind {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "brevo" => Ok(TransportKind::Brevo),
            "http_api" | "http-api" | "http" => Ok(TransportKind::HttpApi),
            "smtp" => Ok(TransportKind::Smtp),
            other => Err(RelayError::Config(format!(
                "unknown mail transport: {other} (expected brevo, http_api or smtp)"
            ))),
        }
    }
}

/// Brevo transactional API settings.
#[derive(Debug, Clone, Deserialize)]
pub struct BrevoConfig {
    /// API key sent in the `api-key` header.
    #[serde(default)]
    pub api_key: Option<Secret>,
    /// Transactional email endpoint.
    #[serde(default = "default_brevo_endpoint")]
    pub endpoint: String,
}

fn default_brevo_endpoint() -> String {
    "https://api.brevo.com/v3/smtp/email".to_string()
}

impl Default for BrevoConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_brevo_endpoint(),
        }
    }
}

/// Generic HTTP email API settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpApiConfig {
    /// Endpoint receiving the JSON `POST`.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Bearer token.
    #[serde(default)]
    pub token: Option<Secret>,
}

/// SMTP settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    /// Server hostname.
    #[serde(default)]
    pub host: Option<String>,
    /// Submission port (STARTTLS).
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    /// Login name.
    #[serde(default)]
    pub username: Option<String>,
    /// Login password.
    #[serde(default)]
    pub password: Option<Secret>,
}

fn default_smtp_port() -> u16 {
    587
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: default_smtp_port(),
            username: None,
            password: None,
        }
    }
}

/// Outbound mail configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    /// Selected delivery mechanism.
    #[serde(default)]
    pub transport: TransportKind,
    /// Verified sender address.
    #[serde(default)]
    pub sender_email: Option<String>,
    /// Display name shown on outgoing mail.
    #[serde(default = "default_sender_name")]
    pub sender_name: String,
    /// Where contact messages are delivered.
    #[serde(default)]
    pub recipient_email: Option<String>,
    /// Leading part of the outgoing subject line.
    #[serde(default = "default_subject_prefix")]
    pub subject_prefix: String,
    /// Subject used when the submission has none.
    #[serde(default = "default_subject")]
    pub default_subject: String,
    /// Upper bound for one delivery attempt, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Brevo settings.
    #[serde(default)]
    pub brevo: BrevoConfig,
    /// Generic HTTP API settings.
    #[serde(default)]
    pub http_api: HttpApiConfig,
    /// SMTP settings.
    #[serde(default)]
    pub smtp: SmtpConfig,
}

fn default_sender_name() -> String {
    "Contact Form".to_string()
}

fn default_subject_prefix() -> String {
    "New Contact Form Message".to_string()
}

fn default_subject() -> String {
    "No Subject".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            transport: TransportKind::default(),
            sender_email: None,
            sender_name: default_sender_name(),
            recipient_email: None,
            subject_prefix: default_subject_prefix(),
            default_subject: default_subject(),
            timeout_secs: default_timeout(),
            brevo: BrevoConfig::default(),
            http_api: HttpApiConfig::default(),
            smtp: SmtpConfig::default(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Outbound mail configuration.
    #[serde(default)]
    pub mail: MailConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(RelayError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file, using defaults when the file
    /// does not exist. Any other read or parse failure is returned.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        match Self::load(path) {
            Err(RelayError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| RelayError::Config(format!("config parse error: {e}")))
    }

    /// Apply overrides from the process environment.
    ///
    /// Supported environment variables:
    /// - `MAIL_TRANSPORT`: `brevo`, `http_api` or `smtp`
    /// - `SENDER_EMAIL`, `SENDER_NAME`, `RECIPIENT_EMAIL`
    /// - `BREVO_API_KEY`
    /// - `MAIL_API_URL`, `MAIL_API_TOKEN`
    /// - `SMTP_HOST`, `SMTP_PORT`, `SMTP_USERNAME`, `SMTP_PASSWORD`
    /// - `PORT`, `STATIC_DIR`
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup. Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(kind) = get("MAIL_TRANSPORT") {
            self.mail.transport = kind.parse()?;
        }
        if let Some(v) = get("SENDER_EMAIL") {
            self.mail.sender_email = Some(v);
        }
        if let Some(v) = get("SENDER_NAME") {
            self.mail.sender_name = v;
        }
        if let Some(v) = get("RECIPIENT_EMAIL") {
            self.mail.recipient_email = Some(v);
        }
        if let Some(v) = get("BREVO_API_KEY") {
            self.mail.brevo.api_key = Some(Secret::new(v));
        }
        if let Some(v) = get("MAIL_API_URL") {
            self.mail.http_api.endpoint = Some(v);
        }
        if let Some(v) = get("MAIL_API_TOKEN") {
            self.mail.http_api.token = Some(Secret::new(v));
        }
        if let Some(v) = get("SMTP_HOST") {
            self.mail.smtp.host = Some(v);
        }
        if let Some(v) = get("SMTP_PORT") {
            self.mail.smtp.port = v
                .trim()
                .parse()
                .map_err(|_| RelayError::Config(format!("invalid SMTP_PORT: {v}")))?;
        }
        if let Some(v) = get("SMTP_USERNAME") {
            self.mail.smtp.username = Some(v);
        }
        if let Some(v) = get("SMTP_PASSWORD") {
            self.mail.smtp.password = Some(Secret::new(v));
        }
        if let Some(v) = get("PORT") {
            self.server.port = v
                .trim()
                .parse()
                .map_err(|_| RelayError::Config(format!("invalid PORT: {v}")))?;
        }
        if let Some(v) = get("STATIC_DIR") {
            self.server.static_path = v;
        }
        Ok(())
    }

    /// Validate the configuration.
    ///
    /// Missing credentials and addresses are not checked here; they are
    /// reported by the transport when a message is delivered.
    pub fn validate(&self) -> Result<()> {
        if self.mail.timeout_secs == 0 {
            return Err(RelayError::Config(
                "mail.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.server.serve_static && self.server.static_path.trim().is_empty() {
            return Err(RelayError::Config(
                "server.serve_static is enabled but server.static_path is empty".to_string(),
            ));
        }
        if self.mail.smtp.port == 0 {
            return Err(RelayError::Config("mail.smtp.port must not be 0".to_string()));
        }
        Ok(())
    }
}
