//! Direct SMTP transport.
//!
//! Each delivery opens one session: connect, STARTTLS, AUTH, send, close.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::{Secret, SmtpConfig};
use crate::mail::error::RequiredSettings;
use crate::mail::{Ack, DeliveryError, Envelope, Mailbox, MailTransport};

/// Sends mail over SMTP with STARTTLS and login credentials.
pub struct SmtpTransport {
    host: Option<String>,
    port: u16,
    username: Option<String>,
    password: Option<Secret>,
    timeout: Duration,
}

impl SmtpTransport {
    /// Create a transport from configuration. No connection is made here.
    pub fn new(config: &SmtpConfig, timeout: Duration) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            username: config.username.clone(),
            password: config.password.clone(),
            timeout,
        }
    }
}

fn mailbox(role: &str, mailbox: &Mailbox) -> Result<lettre::message::Mailbox, DeliveryError> {
    let address: Address = mailbox
        .email
        .parse()
        .map_err(|e| DeliveryError::rejected(format!("invalid {role} address: {e}")))?;
    Ok(lettre::message::Mailbox::new(mailbox.name.clone(), address))
}

/// Build the plain-text message with Subject, From, To and Reply-To headers.
///
/// The submitter's address is not re-validated: when it is not a valid
/// mailbox the message goes out without a Reply-To header.
fn build_message(envelope: &Envelope) -> Result<Message, DeliveryError> {
    let mut builder = Message::builder()
        .from(mailbox("sender", &envelope.from)?)
        .to(mailbox("recipient", &envelope.to)?);

    match mailbox("reply-to", &envelope.reply_to) {
        Ok(reply_to) => builder = builder.reply_to(reply_to),
        Err(e) => tracing::warn!("Sending without Reply-To: {}", e.detail()),
    }

    builder
        .subject(envelope.subject.clone())
        .header(ContentType::TEXT_PLAIN)
        .body(envelope.body.text.clone())
        .map_err(|e| DeliveryError::rejected(format!("failed to build message: {e}")))
}

/// Failures once the server has answered are rejections; the rest means the
/// server was never reached.
fn smtp_error(err: lettre::transport::smtp::Error) -> DeliveryError {
    if err.is_permanent()
        || err.is_transient()
        || err.is_response()
        || err.is_client()
        || err.is_tls()
    {
        DeliveryError::rejected(err.to_string())
    } else {
        DeliveryError::Unreachable(err.to_string())
    }
}

#[async_trait]
impl MailTransport for SmtpTransport {
    fn name(&self) -> &'static str {
        "smtp"
    }

    async fn deliver(&self, envelope: Envelope) -> std::result::Result<Ack, DeliveryError> {
        let mut required = RequiredSettings::new();
        let host = required.take("SMTP_HOST", self.host.as_deref());
        let username = required.take("SMTP_USERNAME", self.username.as_deref());
        let password = required.take("SMTP_PASSWORD", self.password.as_ref().map(Secret::expose));
        required.finish()?;

        let message = build_message(&envelope)?;

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|e| DeliveryError::rejected(format!("invalid TLS parameters: {e}")))?
            .port(self.port)
            .credentials(Credentials::new(username.to_string(), password.to_string()))
            .timeout(Some(self.timeout))
            .build();

        let response = mailer.send(message).await.map_err(smtp_error)?;
        tracing::debug!(code = %response.code(), "SMTP server accepted message");

        Ok(Ack::accepted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::MessageBody;

    fn envelope() -> Envelope {
        Envelope {
            from: Mailbox::named("Contact Form", "site@example.com"),
            to: Mailbox::new("me@example.com"),
            reply_to: Mailbox::named("Ada", "ada@example.com"),
            subject: "New Contact Form Message from Ada: Hi".to_string(),
            body: MessageBody {
                text: "Hello".to_string(),
                html: "<p>Hello</p>".to_string(),
            },
        }
    }

    fn header_line<'a>(formatted: &'a str, name: &str) -> &'a str {
        formatted
            .lines()
            .find(|line| line.starts_with(name))
            .unwrap_or_default()
    }

    #[test]
    fn test_build_message_headers() {
        let message = build_message(&envelope()).unwrap();
        let formatted = String::from_utf8(message.formatted()).unwrap();

        assert!(header_line(&formatted, "From:").contains("site@example.com"));
        assert!(header_line(&formatted, "To:").contains("me@example.com"));
        assert!(header_line(&formatted, "Reply-To:").contains("ada@example.com"));
        assert!(header_line(&formatted, "Subject:").contains("from Ada: Hi"));
        assert!(header_line(&formatted, "Content-Type:").contains("text/plain"));
        assert!(formatted.contains("\r\n\r\nHello"));
    }

    #[test]
    fn test_build_message_invalid_reply_to_is_dropped() {
        for address in [" ada@example.com", "ada@example.com ", "ada at example"] {
            let mut envelope = envelope();
            envelope.reply_to = Mailbox::named("Ada", address);

            let message = build_message(&envelope).unwrap();
            let formatted = String::from_utf8(message.formatted()).unwrap();

            assert!(!formatted.contains("Reply-To:"), "address {address:?}");
            assert!(header_line(&formatted, "To:").contains("me@example.com"));
            assert!(formatted.contains("\r\n\r\nHello"));
        }
    }

    #[test]
    fn test_build_message_invalid_recipient() {
        let mut envelope = envelope();
        envelope.to = Mailbox::new("not an address");

        let err = build_message(&envelope).unwrap_err();
        assert!(matches!(err, DeliveryError::TransportRejected { .. }));
        assert!(err.detail().contains("recipient"));
    }

    #[tokio::test]
    async fn test_missing_credentials() {
        let transport = SmtpTransport::new(&SmtpConfig::default(), Duration::from_secs(1));

        let err = transport.deliver(envelope()).await.unwrap_err();
        assert_eq!(
            err,
            DeliveryError::ConfigurationMissing(vec![
                "SMTP_HOST",
                "SMTP_USERNAME",
                "SMTP_PASSWORD"
            ])
        );
    }

    #[tokio::test]
    async fn test_connection_refused_is_unreachable() {
        // Reserve a port, then close it so nothing is listening.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let config = SmtpConfig {
            host: Some("localhost".to_string()),
            port,
            username: Some("relay".to_string()),
            password: Some(Secret::new("pw")),
        };
        let transport = SmtpTransport::new(&config, Duration::from_secs(2));

        let err = transport.deliver(envelope()).await.unwrap_err();
        assert_eq!(err.kind(), "unreachable");
    }

    /// Accept one SMTP session, greet, and answer EHLO without offering
    /// STARTTLS.
    async fn serve_plain_smtp(listener: tokio::net::TcpListener) {
        use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

        let (stream, _) = listener.accept().await.unwrap();
        let (reader, mut writer) = stream.into_split();
        let mut lines = BufReader::new(reader).lines();

        writer.write_all(b"220 mail.test ESMTP ready\r\n").await.unwrap();
        while let Ok(Some(line)) = lines.next_line().await {
            let command = line.to_ascii_uppercase();
            let reply: &[u8] = if command.starts_with("EHLO") || command.starts_with("HELO") {
                b"250-mail.test\r\n250 AUTH PLAIN LOGIN\r\n"
            } else if command.starts_with("QUIT") {
                b"221 bye\r\n"
            } else {
                b"502 not implemented\r\n"
            };
            if writer.write_all(reply).await.is_err() || command.starts_with("QUIT") {
                break;
            }
        }
    }

    #[tokio::test]
    async fn test_server_without_starttls_is_rejected() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = tokio::spawn(serve_plain_smtp(listener));

        let config = SmtpConfig {
            host: Some("127.0.0.1".to_string()),
            port,
            username: Some("relay".to_string()),
            password: Some(Secret::new("pw")),
        };
        let transport = SmtpTransport::new(&config, Duration::from_secs(5));

        let err = transport.deliver(envelope()).await.unwrap_err();
        assert_eq!(err.kind(), "transport_rejected");

        server.abort();
    }
}
