//! Brevo transactional email API transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::{BrevoConfig, Secret};
use crate::mail::error::RequiredSettings;
use crate::mail::transport::{diagnostic, http_client, send_error};
use crate::mail::{Ack, DeliveryError, Envelope, Mailbox, MailTransport};
use crate::Result;

/// Sends mail through Brevo's "send transactional email" operation.
pub struct BrevoTransport {
    client: Client,
    endpoint: String,
    api_key: Option<Secret>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendSmtpEmail<'a> {
    sender: Contact<'a>,
    to: Vec<Contact<'a>>,
    reply_to: Contact<'a>,
    subject: &'a str,
    html_content: &'a str,
}

impl<'a> SendSmtpEmail<'a> {
    fn from_envelope(envelope: &'a Envelope) -> Self {
        Self {
            sender: Contact::from(&envelope.from),
            to: vec![Contact::from(&envelope.to)],
            reply_to: Contact::from(&envelope.reply_to),
            subject: &envelope.subject,
            html_content: &envelope.body.html,
        }
    }
}

#[derive(Debug, Serialize)]
struct Contact<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

impl<'a> From<&'a Mailbox> for Contact<'a> {
    fn from(mailbox: &'a Mailbox) -> Self {
        Self {
            email: &mailbox.email,
            name: mailbox.name.as_deref(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateSmtpEmail {
    message_id: Option<String>,
}

impl BrevoTransport {
    /// Create a transport from configuration.
    pub fn new(config: &BrevoConfig, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl MailTransport for BrevoTransport {
    fn name(&self) -> &'static str {
        "brevo"
    }

    async fn deliver(&self, envelope: Envelope) -> std::result::Result<Ack, DeliveryError> {
        let mut required = RequiredSettings::new();
        let api_key = required.take("BREVO_API_KEY", self.api_key.as_ref().map(Secret::expose));
        let endpoint = required.take("mail.brevo.endpoint", Some(self.endpoint.as_str()));
        required.finish()?;

        let payload = SendSmtpEmail::from_envelope(&envelope);

        let response = self
            .client
            .post(endpoint)
            .header("api-key", api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(send_error)?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(DeliveryError::TransportRejected {
                status: Some(status.as_u16()),
                detail: diagnostic(&body),
            });
        }

        let message_id = serde_json::from_str::<CreateSmtpEmail>(&body)
            .ok()
            .and_then(|created| created.message_id);
        Ok(Ack { message_id })
    }
}
