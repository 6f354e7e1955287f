//! Generic bearer-token HTTP email API transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;

use crate::config::{HttpApiConfig, Secret};
use crate::mail::error::RequiredSettings;
use crate::mail::transport::{diagnostic, http_client, send_error};
use crate::mail::{Ack, DeliveryError, Envelope, MailTransport};
use crate::Result;

/// Posts a JSON message to a configured endpoint with a bearer token.
///
/// Only `200 OK` counts as accepted; any other status is a rejection and the
/// response body is kept as the diagnostic.
pub struct HttpApiTransport {
    client: Client,
    endpoint: Option<String>,
    token: Option<Secret>,
}

#[derive(Debug, Serialize)]
struct ApiMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    body: &'a str,
    reply_to: &'a str,
}

impl<'a> ApiMessage<'a> {
    fn from_envelope(envelope: &'a Envelope) -> Self {
        Self {
            from: &envelope.from.email,
            to: &envelope.to.email,
            subject: &envelope.subject,
            body: &envelope.body.text,
            reply_to: &envelope.reply_to.email,
        }
    }
}

impl HttpApiTransport {
    /// Create a transport from configuration.
    pub fn new(config: &HttpApiConfig, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            endpoint: config.endpoint.clone(),
            token: config.token.clone(),
        })
    }
}

#[async_trait]
impl MailTransport for HttpApiTransport {
    fn name(&self) -> &'static str {
        "http_api"
    }

    async fn deliver(&self, envelope: Envelope) -> std::result::Result<Ack, DeliveryError> {
        let mut required = RequiredSettings::new();
        let endpoint = required.take("MAIL_API_URL", self.endpoint.as_deref());
        let token = required.take("MAIL_API_TOKEN", self.token.as_ref().map(Secret::expose));
        required.finish()?;

        let response = self
            .client
            .post(endpoint)
            .bearer_auth(token)
            .json(&ApiMessage::from_envelope(&envelope))
            .send()
            .await
            .map_err(send_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::TransportRejected {
                status: Some(status.as_u16()),
                detail: diagnostic(&body),
            });
        }

        Ok(Ack::accepted())
    }
}
