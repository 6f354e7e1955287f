//! Contact form handler.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::mail::DeliveryError;
use crate::web::dto::{ContactJson, MessageResponse};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// POST /api/contact - Relay a contact form submission by email.
///
/// Validation happens in the [`ContactJson`] extractor; an incomplete form is
/// answered with 400 before this function runs.
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    ContactJson(submission): ContactJson,
) -> Result<Json<MessageResponse>, ApiError> {
    let transport = state.transport.name();

    let envelope = state
        .composer
        .compose(&submission)
        .map_err(|e| delivery_failed(&state, transport, e))?;

    let ack = state
        .transport
        .deliver(envelope)
        .await
        .map_err(|e| delivery_failed(&state, transport, e))?;

    tracing::info!(
        transport,
        message_id = ack.message_id.as_deref().unwrap_or("-"),
        "Contact message delivered"
    );

    Ok(Json(MessageResponse::sent()))
}

fn delivery_failed(state: &AppState, transport: &str, err: DeliveryError) -> ApiError {
    match &err {
        DeliveryError::ConfigurationMissing(_) => {
            tracing::error!(transport, kind = err.kind(), "Mail settings incomplete: {}", err);
        }
        _ => {
            tracing::error!(transport, kind = err.kind(), "Contact delivery failed: {}", err);
        }
    }
    ApiError::from_delivery(&err, state.expose_error_details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MailConfig;
    use crate::contact::ContactComposer;
    use crate::mail::MemoryTransport;
    use crate::web::dto::SENT_MESSAGE;
    use crate::web::error::{ErrorCode, DELIVERY_FAILED_MESSAGE, SERVER_CONFIGURATION_MESSAGE};

    fn composer() -> ContactComposer {
        ContactComposer::from_config(&MailConfig {
            sender_email: Some("site@example.com".to_string()),
            recipient_email: Some("me@example.com".to_string()),
            ..MailConfig::default()
        })
    }

    fn submission() -> crate::contact::Submission {
        crate::contact::Submission::new(
            "Ada".to_string(),
            "ada@example.com".to_string(),
            None,
            "Hello".to_string(),
        )
    }

    #[tokio::test]
    async fn test_submit_contact_success() {
        let transport = MemoryTransport::new();
        let state = Arc::new(AppState::new(Arc::new(transport.clone()), composer()));

        let Json(response) = submit_contact(State(state), ContactJson(submission()))
            .await
            .unwrap();

        assert_eq!(response.message, SENT_MESSAGE);
        let sent = transport.sent_messages().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].reply_to.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_submit_contact_transport_failure() {
        let transport = MemoryTransport::failing(DeliveryError::rejected("bad key"));
        let state = Arc::new(AppState::new(Arc::new(transport), composer()));

        let err = submit_contact(State(state), ContactJson(submission()))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.message(), DELIVERY_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_submit_contact_missing_recipient_skips_transport() {
        let transport = MemoryTransport::new();
        let composer = ContactComposer::from_config(&MailConfig {
            sender_email: Some("site@example.com".to_string()),
            ..MailConfig::default()
        });
        let state = Arc::new(AppState::new(Arc::new(transport.clone()), composer));

        let err = submit_contact(State(state), ContactJson(submission()))
            .await
            .unwrap_err();

        assert_eq!(err.message(), SERVER_CONFIGURATION_MESSAGE);
        assert_eq!(transport.attempts().await, 0);
    }
}
