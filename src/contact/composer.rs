//! Envelope assembly.

use crate::config::MailConfig;
use crate::mail::{DeliveryError, Envelope, Mailbox, MessageBody, RequiredSettings};

use super::{render_html, render_text, Submission};

/// Builds envelopes from submissions using the configured addresses.
///
/// Built once at startup; the addresses never change afterwards.
#[derive(Debug, Clone)]
pub struct ContactComposer {
    sender_email: Option<String>,
    sender_name: String,
    recipient_email: Option<String>,
    subject_prefix: String,
    default_subject: String,
}

impl ContactComposer {
    /// Capture the address settings from configuration.
    pub fn from_config(config: &MailConfig) -> Self {
        Self {
            sender_email: config.sender_email.clone(),
            sender_name: config.sender_name.clone(),
            recipient_email: config.recipient_email.clone(),
            subject_prefix: config.subject_prefix.clone(),
            default_subject: config.default_subject.clone(),
        }
    }

    /// Subject line for a submission.
    pub fn subject_for(&self, submission: &Submission) -> String {
        let subject = submission.subject().unwrap_or(&self.default_subject);
        format!("{} from {}: {}", self.subject_prefix, submission.name(), subject)
    }

    /// Build the envelope for `submission`.
    ///
    /// Fails with [`DeliveryError::ConfigurationMissing`] when the sender or
    /// recipient address is not configured.
    pub fn compose(&self, submission: &Submission) -> Result<Envelope, DeliveryError> {
        let mut required = RequiredSettings::new();
        let recipient = required.take("RECIPIENT_EMAIL", self.recipient_email.as_deref());
        let sender = required.take("SENDER_EMAIL", self.sender_email.as_deref());
        required.finish()?;

        Ok(Envelope {
            from: Mailbox::named(self.sender_name.as_str(), sender),
            to: Mailbox::new(recipient),
            reply_to: Mailbox::named(submission.name(), submission.email()),
            subject: self.subject_for(submission),
            body: MessageBody {
                text: render_text(submission),
                html: render_html(submission),
            },
        })
    }
}
