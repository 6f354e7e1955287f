//! Validated contact form payload.

/// A contact form submission whose `name`, `email` and `message` are known
/// to be non-empty. `name` and `email` are stored trimmed; the message is
/// kept as submitted.
///
/// Only the request extractor constructs these, after validation, so an
/// envelope can never be built from an incomplete form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    name: String,
    email: String,
    subject: Option<String>,
    message: String,
}

impl Submission {
    pub(crate) fn new(
        name: String,
        email: String,
        subject: Option<String>,
        message: String,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            subject: subject.filter(|s| !s.trim().is_empty()),
            message,
        }
    }

    /// Submitter's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Submitter's email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Subject, if the submitter gave one.
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Message text as submitted.
    pub fn message(&self) -> &str {
        &self.message
    }
}
