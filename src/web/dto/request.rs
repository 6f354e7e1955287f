//! Request DTOs for Web API.

use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use super::validation::not_empty_trimmed;
use crate::contact::Submission;

/// Contact form request body.
///
/// Every field is optional at the JSON level so that a missing field is a
/// validation failure rather than a decoding failure.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ContactRequest {
    /// Submitter's name.
    #[validate(required, custom(function = "not_empty_trimmed"))]
    pub name: Option<String>,
    /// Submitter's email address.
    #[validate(required, custom(function = "not_empty_trimmed"))]
    pub email: Option<String>,
    /// Subject (optional).
    #[serde(default)]
    pub subject: Option<String>,
    /// Message text.
    #[validate(required, custom(function = "not_empty_trimmed"))]
    pub message: Option<String>,
}

impl ContactRequest {
    /// Validate and convert into a [`Submission`].
    pub fn into_submission(self) -> Result<Submission, ValidationErrors> {
        self.validate()?;
        Ok(Submission::new(
            self.name.unwrap_or_default(),
            self.email.unwrap_or_default(),
            self.subject,
            self.message.unwrap_or_default(),
        ))
    }
}
