//! Validation utilities for Web API DTOs.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};

use super::ContactRequest;
use crate::contact::Submission;
use crate::web::error::ApiError;

/// A JSON extractor that yields a validated [`Submission`].
///
/// A missing body, malformed JSON and absent or blank required fields all
/// produce the same 400 reply, so the handler never sees an incomplete form.
///
/// # Example
///
/// ```ignore
/// async fn submit(ContactJson(submission): ContactJson) -> impl IntoResponse {
///     // submission.name(), .email() and .message() are non-empty
/// }
/// ```
pub struct ContactJson(pub Submission);

#[async_trait]
impl<S> FromRequest<S> for ContactJson
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(request) = Json::<ContactRequest>::from_request(req, state)
            .await
            .map_err(|e: JsonRejection| {
                tracing::debug!("Rejected contact body: {}", e.body_text());
                ApiError::missing_fields()
            })?;

        let submission = request.into_submission().map_err(|errors| {
            let mut fields: Vec<String> = errors
                .field_errors()
                .keys()
                .map(|k| k.to_string())
                .collect();
            fields.sort();
            tracing::debug!(fields = ?fields, "Rejected incomplete contact submission");
            ApiError::missing_fields()
        })?;

        Ok(ContactJson(submission))
    }
}

/// Validate that a string is not empty after trimming whitespace.
pub fn not_empty_trimmed(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("not_empty_trimmed")
            .with_message("Must not be empty".into()));
    }
    Ok(())
}
