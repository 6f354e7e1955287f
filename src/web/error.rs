//! API error handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::mail::DeliveryError;

/// Reply to an incomplete or unreadable submission.
pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields: name, email, and message.";

/// Reply when the mail system refused or could not be reached.
pub const DELIVERY_FAILED_MESSAGE: &str =
    "Sorry, there was a problem sending your message. Please try again later.";

/// Reply when the server lacks mail settings.
pub const SERVER_CONFIGURATION_MESSAGE: &str = "Server configuration error.";

/// API error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Bad request (400).
    BadRequest,
    /// Internal server error (500).
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
    /// Delivery diagnostic, only when the operator enabled it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
    details: Option<String>,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Create a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// Create an internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// The fixed reply for an incomplete submission.
    pub fn missing_fields() -> Self {
        Self::bad_request(MISSING_FIELDS_MESSAGE)
    }

    /// Map a delivery failure to a client reply.
    ///
    /// The client sees a generic message. The diagnostic is attached only
    /// when `expose_details` is set; credentials never appear in it.
    pub fn from_delivery(err: &DeliveryError, expose_details: bool) -> Self {
        let message = match err {
            DeliveryError::ConfigurationMissing(_) => SERVER_CONFIGURATION_MESSAGE,
            DeliveryError::TransportRejected { .. } | DeliveryError::Unreachable(_) => {
                DELIVERY_FAILED_MESSAGE
            }
        };
        let mut api_error = Self::internal(message);
        if expose_details {
            api_error.details = Some(err.detail());
        }
        api_error
    }

    /// Error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Client-facing message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();
        let body = ErrorBody {
            error: self.message,
            details: self.details,
        };
        (status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
