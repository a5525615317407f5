//! Error types shared by the REST client, services and controllers.
//!
//! Two classes of failure come back from the coupon API:
//!
//! - **Transport failures**: network errors, timeouts, unexpected statuses and
//!   bodies that cannot be decoded.
//! - **Rejections**: well-formed error envelopes (`{"error": "...", "code": n}`),
//!   which the service may send with HTTP 200.
//!
//! Callers that only need a line of text for the user go through
//! [`ApiError::user_message`].

use validator::ValidationErrors;

/// Errors returned by calls to the coupon API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request timed out")]
    Timeout,

    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Unexpected HTTP status {status}")]
    Status { status: u16 },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{message}")]
    Rejected { message: String, code: i64 },

    #[error("Invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(e)
        }
    }
}

impl ApiError {
    /// Builds a rejection from an error envelope.
    pub fn rejected(message: impl Into<String>, code: i64) -> Self {
        Self::Rejected {
            message: message.into(),
            code,
        }
    }

    /// Returns true when the service answered with an error envelope.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// Returns the message to show the user.
    ///
    /// Rejections carry a message written by the service and are shown as-is.
    /// Everything else collapses into `fallback`, which names the operation
    /// that failed (e.g. "Failed to fetch coupons").
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Rejected { message, .. } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Errors from submitting a coupon form.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Invalid coupon: {0}")]
    Invalid(#[from] ValidationErrors),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl SubmitError {
    /// Flattens the error into one line for display.
    pub fn user_message(&self) -> String {
        match self {
            Self::Invalid(errors) => describe_validation(errors),
            Self::Api(e) => e.user_message("Failed to save coupon"),
        }
    }
}

/// Renders field errors as `field: message; field: message`, sorted by field.
pub fn describe_validation(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{field}: {message}")
            })
        })
        .collect();
    parts.sort();
    parts.join("; ")
}
