//! Response envelopes of the coupon API and their decoding.
//!
//! Every response body is one of:
//!
//! - a success envelope: `{"data": ..., "message": "...", "code": 200}`
//!   (list responses carry `paging` instead of `code`)
//! - an error envelope: `{"error": "...", "code": 404}`
//!
//! The service sends application errors with HTTP 200 and internal errors with
//! HTTP 500, so the error envelope is checked before the status.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_with::{DefaultOnNull, serde_as};

use super::pagination::Paging;
use crate::error::ApiError;

/// Success envelope for single-object responses.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: i64,
}

/// Success envelope for responses whose `data` is not used (delete, ping).
#[derive(Debug, Deserialize)]
pub struct AckResponse {
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub message: String,
}

/// Success envelope for list responses.
#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct PaginatedResponse<T> {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    pub paging: Paging,
    #[serde(default)]
    pub message: String,
}

/// Error envelope.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default)]
    pub code: Option<i64>,
}

/// Decodes a response body into `T`, recognizing the error envelope first.
///
/// # Errors
///
/// - [`ApiError::Rejected`] if the body is an error envelope (any status)
/// - [`ApiError::Status`] if the status is not 2xx and the body is not an envelope
/// - [`ApiError::Decode`] if a 2xx body does not match `T`
pub fn decode_envelope<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T, ApiError> {
    let success = (200..300).contains(&status);

    let value: Value = match serde_json::from_slice(body) {
        Ok(v) => v,
        Err(_) if !success => return Err(ApiError::Status { status }),
        Err(e) => return Err(ApiError::Decode(e)),
    };

    if value.get("error").is_some_and(Value::is_string) {
        let envelope: ErrorResponse = serde_json::from_value(value)?;
        let code = envelope.code.unwrap_or(i64::from(status));
        return Err(ApiError::rejected(envelope.error, code));
    }

    if !success {
        return Err(ApiError::Status { status });
    }

    Ok(serde_json::from_value(value)?)
}
