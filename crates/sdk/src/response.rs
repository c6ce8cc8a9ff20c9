//! Decoding of API responses into resources or errors.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::error::{Result, StripeError};

/// Error object returned by the API on non-success statuses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// e.g. "invalid_request_error", "card_error", "idempotency_error"
    #[serde(rename = "type")]
    pub error_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Parameter the error relates to, in wire notation (e.g. "price_data[currency]")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_url: Option<String>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {}", self.error_type, message),
            None => write!(f, "{}", self.error_type),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

/// Decode a response body.
///
/// 2xx bodies become `T`; other statuses become [`StripeError::Api`] when
/// the body carries an error envelope, [`StripeError::UnexpectedStatus`]
/// otherwise.
pub fn decode<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T> {
    if (200..300).contains(&status) {
        debug!(status, bytes = body.len(), "Decoding response body");
        return Ok(serde_json::from_slice(body)?);
    }

    match serde_json::from_slice::<ErrorEnvelope>(body) {
        Ok(envelope) => {
            warn!(
                status,
                error_type = %envelope.error.error_type,
                param = ?envelope.error.param,
                "API returned an error"
            );
            Err(StripeError::Api {
                status,
                error: envelope.error,
            })
        }
        Err(_) => Err(StripeError::UnexpectedStatus {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
        }),
    }
}
