use stripe_subitem_types::FormError;
use thiserror::Error;

use crate::response::ApiError;

/// Errors that can occur while building requests or decoding responses
#[derive(Error, Debug)]
pub enum StripeError {
    /// Parameters could not be form-encoded
    #[error("Form encoding error: {0}")]
    Form(#[from] FormError),

    /// The configured API base does not form a valid URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Response body could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An empty id cannot address a resource
    #[error("Invalid {resource} id: {id:?}")]
    InvalidId { resource: &'static str, id: String },

    /// Error envelope returned by the API
    #[error("Stripe API error ({status}): {error}")]
    Api { status: u16, error: ApiError },

    /// Non-success status without a decodable error envelope
    #[error("Unexpected HTTP status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, StripeError>;
