//! Stripe subscription item SDK
//!
//! This crate turns subscription item parameters into fully described HTTP
//! requests and decodes the API's responses. Sending the requests is left to
//! whichever HTTP client the application already uses.
//!
//! # Quick Start
//!
//! ```ignore
//! use stripe_subitem_sdk::{ApiConfig, SubscriptionItems, response};
//! use stripe_subitem_sdk::types::{SubscriptionItem, SubscriptionItemParams};
//!
//! let items = SubscriptionItems::new(ApiConfig::from_env());
//! let request = items.create(&SubscriptionItemParams {
//!     subscription: Some("sub_123".to_string()),
//!     price: Some("price_456".to_string()),
//!     quantity: Some(2),
//!     ..Default::default()
//! })?;
//!
//! // Send `request` with any HTTP client, then:
//! let item: SubscriptionItem = response::decode(status, &body)?;
//! ```

pub mod config;
pub mod error;
pub mod request;
pub mod response;
pub mod subscription_items;

pub use stripe_subitem_types as types;

// Re-export main types at crate root
pub use config::{ApiConfig, DEFAULT_API_BASE};
pub use error::{Result, StripeError};
pub use request::{ApiRequest, FORM_CONTENT_TYPE, Method};
pub use response::{ApiError, decode};
pub use subscription_items::{SUBSCRIPTION_ITEMS_PATH, SubscriptionItems};
