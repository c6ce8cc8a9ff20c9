//! Stripe subscription item types.
//!
//! Request parameters serialize to Stripe's form encoding through the
//! [`form`] module; resources deserialize from the JSON bodies returned by
//! the API.
//!
//! ```
//! use stripe_subitem_types::{SubscriptionItemParams, form};
//!
//! let params = SubscriptionItemParams {
//!     subscription: Some("sub_123".to_string()),
//!     price: Some("price_456".to_string()),
//!     quantity: Some(2),
//!     ..Default::default()
//! };
//! let body = form::to_string(&params).unwrap();
//! assert_eq!(body, "price=price_456&quantity=2&subscription=sub_123");
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

pub mod common;
pub mod form;
pub mod prices;
pub mod subscription_items;
pub mod tax_rates;

pub use common::{Expandable, List, ListMeta, ListParams, Params, StripeObject};
pub use form::FormError;
pub use prices::{Plan, Price, Recurring, RecurringInterval};
pub use subscription_items::{
    PaymentBehavior, ProrationBehavior, SubscriptionItem, SubscriptionItemBillingThresholds,
    SubscriptionItemBillingThresholdsParams, SubscriptionItemList, SubscriptionItemListParams,
    SubscriptionItemParams, SubscriptionItemPriceDataParams,
    SubscriptionItemPriceDataRecurringParams,
};
pub use tax_rates::TaxRate;

/// Custom deserialization for resource metadata.
///
/// Stripe only stores strings, but Stripe-compatible servers sometimes send
/// numbers or nested JSON. Non-string values are kept as compact JSON text
/// and a `null` map is read as empty.
pub(crate) fn deserialize_metadata<'de, D>(
    deserializer: D,
) -> Result<IndexMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let parsed: Option<IndexMap<String, JsonValue>> = Option::deserialize(deserializer)?;

    let result = parsed
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| {
            let string_value = match value {
                JsonValue::String(s) => s,
                _ => serde_json::to_string(&value).map_err(|e| {
                    D::Error::custom(format!("Failed to serialize metadata value: {}", e))
                })?,
            };
            Ok((key, string_value))
        })
        .collect::<Result<IndexMap<String, String>, D::Error>>()?;

    Ok(result)
}
