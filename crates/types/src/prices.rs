//! Price and plan resources referenced by subscription items.

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{StripeObject, deserialize_metadata};

/// Recurring interval for prices and plans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurringInterval {
    Day,
    Week,
    Month,
    Year,
}

impl RecurringInterval {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "day" => Some(RecurringInterval::Day),
            "week" => Some(RecurringInterval::Week),
            "month" => Some(RecurringInterval::Month),
            "year" => Some(RecurringInterval::Year),
            _ => None,
        }
    }

    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurringInterval::Day => "day",
            RecurringInterval::Week => "week",
            RecurringInterval::Month => "month",
            RecurringInterval::Year => "year",
        }
    }
}

/// Recurring configuration of a price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recurring {
    pub interval: RecurringInterval,
    pub interval_count: i64,
    /// "licensed" or "metered"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_type: Option<String>,
}

/// Stripe price resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub id: String,
    #[serde(default = "Price::object_name")]
    pub object: String,
    #[serde(default)]
    pub active: bool,
    /// Three-letter ISO currency code, lowercase
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub product: Option<String>,
    /// "one_time" or "recurring"
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub pricing_type: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub recurring: Option<Recurring>,
    /// Amount in the smallest currency unit
    #[serde(default)]
    pub unit_amount: Option<i64>,
    /// Same as `unit_amount` with up to 12 decimal places, exchanged as a string
    #[serde(default)]
    pub unit_amount_decimal: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_metadata")]
    pub metadata: IndexMap<String, String>,
    #[serde(default)]
    pub created: i64,
    #[serde(default)]
    pub livemode: bool,
}

impl Price {
    fn object_name() -> String {
        Self::OBJECT.to_string()
    }
}

impl StripeObject for Price {
    const OBJECT: &'static str = "price";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Legacy plan resource, still attached to older subscription items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    #[serde(default = "Plan::object_name")]
    pub object: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub amount_decimal: Option<Decimal>,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub interval: Option<RecurringInterval>,
    #[serde(default = "Plan::default_interval_count")]
    pub interval_count: i64,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_metadata")]
    pub metadata: IndexMap<String, String>,
    #[serde(default)]
    pub created: i64,
    #[serde(default)]
    pub livemode: bool,
}

impl Plan {
    fn object_name() -> String {
        Self::OBJECT.to_string()
    }

    fn default_interval_count() -> i64 {
        1
    }
}

impl StripeObject for Plan {
    const OBJECT: &'static str = "plan";

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Expandable;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_recurring_interval_from_str() {
        assert_eq!(
            RecurringInterval::from_str("Month"),
            Some(RecurringInterval::Month)
        );
        assert_eq!(RecurringInterval::from_str("fortnight"), None);
        assert_eq!(RecurringInterval::Year.as_str(), "year");
    }

    #[test]
    fn test_price_decimal_is_exact() {
        let price: Price = serde_json::from_value(json!({
            "id": "price_1",
            "object": "price",
            "active": true,
            "currency": "usd",
            "product": "prod_1",
            "type": "recurring",
            "nickname": null,
            "recurring": {"interval": "month", "interval_count": 1, "usage_type": "licensed"},
            "unit_amount": 1999,
            "unit_amount_decimal": "1999.125",
            "metadata": {},
            "created": 1700000000,
            "livemode": false
        }))
        .unwrap();

        assert_eq!(price.unit_amount_decimal, Some(dec!(1999.125)));
        assert_eq!(
            price.recurring.as_ref().map(|r| r.interval),
            Some(RecurringInterval::Month)
        );

        let value = serde_json::to_value(&price).unwrap();
        assert_eq!(value["unit_amount_decimal"], "1999.125");
        assert_eq!(value["type"], "recurring");
    }

    #[test]
    fn test_plan_defaults() {
        let plan: Plan = serde_json::from_value(json!({
            "id": "plan_gold",
            "currency": "eur",
            "interval": "year",
            "amount": 5000,
            "metadata": {"tier": 3}
        }))
        .unwrap();

        assert_eq!(plan.object, "plan");
        assert_eq!(plan.interval_count, 1);
        assert_eq!(plan.amount_decimal, None);
        assert_eq!(plan.interval, Some(RecurringInterval::Year));
        assert_eq!(plan.metadata.get("tier").map(String::as_str), Some("3"));
    }

    #[test]
    fn test_partial_expanded_plan() {
        let plan: Expandable<Plan> = serde_json::from_value(json!({
            "id": "plan_legacy",
            "object": "plan",
            "amount": 900
        }))
        .unwrap();

        let plan = plan.as_object().unwrap();
        assert_eq!(plan.id, "plan_legacy");
        assert_eq!(plan.currency, "");
        assert_eq!(plan.interval, None);
        assert_eq!(plan.amount, Some(900));

        let price: Expandable<Price> =
            serde_json::from_value(json!({"id": "price_1", "unit_amount": 500})).unwrap();
        assert!(price.is_object());
        assert_eq!(price.id(), "price_1");
    }
}
