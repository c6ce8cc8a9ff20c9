use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{StripeObject, deserialize_metadata};

/// Stripe tax rate resource applied to a subscription item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRate {
    pub id: String,
    #[serde(default = "TaxRate::object_name")]
    pub object: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub created: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub display_name: String,
    /// Whether the rate is included in the price amount
    #[serde(default)]
    pub inclusive: bool,
    #[serde(default)]
    pub jurisdiction: Option<String>,
    /// Rate as a percentage, e.g. 8.25
    #[serde(default)]
    pub percentage: f64,
    #[serde(default, deserialize_with = "deserialize_metadata")]
    pub metadata: IndexMap<String, String>,
    #[serde(default)]
    pub livemode: bool,
}

impl TaxRate {
    fn object_name() -> String {
        Self::OBJECT.to_string()
    }
}

impl StripeObject for TaxRate {
    const OBJECT: &'static str = "tax_rate";

    fn id(&self) -> &str {
        &self.id
    }
}
