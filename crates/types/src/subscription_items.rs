//! Subscription item parameters and resources.
//!
//! A subscription item associates a price (or a legacy plan) and a quantity
//! with a subscription. The same [`SubscriptionItemParams`] structure is
//! used to create, update and delete items; the item id is carried in the
//! URL and never in the body.

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};

use crate::{
    Expandable, List, ListParams, Params, Plan, Price, RecurringInterval, StripeObject, TaxRate,
    deserialize_metadata,
};

/// How to handle payment failures when the item change requires a charge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentBehavior {
    AllowIncomplete,
    DefaultIncomplete,
    ErrorIfIncomplete,
    PendingIfIncomplete,
}

impl PaymentBehavior {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentBehavior::AllowIncomplete => "allow_incomplete",
            PaymentBehavior::DefaultIncomplete => "default_incomplete",
            PaymentBehavior::ErrorIfIncomplete => "error_if_incomplete",
            PaymentBehavior::PendingIfIncomplete => "pending_if_incomplete",
        }
    }
}

/// How prorations are generated when the item changes mid-period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProrationBehavior {
    AlwaysInvoice,
    CreateProrations,
    None,
}

impl ProrationBehavior {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProrationBehavior::AlwaysInvoice => "always_invoice",
            ProrationBehavior::CreateProrations => "create_prorations",
            ProrationBehavior::None => "none",
        }
    }
}

/// Recurring cadence of an inline price
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionItemPriceDataRecurringParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<RecurringInterval>,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval_count: Option<i64>,
}

/// Inline price definition supplied at item creation instead of a price id
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionItemPriceDataParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,

    #[serde(skip_serializing_if = "crate::common::is_unset")]
    pub recurring: Option<SubscriptionItemPriceDataRecurringParams>,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_amount: Option<i64>,

    /// High-precision amount, encoded as its exact decimal text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_amount_decimal: Option<Decimal>,
}

/// Usage threshold that triggers an invoice before the period ends
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionItemBillingThresholdsParams {
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_gte: Option<i64>,
}

/// Parameters to create, update or delete a subscription item
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionItemParams {
    #[serde(flatten)]
    pub params: Params,

    #[serde(skip_serializing_if = "crate::common::is_unset")]
    pub billing_thresholds: Option<SubscriptionItemBillingThresholdsParams>,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clear_usage: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_behavior: Option<PaymentBehavior>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,

    #[serde(skip_serializing_if = "crate::common::is_unset")]
    pub price_data: Option<SubscriptionItemPriceDataParams>,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prorate: Option<bool>,

    /// Unix timestamp used to compute prorations
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proration_date: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub proration_behavior: Option<ProrationBehavior>,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription: Option<String>,

    /// Tax rate ids. An empty list is sent as `tax_rates=` and removes every rate.
    #[serde(
        default,
        deserialize_with = "crate::form::empty_or",
        skip_serializing_if = "Option::is_none"
    )]
    pub tax_rates: Option<Vec<String>>,

    /// Only honoured on updates
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub off_session: Option<bool>,
}

/// Parameters to list the items of one subscription
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionItemListParams {
    #[serde(flatten)]
    pub list: ListParams,

    /// Required by the API when listing
    pub subscription: String,
}

impl SubscriptionItemListParams {
    pub fn new(subscription: impl Into<String>) -> Self {
        Self {
            list: ListParams::default(),
            subscription: subscription.into(),
        }
    }

    /// Parameters for the page after `page`, or `None` once the list is exhausted
    pub fn next_page(&self, page: &SubscriptionItemList) -> Option<Self> {
        if !page.has_more() {
            return None;
        }
        let last_id = page.last_id()?;

        let mut next = self.clone();
        next.list.ending_before = None;
        next.list.starting_after = Some(last_id.to_string());
        Some(next)
    }
}

/// Billing thresholds configured on a subscription item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionItemBillingThresholds {
    #[serde(default)]
    pub usage_gte: Option<i64>,
}

/// Stripe subscription item resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionItem {
    pub id: String,

    #[serde(default = "SubscriptionItem::object_name")]
    pub object: String,

    #[serde(default)]
    pub billing_thresholds: Option<SubscriptionItemBillingThresholds>,

    #[serde(default)]
    pub created: i64,

    /// Only present on deletion responses
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deleted: bool,

    #[serde(default, deserialize_with = "deserialize_metadata")]
    pub metadata: IndexMap<String, String>,

    #[serde(default)]
    pub plan: Option<Expandable<Plan>>,

    #[serde(default)]
    pub price: Option<Expandable<Price>>,

    /// Absent for metered prices
    #[serde(default)]
    pub quantity: Option<i64>,

    #[serde(default)]
    pub subscription: String,

    #[serde(default)]
    pub tax_rates: Vec<TaxRate>,
}

impl SubscriptionItem {
    fn object_name() -> String {
        Self::OBJECT.to_string()
    }
}

impl StripeObject for SubscriptionItem {
    const OBJECT: &'static str = "subscription_item";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Page of subscription items returned by the list endpoint
pub type SubscriptionItemList = List<SubscriptionItem>;
