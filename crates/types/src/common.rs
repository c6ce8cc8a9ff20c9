//! Parameters and wrappers shared by every Stripe resource.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};

/// A Stripe API object with an identifier and a wire `object` name
pub trait StripeObject {
    /// Value of the `object` key in JSON payloads (e.g. "subscription_item")
    const OBJECT: &'static str;

    fn id(&self) -> &str;
}

/// `true` for `None` and for nested parameters with no field set.
///
/// Only lists and maps use the `key=` clear convention, so an empty nested
/// structure is left out of the body entirely.
pub(crate) fn is_unset<T: Default + PartialEq>(value: &Option<T>) -> bool {
    value.as_ref().is_none_or(|inner| *inner == T::default())
}

/// Parameters embedded in every mutation request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Params {
    /// Set of key-value pairs attached to the object.
    /// An empty map is sent as `metadata=` and clears every key.
    #[serde(
        default,
        deserialize_with = "crate::form::empty_or",
        skip_serializing_if = "Option::is_none"
    )]
    pub metadata: Option<IndexMap<String, String>>,

    /// Related objects to expand in the response (e.g. "price.product")
    #[serde(
        default,
        deserialize_with = "crate::form::empty_or",
        skip_serializing_if = "Option::is_none"
    )]
    pub expand: Option<Vec<String>>,

    /// Sent as the `Idempotency-Key` header, never in the body
    #[serde(skip)]
    pub idempotency_key: Option<String>,

    /// Connected account to act on behalf of, sent as the `Stripe-Account` header
    #[serde(skip)]
    pub stripe_account: Option<String>,
}

impl Params {
    pub fn add_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata
            .get_or_insert_with(IndexMap::new)
            .insert(key.into(), value.into());
    }

    pub fn add_expand(&mut self, field: impl Into<String>) {
        self.expand.get_or_insert_with(Vec::new).push(field.into());
    }
}

/// Cursor parameters embedded in every list request
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ending_before: Option<String>,

    #[serde(
        default,
        deserialize_with = "crate::form::empty_or",
        skip_serializing_if = "Option::is_none"
    )]
    pub expand: Option<Vec<String>>,

    /// Page size, between 1 and 100 on the server side
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_after: Option<String>,

    #[serde(skip)]
    pub stripe_account: Option<String>,
}

/// Pagination metadata returned alongside list data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListMeta {
    pub has_more: bool,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}

/// Stripe-compatible list response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List<T> {
    #[serde(default = "list_object")]
    pub object: String,
    pub data: Vec<T>,
    #[serde(flatten)]
    pub meta: ListMeta,
}

fn list_object() -> String {
    "list".to_string()
}

impl<T> List<T> {
    pub fn has_more(&self) -> bool {
        self.meta.has_more
    }
}

impl<T: StripeObject> List<T> {
    /// Id of the last element, used as `starting_after` for the next page
    pub fn last_id(&self) -> Option<&str> {
        self.data.last().map(|item| item.id())
    }
}

/// A related object returned either as its id or, once expanded, in full
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expandable<T> {
    Id(String),
    Object(Box<T>),
}

impl<T: StripeObject> Expandable<T> {
    pub fn id(&self) -> &str {
        match self {
            Expandable::Id(id) => id,
            Expandable::Object(object) => object.id(),
        }
    }
}

impl<T> Expandable<T> {
    pub fn is_object(&self) -> bool {
        matches!(self, Expandable::Object(_))
    }

    pub fn as_object(&self) -> Option<&T> {
        match self {
            Expandable::Id(_) => None,
            Expandable::Object(object) => Some(&**object),
        }
    }
}
