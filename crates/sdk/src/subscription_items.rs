//! Request builders for the `/v1/subscription_items` endpoints.

use serde::Serialize;
use stripe_subitem_types::{Params, SubscriptionItemListParams, SubscriptionItemParams, form};
use tracing::debug;

use crate::{
    config::ApiConfig,
    error::{Result, StripeError},
    request::{ApiRequest, Method},
};

pub const SUBSCRIPTION_ITEMS_PATH: &str = "/v1/subscription_items";

/// Builds [`ApiRequest`]s for subscription item operations
#[derive(Debug, Clone, Default)]
pub struct SubscriptionItems {
    config: ApiConfig,
}

impl SubscriptionItems {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// POST /v1/subscription_items - Create a subscription item
    pub fn create(&self, params: &SubscriptionItemParams) -> Result<ApiRequest> {
        self.post(SUBSCRIPTION_ITEMS_PATH.to_string(), params, &params.params)
    }

    /// GET /v1/subscription_items/{id} - Retrieve a subscription item
    pub fn retrieve(&self, id: &str, params: &Params) -> Result<ApiRequest> {
        self.with_query(
            Method::Get,
            item_path(id)?,
            params,
            params.stripe_account.as_deref(),
        )
    }

    /// POST /v1/subscription_items/{id} - Update a subscription item
    pub fn update(&self, id: &str, params: &SubscriptionItemParams) -> Result<ApiRequest> {
        self.post(item_path(id)?, params, &params.params)
    }

    /// DELETE /v1/subscription_items/{id} - Delete a subscription item
    pub fn delete(&self, id: &str, params: &SubscriptionItemParams) -> Result<ApiRequest> {
        self.with_query(
            Method::Delete,
            item_path(id)?,
            params,
            params.params.stripe_account.as_deref(),
        )
    }

    /// GET /v1/subscription_items - List the items of a subscription
    pub fn list(&self, params: &SubscriptionItemListParams) -> Result<ApiRequest> {
        self.with_query(
            Method::Get,
            SUBSCRIPTION_ITEMS_PATH.to_string(),
            params,
            params.list.stripe_account.as_deref(),
        )
    }

    fn post<P: Serialize>(&self, path: String, params: &P, common: &Params) -> Result<ApiRequest> {
        let url = self.config.url(&path)?;
        let body = form::to_string(params)?;

        let mut headers = self.headers(common.stripe_account.as_deref());
        if let Some(key) = &common.idempotency_key {
            headers.push(("Idempotency-Key".to_string(), key.clone()));
        }

        debug!(method = "POST", url = %url, bytes = body.len(), "Built subscription item request");
        Ok(ApiRequest {
            method: Method::Post,
            url,
            body: Some(body),
            headers,
        })
    }

    fn with_query<P: Serialize>(
        &self,
        method: Method,
        path: String,
        params: &P,
        stripe_account: Option<&str>,
    ) -> Result<ApiRequest> {
        let mut url = self.config.url(&path)?;
        let pairs = form::to_pairs(params)?;
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        debug!(method = %method, url = %url, "Built subscription item request");
        Ok(ApiRequest {
            method,
            url,
            body: None,
            headers: self.headers(stripe_account),
        })
    }

    fn headers(&self, stripe_account: Option<&str>) -> Vec<(String, String)> {
        let mut headers = Vec::new();
        if let Some(version) = &self.config.api_version {
            headers.push(("Stripe-Version".to_string(), version.clone()));
        }
        if let Some(account) = stripe_account.or(self.config.stripe_account.as_deref()) {
            headers.push(("Stripe-Account".to_string(), account.to_string()));
        }
        headers
    }
}

/// Path of a single item; the id is percent-encoded as one segment
fn item_path(id: &str) -> Result<String> {
    if id.trim().is_empty() {
        return Err(StripeError::InvalidId {
            resource: "subscription_item",
            id: id.to_string(),
        });
    }
    Ok(format!("{}/{}", SUBSCRIPTION_ITEMS_PATH, urlencoding::encode(id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::FORM_CONTENT_TYPE;
    use rust_decimal_macros::dec;
    use stripe_subitem_types::{
        ProrationBehavior, RecurringInterval, SubscriptionItemPriceDataParams,
        SubscriptionItemPriceDataRecurringParams,
    };

    fn api() -> SubscriptionItems {
        SubscriptionItems::new(ApiConfig::default().with_api_version("2020-03-02"))
    }

    #[test]
    fn test_create_request() {
        let mut params = SubscriptionItemParams {
            subscription: Some("sub_1".to_string()),
            price_data: Some(SubscriptionItemPriceDataParams {
                currency: Some("usd".to_string()),
                product: Some("prod_1".to_string()),
                recurring: Some(SubscriptionItemPriceDataRecurringParams {
                    interval: Some(RecurringInterval::Month),
                    interval_count: None,
                }),
                unit_amount: None,
                unit_amount_decimal: Some(dec!(19.99)),
            }),
            quantity: Some(1),
            ..Default::default()
        };
        params.params.idempotency_key = Some("idem-1".to_string());

        let request = api().create(&params).unwrap();

        assert_eq!(request.method, Method::Post);
        assert_eq!(
            request.url.as_str(),
            "https://api.stripe.com/v1/subscription_items"
        );
        assert_eq!(request.content_type(), Some(FORM_CONTENT_TYPE));
        assert_eq!(
            request.body.as_deref(),
            Some(
                "price_data%5Bcurrency%5D=usd&price_data%5Bproduct%5D=prod_1\
                 &price_data%5Brecurring%5D%5Binterval%5D=month\
                 &price_data%5Bunit_amount_decimal%5D=19.99&quantity=1&subscription=sub_1"
            )
        );
        assert_eq!(request.header("stripe-version"), Some("2020-03-02"));
        assert_eq!(request.header("Idempotency-Key"), Some("idem-1"));
        assert_eq!(request.header("Stripe-Account"), None);
    }

    #[test]
    fn test_update_request() {
        let params = SubscriptionItemParams {
            quantity: Some(4),
            proration_behavior: Some(ProrationBehavior::AlwaysInvoice),
            off_session: Some(true),
            ..Default::default()
        };

        let request = api().update("si_1", &params).unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(
            request.url.as_str(),
            "https://api.stripe.com/v1/subscription_items/si_1"
        );
        assert_eq!(
            request.body.as_deref(),
            Some("proration_behavior=always_invoice&quantity=4&off_session=true")
        );
    }

    #[test]
    fn test_retrieve_request_uses_query() {
        let mut params = Params::default();
        params.add_expand("price");
        params.stripe_account = Some("acct_9".to_string());

        let request = api().retrieve("si_1", &params).unwrap();
        assert_eq!(request.method, Method::Get);
        assert_eq!(
            request.url.as_str(),
            "https://api.stripe.com/v1/subscription_items/si_1?expand%5B0%5D=price"
        );
        assert_eq!(request.body, None);
        assert_eq!(request.content_type(), None);
        assert_eq!(request.header("Stripe-Account"), Some("acct_9"));
    }

    #[test]
    fn test_delete_request() {
        let mut params = SubscriptionItemParams {
            clear_usage: Some(true),
            ..Default::default()
        };
        params.params.idempotency_key = Some("ignored".to_string());

        let request = api().delete("si_1", &params).unwrap();
        assert_eq!(request.method, Method::Delete);
        assert_eq!(
            request.url.as_str(),
            "https://api.stripe.com/v1/subscription_items/si_1?clear_usage=true"
        );
        assert_eq!(request.header("Idempotency-Key"), None);
    }

    #[test]
    fn test_list_request() {
        let mut params = SubscriptionItemListParams::new("sub_1");
        params.list.limit = Some(3);

        let request = api().list(&params).unwrap();
        assert_eq!(request.method, Method::Get);
        assert_eq!(
            request.url.as_str(),
            "https://api.stripe.com/v1/subscription_items?limit=3&subscription=sub_1"
        );
    }

    #[test]
    fn test_account_header_falls_back_to_config() {
        let api = SubscriptionItems::new(ApiConfig::default().with_stripe_account("acct_default"));

        let request = api.list(&SubscriptionItemListParams::new("sub_1")).unwrap();
        assert_eq!(request.header("Stripe-Account"), Some("acct_default"));
        assert_eq!(request.header("Stripe-Version"), None);

        let mut params = SubscriptionItemListParams::new("sub_1");
        params.list.stripe_account = Some("acct_override".to_string());
        let request = api.list(&params).unwrap();
        assert_eq!(request.header("Stripe-Account"), Some("acct_override"));
    }

    #[test]
    fn test_item_ids_are_encoded_and_validated() {
        let request = api()
            .retrieve("si_1/../secret", &Params::default())
            .unwrap();
        assert_eq!(
            request.url.as_str(),
            "https://api.stripe.com/v1/subscription_items/si_1%2F..%2Fsecret"
        );

        assert!(matches!(
            api().update("  ", &SubscriptionItemParams::default()),
            Err(StripeError::InvalidId { .. })
        ));
    }
}
