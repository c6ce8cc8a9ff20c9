use url::Url;

use crate::error::Result;

/// Production API host
pub const DEFAULT_API_BASE: &str = "https://api.stripe.com";

/// Configuration shared by every request builder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL requests are issued against (a Stripe-compatible server in tests)
    pub api_base: String,

    /// Value of the `Stripe-Version` header; the account default when unset
    pub api_version: Option<String>,

    /// Default connected account, overridden per request by the params
    pub stripe_account: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_version: None,
            stripe_account: None,
        }
    }
}

impl ApiConfig {
    /// Create a new configuration with the given API base
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            ..Default::default()
        }
    }

    /// Read `STRIPE_API_BASE`, `STRIPE_API_VERSION` and `STRIPE_ACCOUNT`
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build from a variable lookup; unset or blank variables keep defaults
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let mut config = Self::default();
        if let Some(api_base) = read("STRIPE_API_BASE") {
            config.api_base = api_base;
        }
        config.api_version = read("STRIPE_API_VERSION");
        config.stripe_account = read("STRIPE_ACCOUNT");
        config
    }

    /// Send requests to another API base, such as a local mock server
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Pin the API version
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    /// Act on behalf of a connected account by default
    pub fn with_stripe_account(mut self, stripe_account: impl Into<String>) -> Self {
        self.stripe_account = Some(stripe_account.into());
        self
    }

    /// Absolute URL of an API path such as `/v1/subscription_items`
    pub fn url(&self, path: &str) -> Result<Url> {
        let base = self.api_base.trim_end_matches('/');
        Ok(Url::parse(&format!("{}{}", base, path))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.api_base, "https://api.stripe.com");
        assert_eq!(config.api_version, None);
        assert_eq!(config.stripe_account, None);
    }

    #[test]
    fn test_builder() {
        let config = ApiConfig::default()
            .with_api_base("http://localhost:12111")
            .with_api_version("2020-03-02")
            .with_stripe_account("acct_1");
        assert_eq!(config.api_base, "http://localhost:12111");
        assert_eq!(config.api_version.as_deref(), Some("2020-03-02"));
        assert_eq!(config.stripe_account.as_deref(), Some("acct_1"));
        assert_eq!(
            config.url("/v1/subscription_items").unwrap().as_str(),
            "http://localhost:12111/v1/subscription_items"
        );
    }

    #[test]
    fn test_from_vars() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("STRIPE_API_BASE", "http://localhost:8488/stripe"),
            ("STRIPE_API_VERSION", "2020-03-02"),
            ("STRIPE_ACCOUNT", "  "),
        ]);
        let config = ApiConfig::from_vars(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.api_base, "http://localhost:8488/stripe");
        assert_eq!(config.api_version.as_deref(), Some("2020-03-02"));
        assert_eq!(config.stripe_account, None);

        let empty = ApiConfig::from_vars(|_| None);
        assert_eq!(empty, ApiConfig::default());
    }

    #[test]
    fn test_url_keeps_base_path() {
        let config = ApiConfig::new("http://localhost:8488/stripe/");
        assert_eq!(
            config.url("/v1/subscription_items").unwrap().as_str(),
            "http://localhost:8488/stripe/v1/subscription_items"
        );

        assert!(ApiConfig::new("not a url").url("/v1").is_err());
    }
}
