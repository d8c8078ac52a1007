//! # Client Configuration
//!
//! Credentials and base URLs for the order client.

use agnopay_core::{AgnoPayError, SdkConfig, SECRET_KEY_ENV};
use std::env;

/// Order client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key sent as bearer token (publishable `ak_...` or a secret key)
    pub api_key: String,

    /// API and wallet base URLs
    pub sdk: SdkConfig,
}

impl ClientConfig {
    /// Create config with the default base URLs
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            sdk: SdkConfig::default(),
        }
    }

    /// Load a server-side configuration from the environment.
    ///
    /// Required env vars:
    /// - `AGNOPAY_SECRET_KEY`
    ///
    /// Optional: `AGNOPAY_API_URL`, `AGNOPAY_WALLET_URL`.
    pub fn from_env() -> Result<Self, AgnoPayError> {
        dotenvy::dotenv().ok();

        let api_key = env::var(SECRET_KEY_ENV)
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| AgnoPayError::Configuration(format!("{} not set", SECRET_KEY_ENV)))?;

        Ok(Self {
            api_key,
            sdk: SdkConfig::from_env(),
        })
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.api_key)
    }

    /// Builder: replace both base URLs
    pub fn with_sdk_config(mut self, sdk: SdkConfig) -> Self {
        self.sdk = sdk;
        self
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.sdk.api_url = url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_header() {
        let config = ClientConfig::new("ak_test_123");
        assert_eq!(config.auth_header(), "Bearer ak_test_123");
    }

    #[test]
    fn test_api_url_override() {
        let config = ClientConfig::new("ak").with_api_url("http://127.0.0.1:9999");
        assert_eq!(config.sdk.orders_url(), "http://127.0.0.1:9999/v1/orders");
        assert_eq!(config.sdk.wallet_url, agnopay_core::DEFAULT_WALLET_URL);
    }

    #[test]
    fn test_from_env_missing_key() {
        env::remove_var(SECRET_KEY_ENV);

        let result = ClientConfig::from_env();
        assert!(matches!(result, Err(AgnoPayError::Configuration(_))));
    }
}
