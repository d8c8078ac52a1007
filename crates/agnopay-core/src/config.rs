//! # SDK Configuration
//!
//! API and wallet base URLs. The configuration is a plain value passed to
//! whatever needs it; there is no process-wide mutable copy.

use std::env;

/// Default AgnoPay API base URL
pub const DEFAULT_API_URL: &str = "https://agnoapi.vercel.app";

/// Default hosted checkout (wallet) base URL
pub const DEFAULT_WALLET_URL: &str = "https://agnowallet.vercel.app";

/// Env var overriding the API base URL
pub const API_URL_ENV: &str = "AGNOPAY_API_URL";

/// Env var overriding the wallet base URL
pub const WALLET_URL_ENV: &str = "AGNOPAY_WALLET_URL";

/// Env var holding the browser-safe publishable key
pub const PUBLISHABLE_KEY_ENV: &str = "AGNOPAY_PUBLISHABLE_KEY";

/// Env var holding the server-side secret key
pub const SECRET_KEY_ENV: &str = "AGNOPAY_SECRET_KEY";

/// Base URLs used by the SDK
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkConfig {
    /// API base URL (e.g. "https://api.agnopay.com")
    pub api_url: String,

    /// Hosted checkout base URL (e.g. "https://wallet.agnopay.com")
    pub wallet_url: String,
}

impl SdkConfig {
    pub fn new(api_url: impl Into<String>, wallet_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            wallet_url: wallet_url.into(),
        }
    }

    /// Load overrides from the environment, keeping the defaults for
    /// anything unset.
    ///
    /// Reads `AGNOPAY_API_URL` and `AGNOPAY_WALLET_URL` (a `.env` file is
    /// honoured if present).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();
        if let Ok(url) = env::var(API_URL_ENV) {
            config.api_url = url;
        }
        if let Ok(url) = env::var(WALLET_URL_ENV) {
            config.wallet_url = url;
        }
        config
    }

    /// Builder: override the API base URL
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Builder: override the wallet base URL
    pub fn with_wallet_url(mut self, url: impl Into<String>) -> Self {
        self.wallet_url = url.into();
        self
    }

    /// Restore both URLs to their defaults
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Full URL of the order creation endpoint
    pub fn orders_url(&self) -> String {
        format!("{}/v1/orders", self.api_url.trim_end_matches('/'))
    }
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, DEFAULT_WALLET_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SdkConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.wallet_url, DEFAULT_WALLET_URL);
        assert_eq!(config.orders_url(), "https://agnoapi.vercel.app/v1/orders");
    }

    #[test]
    fn test_overrides_are_independent() {
        let config = SdkConfig::default().with_wallet_url("http://localhost:3000");
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.wallet_url, "http://localhost:3000");
    }

    #[test]
    fn test_reset() {
        let mut config = SdkConfig::new("http://a", "http://b");
        config.reset();
        assert_eq!(config, SdkConfig::default());
    }

    #[test]
    fn test_orders_url_trailing_slash() {
        let config = SdkConfig::default().with_api_url("http://127.0.0.1:9000/");
        assert_eq!(config.orders_url(), "http://127.0.0.1:9000/v1/orders");
    }
}
