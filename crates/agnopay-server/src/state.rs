//! # Application State
//!
//! Shared state for the Axum application: the order API and base URLs.

use agnopay_client::AgnoPayClient;
use agnopay_core::{BoxedOrderApi, SdkConfig};
use std::net::SocketAddr;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            environment: "development".to_string(),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Order creation backend
    pub orders: BoxedOrderApi,
    /// API and wallet base URLs
    pub sdk: SdkConfig,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create state from the environment, using the secret key in
    /// `AGNOPAY_SECRET_KEY`.
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        let client = AgnoPayClient::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize AgnoPay client: {}", e))?;
        let sdk = client.config().sdk.clone();

        Ok(Self {
            orders: Arc::new(client),
            sdk,
            config,
        })
    }

    /// Create state around an existing order backend
    pub fn with_orders(orders: BoxedOrderApi, sdk: SdkConfig) -> Self {
        Self {
            orders,
            sdk,
            config: AppConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert!(!config.is_production());
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: "test".to_string(),
        };

        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_socket_addr_invalid_host() {
        let config = AppConfig {
            host: "not a host".to_string(),
            ..AppConfig::default()
        };
        assert!(config.socket_addr().is_err());
    }
}
