//! # AgnoPay Orders Client
//!
//! Thin wrapper over `POST {api_url}/v1/orders`. One call, one request:
//! no retries, no timeout, no backoff.

use crate::config::ClientConfig;
use agnopay_core::{AgnoPayError, AgnoPayResult, CreateOrderRequest, CreateOrderResponse, SdkConfig};
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use tracing::{debug, error, info, instrument};

/// Client for the AgnoPay orders API
#[derive(Debug, Clone)]
pub struct AgnoPayClient {
    config: ClientConfig,
    http: Client,
}

impl AgnoPayClient {
    /// Create a new client
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Create a client for `api_key` against the given base URLs
    pub fn with_api_key(api_key: impl Into<String>, sdk: SdkConfig) -> Self {
        Self::new(ClientConfig::new(api_key).with_sdk_config(sdk))
    }

    /// Create from environment variables
    pub fn from_env() -> AgnoPayResult<Self> {
        let config = ClientConfig::from_env()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Create a new order.
    ///
    /// Non-2xx responses become [`AgnoPayError::Api`] carrying the server's
    /// `{ error: { message, code } }` when present; a request that never
    /// gets a response becomes [`AgnoPayError::Network`].
    #[instrument(skip(self, request), fields(items = request.line_items.len()))]
    pub async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> AgnoPayResult<CreateOrderResponse> {
        let url = self.config.sdk.orders_url();

        debug!(
            "Creating AgnoPay order: {} items, total={:?}",
            request.line_items.len(),
            request.total_amount()
        );

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, self.config.auth_header())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!("AgnoPay request failed: {}", e);
                AgnoPayError::Network(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AgnoPayError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("AgnoPay API error: status={}, body={}", status, body);
            return Err(AgnoPayError::from_api_response(status.as_u16(), &body));
        }

        let order: CreateOrderResponse = serde_json::from_str(&body).map_err(|e| {
            AgnoPayError::Decode(format!("Failed to parse AgnoPay response: {}", e))
        })?;

        info!("Created AgnoPay order: id={}, status={}", order.uuid, order.status);

        Ok(order)
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait::async_trait]
impl agnopay_core::OrderApi for AgnoPayClient {
    async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> AgnoPayResult<CreateOrderResponse> {
        AgnoPayClient::create_order(self, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agnopay_core::{LineItem, OrderApi, GENERIC_ORDER_FAILURE, NETWORK_FAILURE};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_request() -> CreateOrderRequest {
        CreateOrderRequest::default().with_item(LineItem::new("A", "d", 100, 1))
    }

    fn client_for(server: &MockServer) -> AgnoPayClient {
        AgnoPayClient::new(ClientConfig::new("ak_test_123").with_api_url(server.uri()))
    }

    #[tokio::test]
    async fn test_create_order_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/orders"))
            .and(header("authorization", "Bearer ak_test_123"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "line_items": [{"code": "A", "description": "d", "amount": 100, "quantity": 1}]
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"uuid": "o1", "status": "pending"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let order = client_for(&server).create_order(&sample_request()).await.unwrap();

        assert_eq!(order.uuid, "o1");
        assert_eq!(order.status, "pending");
    }

    #[tokio::test]
    async fn test_create_order_error_envelope() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/orders"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"error": {"message": "bad item", "code": "E1"}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .create_order(&sample_request())
            .await
            .unwrap_err();

        assert_eq!(err.message(), "bad item");
        assert_eq!(err.code(), Some("E1"));
        assert!(matches!(err, AgnoPayError::Api { status: 400, .. }));
    }

    #[tokio::test]
    async fn test_create_order_error_without_envelope() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .create_order(&sample_request())
            .await
            .unwrap_err();

        assert_eq!(err.message(), GENERIC_ORDER_FAILURE);
        assert_eq!(err.code(), None);
    }

    #[tokio::test]
    async fn test_create_order_network_error() {
        let client = AgnoPayClient::new(ClientConfig::new("ak").with_api_url("http://127.0.0.1:1"));

        let err = client.create_order(&sample_request()).await.unwrap_err();

        assert!(matches!(err, AgnoPayError::Network(_)));
        assert_eq!(err.message(), NETWORK_FAILURE);
    }

    #[tokio::test]
    async fn test_create_order_undecodable_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .create_order(&sample_request())
            .await
            .unwrap_err();

        assert!(matches!(err, AgnoPayError::Decode(_)));
    }

    #[tokio::test]
    async fn test_client_does_not_validate_empty_orders() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_json(json!({"line_items": []})))
            .respond_with(
                ResponseTemplate::new(422)
                    .set_body_json(json!({"error": {"message": "no items"}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .create_order(&CreateOrderRequest::default())
            .await
            .unwrap_err();

        assert_eq!(err.message(), "no items");
    }

    #[tokio::test]
    async fn test_order_api_trait() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({"uuid": "o2", "status": "pending"})),
            )
            .mount(&server)
            .await;

        let api: agnopay_core::BoxedOrderApi = std::sync::Arc::new(client_for(&server));
        let order = api.create_order(&sample_request()).await.unwrap();
        assert_eq!(order.uuid, "o2");
    }
}
