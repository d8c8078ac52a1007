//! `AgnoPaySDK` class for plain `<script>` usage.

use agnopay_client::{AgnoPayClient, ClientConfig};
use agnopay_core::{AgnoPayError, CreateOrderRequest, SdkConfig};
use js_sys::Promise;
use serde::{Deserialize, Serialize};
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

/// Constructor options: `{ apiKey, apiUrl?, walletUrl? }`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkOptions {
    pub api_key: String,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub wallet_url: Option<String>,
}

impl SdkOptions {
    pub fn into_client_config(self) -> ClientConfig {
        let mut sdk = SdkConfig::default();
        if let Some(url) = self.api_url {
            sdk = sdk.with_api_url(url);
        }
        if let Some(url) = self.wallet_url {
            sdk = sdk.with_wallet_url(url);
        }
        ClientConfig::new(self.api_key).with_sdk_config(sdk)
    }
}

/// Order client exposed to JavaScript as `AgnoPaySDK`
#[wasm_bindgen(js_name = AgnoPaySDK)]
pub struct AgnoPaySdk {
    client: AgnoPayClient,
}

#[wasm_bindgen(js_class = AgnoPaySDK)]
impl AgnoPaySdk {
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<AgnoPaySdk, JsValue> {
        let options: SdkOptions = serde_wasm_bindgen::from_value(options)
            .map_err(|e| js_sys::Error::new(&format!("Invalid AgnoPaySDK options: {}", e)))?;

        Ok(Self {
            client: AgnoPayClient::new(options.into_client_config()),
        })
    }

    /// Create an order. Resolves with the order, rejects with
    /// `{ message, code?, details? }`.
    #[wasm_bindgen(js_name = createOrder)]
    pub fn create_order(&self, request: JsValue) -> Promise {
        let client = self.client.clone();

        future_to_promise(async move {
            let request: CreateOrderRequest = serde_wasm_bindgen::from_value(request)
                .map_err(|e| error_to_js(&AgnoPayError::InvalidRequest(e.to_string())))?;

            let order = client
                .create_order(&request)
                .await
                .map_err(|e| error_to_js(&e))?;

            to_js(&order)
        })
    }
}

/// Serialize to plain JS objects (no `Map`s)
pub(crate) fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&Serializer::json_compatible())
        .map_err(JsValue::from)
}

/// `{ message, code?, details? }` as a JS object
pub(crate) fn error_to_js(err: &AgnoPayError) -> JsValue {
    to_js(&err.to_envelope()).unwrap_or_else(|_| JsValue::from_str(&err.message()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_defaults() {
        let options: SdkOptions = serde_json::from_str(r#"{"apiKey":"ak_test"}"#).unwrap();
        let config = options.into_client_config();

        assert_eq!(config.auth_header(), "Bearer ak_test");
        assert_eq!(config.sdk, SdkConfig::default());
    }

    #[test]
    fn test_options_overrides() {
        let options: SdkOptions = serde_json::from_str(
            r#"{"apiKey":"ak_test","apiUrl":"http://localhost:8787","walletUrl":"http://localhost:3000"}"#,
        )
        .unwrap();
        let config = options.into_client_config();

        assert_eq!(config.sdk.orders_url(), "http://localhost:8787/v1/orders");
        assert_eq!(config.sdk.wallet_url, "http://localhost:3000");
    }
}
