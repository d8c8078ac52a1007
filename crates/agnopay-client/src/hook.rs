//! # Checkout Hook
//!
//! Stateful order creation for front-end code holding a publishable key.
//! Tracks `is_loading`, the last `error` and the last created `order`, and
//! reports through optional callbacks instead of returning errors.
//!
//! ```rust,ignore
//! let hook = CheckoutHook::new(
//!     CheckoutHookOptions::default()
//!         .on_success(|order| println!("created {}", order.uuid)),
//! );
//!
//! if let Some(order) = hook.create_order(&request).await {
//!     // render the checkout for order.uuid
//! } else if let Some(err) = hook.error() {
//!     // render err.message()
//! }
//! ```

use crate::client::AgnoPayClient;
use crate::config::ClientConfig;
use agnopay_core::{
    AgnoPayError, CreateOrderRequest, CreateOrderResponse, SdkConfig, PUBLISHABLE_KEY_ENV,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::warn;

/// Callback invoked with the created order
pub type OrderCallback = Arc<dyn Fn(&CreateOrderResponse) + Send + Sync>;

/// Callback invoked with the failure
pub type ErrorCallback = Arc<dyn Fn(&AgnoPayError) + Send + Sync>;

/// Options for [`CheckoutHook::new`]
#[derive(Clone, Default)]
pub struct CheckoutHookOptions {
    /// Publishable key; falls back to `AGNOPAY_PUBLISHABLE_KEY`
    pub publishable_key: Option<String>,
    pub config: SdkConfig,
    pub on_success: Option<OrderCallback>,
    pub on_error: Option<ErrorCallback>,
}

impl CheckoutHookOptions {
    pub fn with_publishable_key(mut self, key: impl Into<String>) -> Self {
        self.publishable_key = Some(key.into());
        self
    }

    pub fn with_config(mut self, config: SdkConfig) -> Self {
        self.config = config;
        self
    }

    pub fn on_success(mut self, callback: impl Fn(&CreateOrderResponse) + Send + Sync + 'static) -> Self {
        self.on_success = Some(Arc::new(callback));
        self
    }

    pub fn on_error(mut self, callback: impl Fn(&AgnoPayError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(callback));
        self
    }
}

#[derive(Debug, Default)]
struct HookState {
    is_loading: bool,
    error: Option<AgnoPayError>,
    order: Option<CreateOrderResponse>,
}

/// Order creation with loading/error/order bookkeeping
pub struct CheckoutHook {
    client: Option<AgnoPayClient>,
    state: Mutex<HookState>,
    on_success: Option<OrderCallback>,
    on_error: Option<ErrorCallback>,
}

impl CheckoutHook {
    /// Build the hook. The publishable key is resolved once, here: the
    /// explicit option wins, then `AGNOPAY_PUBLISHABLE_KEY`.
    pub fn new(options: CheckoutHookOptions) -> Self {
        let key = options
            .publishable_key
            .or_else(|| std::env::var(PUBLISHABLE_KEY_ENV).ok())
            .filter(|k| !k.is_empty());

        let client = key.map(|k| AgnoPayClient::new(ClientConfig::new(k).with_sdk_config(options.config)));

        Self {
            client,
            state: Mutex::new(HookState::default()),
            on_success: options.on_success,
            on_error: options.on_error,
        }
    }

    /// Create an order.
    ///
    /// Returns `None` on any failure; the failure is kept in [`error`](Self::error)
    /// and handed to the error callback. Without a publishable key no
    /// request is made and the error is `MISSING_KEY`.
    pub async fn create_order(&self, request: &CreateOrderRequest) -> Option<CreateOrderResponse> {
        let Some(client) = &self.client else {
            warn!("AgnoPay publishable key missing, not creating order");
            self.fail(AgnoPayError::MissingKey);
            return None;
        };

        {
            let mut state = self.lock();
            state.is_loading = true;
            state.error = None;
        }

        match client.create_order(request).await {
            Ok(order) => {
                {
                    let mut state = self.lock();
                    state.is_loading = false;
                    state.order = Some(order.clone());
                }
                if let Some(callback) = &self.on_success {
                    callback(&order);
                }
                Some(order)
            }
            Err(err) => {
                self.fail(err);
                None
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.lock().is_loading
    }

    pub fn error(&self) -> Option<AgnoPayError> {
        self.lock().error.clone()
    }

    pub fn order(&self) -> Option<CreateOrderResponse> {
        self.lock().order.clone()
    }

    /// Whether a publishable key was found
    pub fn has_key(&self) -> bool {
        self.client.is_some()
    }

    fn fail(&self, err: AgnoPayError) {
        {
            let mut state = self.lock();
            state.is_loading = false;
            state.error = Some(err.clone());
        }
        if let Some(callback) = &self.on_error {
            callback(&err);
        }
    }

    fn lock(&self) -> MutexGuard<'_, HookState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
