//! # agnopay-core
//!
//! Core types for the AgnoPay SDK.
//!
//! This crate provides:
//! - `CreateOrderRequest`, `LineItem` and `CreateOrderResponse` for `POST /v1/orders`
//! - `OrderApi` trait implemented by the HTTP client
//! - `SdkConfig` holding the API and wallet base URLs
//! - `IframeStyle`, `CheckoutFrame` and `CheckoutLayout` for embedding the hosted checkout
//! - `CheckoutListener` and `OriginMatcher` for the cross-frame message protocol
//! - `AgnoPayError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use agnopay_core::{CheckoutFrame, CheckoutListener, CheckoutOptions, IframeStyle,
//!     OriginMatcher, OriginPolicy, SdkConfig};
//!
//! let config = SdkConfig::from_env();
//! let options = CheckoutOptions::new(order.uuid.clone())
//!     .with_style(IframeStyle::new().with_primary_color("#10b981"));
//!
//! let frame = CheckoutFrame::new(&config, &options)?;
//! println!("embed {}", frame.src);
//!
//! let listener = CheckoutListener::new(&options.order_id, OriginMatcher::new(&config.wallet_url, OriginPolicy::Exact)?)
//!     .on_success(|id| println!("paid {}", id));
//! listener.handle_message(&event_origin, &event_data);
//! ```

pub mod api;
pub mod checkout;
pub mod config;
pub mod error;
pub mod message;
pub mod order;
pub mod style;

// Re-exports for convenience
pub use api::{BoxedOrderApi, OrderApi};
pub use checkout::{
    checkout_url, html_escape, inline_style, CheckoutFrame, CheckoutLayout, CheckoutOptions,
    HeaderLayout, StyleDecls, CHECKOUT_ALLOW, CHECKOUT_IFRAME_TITLE, CHECKOUT_SANDBOX,
    DEFAULT_CHECKOUT_TITLE,
};
pub use config::{
    SdkConfig, API_URL_ENV, DEFAULT_API_URL, DEFAULT_WALLET_URL, PUBLISHABLE_KEY_ENV,
    SECRET_KEY_ENV, WALLET_URL_ENV,
};
pub use error::{AgnoPayError, AgnoPayResult, ErrorEnvelope, GENERIC_ORDER_FAILURE, NETWORK_FAILURE};
pub use message::{
    CheckoutListener, CheckoutMessage, CheckoutOutcome, ListenerState, OriginMatcher,
    OriginPolicy, DEFAULT_PAYMENT_ERROR, PAYMENT_ERROR_TYPE, PAYMENT_SUCCESS_TYPE,
};
pub use order::{CreateOrderRequest, CreateOrderResponse, LineItem};
pub use style::IframeStyle;
