//! # agnopay-client
//!
//! HTTP client for the AgnoPay orders API.
//!
//! This crate provides:
//!
//! 1. **AgnoPayClient** - one authenticated `POST /v1/orders` per call
//!    - Bearer-token auth
//!    - Server error envelopes mapped onto `AgnoPayError`
//!    - No retries, no timeout
//!
//! 2. **CheckoutHook** - stateful wrapper for front-end code
//!    - Publishable key from options or `AGNOPAY_PUBLISHABLE_KEY`
//!    - `is_loading` / `error` / `order` bookkeeping
//!    - Success and error callbacks, never returns `Err`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use agnopay_client::{AgnoPayClient, ClientConfig};
//! use agnopay_core::{CreateOrderRequest, LineItem};
//!
//! let client = AgnoPayClient::new(ClientConfig::new("ak_your_publishable_key"));
//!
//! let order = client
//!     .create_order(&CreateOrderRequest::default().with_item(LineItem::new(
//!         "ITEM-001", "Product", 9900, 1,
//!     )))
//!     .await?;
//!
//! println!("Order created: {}", order.uuid);
//! ```

pub mod client;
pub mod config;
pub mod hook;

// Re-exports
pub use client::AgnoPayClient;
pub use config::ClientConfig;
pub use hook::{CheckoutHook, CheckoutHookOptions, ErrorCallback, OrderCallback};
