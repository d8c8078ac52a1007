//! # agnopay-wasm
//!
//! WebAssembly bindings for the AgnoPay SDK.
//!
//! This crate provides:
//! - `createCheckout`, mounting the hosted checkout into a page element
//! - `AgnoPaySDK`, an order client for publishable-key usage
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { AgnoPaySDK, createCheckout } from 'agnopay-wasm';
//!
//! await init();
//!
//! const sdk = new AgnoPaySDK({ apiKey: 'pk_...' });
//! const order = await sdk.createOrder({
//!   line_items: [{ code: 'tee', description: 'T-shirt', amount: 2500, quantity: 1 }],
//! });
//!
//! createCheckout({ orderId: order.uuid, container: '#checkout' });
//! ```
//!
//! ## Building
//!
//! ```bash
//! wasm-pack build --target web
//! ```

use wasm_bindgen::prelude::*;

pub mod sdk;
pub mod widget;

pub use sdk::{AgnoPaySdk, SdkOptions};
pub use widget::{create_checkout, parse_origin_policy, CheckoutWidget};

/// Get the SDK version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }
}
