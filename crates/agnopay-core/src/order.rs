//! # Order Types
//!
//! Request and response shapes for `POST /v1/orders`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One priced unit within an order request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Merchant item code (e.g. "ITEM-001")
    pub code: String,

    /// Description shown on the checkout page
    pub description: String,

    /// Unit amount in minor currency units (cents, centavos)
    pub amount: i64,

    /// Quantity
    pub quantity: u32,
}

impl LineItem {
    pub fn new(
        code: impl Into<String>,
        description: impl Into<String>,
        amount: i64,
        quantity: u32,
    ) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            amount,
            quantity,
        }
    }

    /// Line total in minor units, `None` on overflow
    pub fn total(&self) -> Option<i64> {
        self.amount.checked_mul(i64::from(self.quantity))
    }
}

/// Body of `POST /v1/orders`
///
/// The client never checks that `line_items` is non-empty; only the
/// server-side route helper does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

impl CreateOrderRequest {
    pub fn new(line_items: Vec<LineItem>) -> Self {
        Self { line_items }
    }

    /// Builder: append a line item
    pub fn with_item(mut self, item: LineItem) -> Self {
        self.line_items.push(item);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }

    /// Order total in minor units, `None` on overflow
    pub fn total_amount(&self) -> Option<i64> {
        self.line_items
            .iter()
            .try_fold(0i64, |sum, item| sum.checked_add(item.total()?))
    }
}

/// Order as returned by the API.
///
/// Only the identifier and status are interpreted; payment-method payloads
/// and any other fields are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    /// Server-assigned identifier (older API versions call it `id`)
    #[serde(alias = "id")]
    pub uuid: String,

    #[serde(default)]
    pub status: String,

    /// PIX QR code payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pix: Option<Value>,

    /// Boleto barcode payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boleto: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CreateOrderResponse {
    pub fn id(&self) -> &str {
        &self.uuid
    }
}
