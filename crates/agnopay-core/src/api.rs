//! # Order API Trait
//!
//! Seam between order creation and its callers. The HTTP client implements
//! it; server routes and tests depend only on the trait.

use crate::error::AgnoPayResult;
use crate::order::{CreateOrderRequest, CreateOrderResponse};
use async_trait::async_trait;
use std::sync::Arc;

/// Something that can create AgnoPay orders.
#[async_trait]
pub trait OrderApi: Send + Sync {
    /// Create an order and return the server's representation of it.
    async fn create_order(&self, request: &CreateOrderRequest)
        -> AgnoPayResult<CreateOrderResponse>;

    /// Short name for logging
    fn name(&self) -> &'static str {
        "agnopay"
    }
}

/// Type alias for a shared order API (dynamic dispatch)
pub type BoxedOrderApi = Arc<dyn OrderApi>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AgnoPayError;
    use crate::order::LineItem;

    struct EchoOrders;

    #[async_trait]
    impl OrderApi for EchoOrders {
        async fn create_order(
            &self,
            request: &CreateOrderRequest,
        ) -> AgnoPayResult<CreateOrderResponse> {
            let first = request
                .line_items
                .first()
                .ok_or_else(|| AgnoPayError::InvalidRequest("empty".into()))?;

            Ok(CreateOrderResponse {
                uuid: first.code.clone(),
                status: "pending".into(),
                pix: None,
                boleto: None,
                extra: Default::default(),
            })
        }
    }

    #[tokio::test]
    async fn test_dynamic_dispatch() {
        let api: BoxedOrderApi = Arc::new(EchoOrders);
        let request = CreateOrderRequest::default().with_item(LineItem::new("A", "d", 100, 1));

        let order = api.create_order(&request).await.unwrap();
        assert_eq!(order.uuid, "A");
        assert_eq!(api.name(), "agnopay");
        assert!(api.create_order(&CreateOrderRequest::default()).await.is_err());
    }
}
