//! # Routes
//!
//! Axum router configuration for the AgnoPay route helper.

use crate::handlers;
use crate::state::AppState;
use agnopay_client::AgnoPayClient;
use agnopay_core::{BoxedOrderApi, SdkConfig};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  /health - Health check
/// - POST /api/agnopay/orders - Create an order
/// - GET  /checkout/{order_id} - Page embedding the hosted checkout
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        .route("/api/agnopay/orders", post(handlers::create_order))
        .route("/checkout/{order_id}", get(handlers::checkout_page))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// A router holding only the order route, for mounting into an existing
/// application:
///
/// ```rust,ignore
/// let app = Router::new()
///     .nest("/api/agnopay/orders", order_route_handler(&secret_key));
/// ```
pub fn order_route_handler(api_key: &str) -> Router {
    order_routes(Arc::new(init_server(api_key)), SdkConfig::default())
}

/// Same as [`order_route_handler`] around any order backend
pub fn order_routes(orders: BoxedOrderApi, sdk: SdkConfig) -> Router {
    Router::new()
        .route("/", post(handlers::create_order))
        .with_state(AppState::with_orders(orders, sdk))
}

/// Order client for server-side use
pub fn init_server(api_key: &str) -> AgnoPayClient {
    AgnoPayClient::with_api_key(api_key, SdkConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[test]
    fn test_init_server() {
        let client = init_server("sk_test");
        assert_eq!(client.config().auth_header(), "Bearer sk_test");
        assert_eq!(client.config().sdk, SdkConfig::default());
    }

    #[tokio::test]
    async fn test_order_route_handler_rejects_empty_orders() {
        let app = Router::new().nest("/api/agnopay/orders", order_route_handler("sk_test"));

        let response = app
            .oneshot(
                Request::post("/api/agnopay/orders")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"line_items":[]}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
