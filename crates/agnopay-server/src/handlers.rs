//! # Request Handlers
//!
//! Axum request handlers wrapping the order client for browser front-ends.

use crate::state::AppState;
use agnopay_core::{
    AgnoPayError, CheckoutFrame, CheckoutOptions, CreateOrderRequest, CreateOrderResponse,
    ErrorEnvelope, IframeStyle, GENERIC_ORDER_FAILURE,
};
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

/// Message returned when an order request has no items
pub const EMPTY_LINE_ITEMS: &str = "line_items is required and cannot be empty";

/// Error response: `{ "error": { message, code?, details? } }`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorEnvelope,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: ErrorEnvelope::new(message),
        }
    }
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: impl Into<String>) -> HandlerError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message)))
}

/// Client-side failures are relayed as 400 with their envelope; anything
/// unexpected becomes a 500 with a generic message.
fn agnopay_error_to_response(err: AgnoPayError) -> HandlerError {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if status.is_server_error() {
        return (status, Json(ErrorResponse::new(GENERIC_ORDER_FAILURE)));
    }

    (
        status,
        Json(ErrorResponse {
            error: err.to_envelope(),
        }),
    )
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "agnopay-server",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Create an order on behalf of the caller
#[instrument(skip(state, body))]
pub async fn create_order(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CreateOrderResponse>, HandlerError> {
    let request: CreateOrderRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!("Rejecting malformed order request: {}", e);
        bad_request(format!("Invalid request body: {}", e))
    })?;

    if request.is_empty() {
        return Err(bad_request(EMPTY_LINE_ITEMS));
    }

    info!(
        "Creating order: {} items, total={:?}",
        request.line_items.len(),
        request.total_amount()
    );

    let order = state.orders.create_order(&request).await.map_err(|e| {
        error!("Order creation error: {}", e);
        agnopay_error_to_response(e)
    })?;

    Ok(Json(order))
}

/// Standalone page embedding the hosted checkout for an order
#[instrument(skip(state, style))]
pub async fn checkout_page(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    Query(style): Query<IframeStyle>,
) -> Result<Html<String>, HandlerError> {
    let options = CheckoutOptions::new(order_id).with_style(style);
    let frame = CheckoutFrame::new(&state.sdk, &options).map_err(|e| {
        error!("Failed to build checkout frame: {}", e);
        agnopay_error_to_response(e)
    })?;

    Ok(Html(format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Checkout</title></head>
<body style="margin: 0;">
{}
</body>
</html>
"#,
        frame.render_html()
    )))
}
