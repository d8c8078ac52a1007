//! # agnopay-server
//!
//! Server-side helper for the AgnoPay SDK.
//!
//! This crate provides:
//! - An Axum route creating orders with a secret key held on the server
//! - Request validation (non-empty `line_items`) before the API is called
//! - A standalone page embedding the hosted checkout
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/agnopay/orders` | Create order |
//! | GET | `/checkout/{order_id}` | Embedded checkout page |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::{create_router, init_server, order_route_handler, order_routes};
pub use state::{AppConfig, AppState};
