//! # AgnoPay Server
//!
//! Standalone order route for front-ends that keep the secret key off the
//! browser.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export AGNOPAY_SECRET_KEY=ak_...
//! export AGNOPAY_WALLET_URL=https://agnowallet.vercel.app   # optional
//!
//! # Run the server
//! agnopay-server
//! ```

use agnopay_server::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("AgnoPay API: {}", state.sdk.api_url);
    info!("AgnoPay wallet: {}", state.sdk.wallet_url);

    let app = routes::create_router(state);

    info!("agnopay-server {} starting on http://{}", env!("CARGO_PKG_VERSION"), addr);

    if !is_prod {
        info!("Orders: POST http://{}/api/agnopay/orders", addr);
        info!("Checkout: GET http://{}/checkout/{{order_id}}", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
