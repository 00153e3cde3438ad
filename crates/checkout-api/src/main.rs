//! # Checkout-Bridge RS
//!
//! Hosted checkout session builder and reconciler.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export STRIPE_SECRET_KEY=sk_test_...
//!
//! # Run the server
//! checkout-bridge
//! ```

use checkout_api::{routes, state::AppState};
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

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr();
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Callback base URL: {}", state.config.base_url);

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("Checkout-Bridge starting on http://{}", addr);

    if !is_prod {
        info!("Checkout: POST http://{}/checkout", addr);
        info!("Success:  GET  http://{}/checkout/success", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
