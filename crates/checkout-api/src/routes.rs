//! # Routes
//!
//! Axum router configuration for the checkout API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - POST /checkout          - Create a hosted checkout session
/// - GET  /checkout/success  - Reconcile a completed session (invoice redirect)
/// - GET  /checkout/cancel   - Static cancellation page
/// - GET  /health            - Health check
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - allow all origins for now
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/checkout", post(handlers::create_checkout))
        .route("/checkout/success", get(handlers::checkout_success))
        .route("/checkout/cancel", get(handlers::checkout_cancel))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
