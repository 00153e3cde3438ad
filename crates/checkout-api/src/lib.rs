//! # checkout-api
//!
//! HTTP API layer for checkout-bridge.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - REST endpoints for checkout session creation and reconciliation
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | POST | `/checkout` | Create a hosted checkout session |
//! | GET | `/checkout/success` | Reconcile a completed session |
//! | GET | `/checkout/cancel` | Cancellation page |
//! | GET | `/health` | Health check |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
