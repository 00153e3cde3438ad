//! # checkout-stripe
//!
//! Stripe implementation of the checkout-bridge `PaymentGateway` contract.
//!
//! This crate talks to the Stripe REST API directly over `reqwest`:
//! session creation goes out as the provider's bracketed form encoding, and
//! the retrieval operations (session, payment intent, invoice, customer)
//! decode the minimal JSON slices reconciliation needs.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use checkout_stripe::StripeGateway;
//! use checkout_core::PaymentGateway;
//!
//! // Create gateway from environment (STRIPE_SECRET_KEY)
//! let gateway = StripeGateway::from_env()?;
//!
//! // Open a hosted checkout session
//! let created = gateway.create_session(&spec).await?;
//!
//! // Redirect the customer to created.url
//! ```

pub mod config;
pub mod sessions;

// Re-exports
pub use config::StripeConfig;
pub use sessions::StripeGateway;
