//! # Checkout Error Types
//!
//! Typed error handling for the checkout-bridge flow.
//! All checkout operations return `Result<T, CheckoutError>`.

use thiserror::Error;

/// Core error type for all checkout operations.
///
/// Display strings for `Upstream` and `Network` carry the underlying message
/// verbatim: handlers forward provider errors to the caller unmodified.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Malformed or missing client input
    #[error("{0}")]
    Validation(String),

    /// Session exists but was never paid
    #[error("Payment not successful")]
    PaymentNotSuccessful,

    /// Payment provider rejected or failed the call
    #[error("{0}")]
    Upstream(String),

    /// Network/HTTP error communicating with the provider
    #[error("{0}")]
    Network(String),

    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Provider response could not be decoded
    #[error("{0}")]
    Serialization(String),
}

impl CheckoutError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            CheckoutError::Validation(_) => 400,
            CheckoutError::PaymentNotSuccessful => 400,
            CheckoutError::Upstream(_) => 500,
            CheckoutError::Network(_) => 500,
            CheckoutError::Configuration(_) => 500,
            CheckoutError::Serialization(_) => 500,
        }
    }

    /// Returns true if the caller is at fault (400-class errors)
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

/// Result type alias for checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;
