//! # checkout-core
//!
//! Core types and logic for the checkout-bridge payment flow.
//!
//! This crate provides:
//! - `ProductInput`/`LineItem` and the cart pricing pipeline with the
//!   processing-fee line item
//! - `PaymentGateway` trait: the narrow contract to the payment provider
//! - `reconcile_session` for resolving a completed session into
//!   invoice/customer details
//! - `ALLOWED_COUNTRIES` shipping allow-list
//! - `CheckoutError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use checkout_core::{price_products, SessionSpec, ShippingOption};
//!
//! // Validate and price the incoming cart (fee item appended last)
//! let cart = price_products(&request.products)?;
//!
//! // Compose the session and hand it to a gateway implementation
//! let spec = SessionSpec {
//!     company_name: "Acme".into(),
//!     line_items: cart.line_items,
//!     shipping: Some(ShippingOption::standard(5.00)),
//!     ..
//! };
//! let created = gateway.create_session(&spec).await?;
//!
//! // Redirect the customer to created.url
//! ```

pub mod cart;
pub mod countries;
pub mod error;
pub mod gateway;
pub mod reconcile;

// Re-exports for convenience
pub use cart::{
    price_products, FeeBreakdown, LineItem, PricedCart, Product, ProductInput,
    FEE_LINE_DESCRIPTION, FEE_LINE_IMAGE_URL, FEE_LINE_NAME, PROCESSING_FEE_FIXED_CENTS,
    PROCESSING_FEE_RATE,
};
pub use countries::ALLOWED_COUNTRIES;
pub use error::{CheckoutError, CheckoutResult};
pub use gateway::{
    Address, BoxedPaymentGateway, CreatedSession, CustomerDetails, InvoiceDetails,
    PaymentGateway, PaymentIntentDetails, SessionDetails, SessionSpec, ShippingInfo,
    ShippingOption,
};
pub use reconcile::{reconcile_session, ReconciliationResult};
