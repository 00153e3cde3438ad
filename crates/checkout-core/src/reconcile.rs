//! # Session Reconciliation
//!
//! Resolves a completed checkout session into invoice and customer details
//! through the provider's dependent lookup chain:
//!
//! ```text
//! session ──paid?──▶ payment intent ──▶ invoice
//!                           │
//!                           └─────────▶ customer
//! ```
//!
//! Each identifier is only known once the previous lookup resolves, so the
//! chain is strictly sequential and short-circuits on the first failure.

use crate::error::{CheckoutError, CheckoutResult};
use crate::gateway::{Address, PaymentGateway, ShippingInfo};
use serde::Serialize;
use std::collections::HashMap;

/// Fixed prefix wrapped around any lookup failure in the chain
const RETRIEVE_ERROR_PREFIX: &str = "Failed to retrieve checkout session";

/// Read-only view assembled from the four chained lookups
#[derive(Debug, Clone, Serialize)]
pub struct ReconciliationResult {
    /// Hosted invoice page, the redirect target
    pub invoice_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_pdf_url: Option<String>,

    pub customer_name: Option<String>,

    pub customer_email: Option<String>,

    pub shipping_address: Option<ShippingInfo>,

    pub billing_address: Option<Address>,

    /// Session-level metadata echoed back to the caller
    pub metadata: HashMap<String, String>,
}

/// Reconcile a completed session into invoice/customer details.
///
/// An unpaid session fails with [`CheckoutError::PaymentNotSuccessful`];
/// every other failure, at any step, is re-wrapped as an upstream error
/// carrying the fixed retrieval prefix.
pub async fn reconcile_session(
    gateway: &dyn PaymentGateway,
    session_id: &str,
) -> CheckoutResult<ReconciliationResult> {
    match reconcile_chain(gateway, session_id).await {
        Err(CheckoutError::PaymentNotSuccessful) => Err(CheckoutError::PaymentNotSuccessful),
        Err(other) => Err(CheckoutError::Upstream(format!(
            "{}: {}",
            RETRIEVE_ERROR_PREFIX, other
        ))),
        ok => ok,
    }
}

async fn reconcile_chain(
    gateway: &dyn PaymentGateway,
    session_id: &str,
) -> CheckoutResult<ReconciliationResult> {
    let session = gateway.get_session(session_id).await?;

    if !session.is_paid() {
        return Err(CheckoutError::PaymentNotSuccessful);
    }

    let intent_id = session.payment_intent.as_deref().ok_or_else(|| {
        CheckoutError::Upstream("checkout session has no payment intent".to_string())
    })?;
    let intent = gateway.get_payment_intent(intent_id).await?;

    let invoice_id = intent.invoice.as_deref().ok_or_else(|| {
        CheckoutError::Upstream("payment intent has no invoice".to_string())
    })?;
    let invoice = gateway.get_invoice(invoice_id).await?;

    let customer_id = intent.customer.as_deref().ok_or_else(|| {
        CheckoutError::Upstream("payment intent has no customer".to_string())
    })?;
    let customer = gateway.get_customer(customer_id).await?;

    let invoice_url = invoice.hosted_invoice_url.ok_or_else(|| {
        CheckoutError::Upstream("invoice has no hosted URL".to_string())
    })?;

    Ok(ReconciliationResult {
        invoice_url,
        invoice_pdf_url: invoice.invoice_pdf,
        customer_name: customer.name,
        customer_email: customer.email,
        shipping_address: customer.shipping,
        billing_address: customer.address,
        metadata: session.metadata,
    })
}
