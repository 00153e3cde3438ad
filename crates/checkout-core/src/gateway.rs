//! # Payment Gateway Trait
//!
//! The narrow contract to the external payment provider. Session creation
//! and the four retrieval operations are everything this service needs; each
//! call is a single attempt with no retries, and every identifier fed into a
//! lookup comes out of the previous one.

use crate::cart::LineItem;
use crate::error::CheckoutResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// One fixed-amount shipping option offered on the hosted page
#[derive(Debug, Clone, PartialEq)]
pub struct ShippingOption {
    /// Shipping amount in minor currency units
    pub amount_cents: i64,
    pub display_name: String,
}

impl ShippingOption {
    /// Standard shipping from a decimal cost in major currency units.
    ///
    /// The cost is expected to be integral after the cent conversion; any
    /// fractional remainder is truncated toward zero rather than rounded.
    pub fn standard(cost: f64) -> Self {
        Self {
            amount_cents: (cost * 100.0) as i64,
            display_name: "Standard Shipping".to_string(),
        }
    }
}

/// Everything the provider needs to open a hosted checkout session.
///
/// Built fresh per request and immutable once handed to the gateway.
#[derive(Debug, Clone)]
pub struct SessionSpec {
    /// Company name shown on the invoice footer and custom field
    pub company_name: String,

    /// Priced line items, fee item last; never empty
    pub line_items: Vec<LineItem>,

    /// Shipping option; `None` means no shipping choices are offered
    pub shipping: Option<ShippingOption>,

    /// Session-level metadata, passed through verbatim
    pub metadata: HashMap<String, String>,

    /// Success URL template with the provider's session-id placeholder
    pub success_url: String,

    /// Cancel URL; when absent the key is omitted from the outbound payload
    /// so the provider's own default applies
    pub cancel_url: Option<String>,

    /// Caller-supplied idempotency token, forwarded as a header when present
    pub idempotency_key: Option<String>,
}

/// A freshly created hosted checkout session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedSession {
    /// Provider's session ID
    pub id: String,
    /// Hosted checkout page URL to redirect the customer to
    pub url: String,
}

/// A retrieved checkout session, reduced to the fields reconciliation needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDetails {
    pub id: String,

    /// Provider payment status; `"paid"` is the only success value
    pub payment_status: String,

    #[serde(default)]
    pub payment_intent: Option<String>,

    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl SessionDetails {
    /// Check if the session's payment completed
    pub fn is_paid(&self) -> bool {
        self.payment_status == "paid"
    }
}

/// A retrieved payment intent: the bridge from session to invoice/customer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntentDetails {
    #[serde(default)]
    pub invoice: Option<String>,

    #[serde(default)]
    pub customer: Option<String>,
}

/// A retrieved invoice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceDetails {
    /// Provider-served page displaying the finalized invoice
    #[serde(default)]
    pub hosted_invoice_url: Option<String>,

    /// Direct link to the PDF rendition
    #[serde(default)]
    pub invoice_pdf: Option<String>,
}

/// A postal address as the provider reports it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub line1: Option<String>,
    #[serde(default)]
    pub line2: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Shipping details attached to a customer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
}

/// A retrieved customer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerDetails {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub shipping: Option<ShippingInfo>,

    /// Billing address
    #[serde(default)]
    pub address: Option<Address>,
}

/// Contract to the external payment provider.
///
/// Implementations own transport, authentication, and timeouts; callers see
/// only `CheckoutResult` values. The retrieval operations form a dependent
/// chain: session first, then the records it references.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Open a hosted checkout session and return its redirect URL
    async fn create_session(&self, spec: &SessionSpec) -> CheckoutResult<CreatedSession>;

    /// Retrieve a session by its provider ID
    async fn get_session(&self, session_id: &str) -> CheckoutResult<SessionDetails>;

    /// Retrieve the payment intent a session references
    async fn get_payment_intent(&self, intent_id: &str) -> CheckoutResult<PaymentIntentDetails>;

    /// Retrieve the invoice a payment intent references
    async fn get_invoice(&self, invoice_id: &str) -> CheckoutResult<InvoiceDetails>;

    /// Retrieve the customer a payment intent references
    async fn get_customer(&self, customer_id: &str) -> CheckoutResult<CustomerDetails>;
}

/// Type alias for a shared gateway (dynamic dispatch)
pub type BoxedPaymentGateway = Arc<dyn PaymentGateway>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipping_option_conversion() {
        let opt = ShippingOption::standard(5.00);
        assert_eq!(opt.amount_cents, 500);
        assert_eq!(opt.display_name, "Standard Shipping");

        // Fractional remainders truncate, never round up
        let opt = ShippingOption::standard(0.0);
        assert_eq!(opt.amount_cents, 0);
    }

    #[test]
    fn test_session_paid_check() {
        let mut session = SessionDetails {
            id: "cs_test_1".to_string(),
            payment_status: "paid".to_string(),
            payment_intent: Some("pi_1".to_string()),
            metadata: HashMap::new(),
        };
        assert!(session.is_paid());

        session.payment_status = "unpaid".to_string();
        assert!(!session.is_paid());
    }
}
