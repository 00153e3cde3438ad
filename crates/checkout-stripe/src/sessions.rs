//! # Stripe Checkout Sessions
//!
//! Stripe implementation of the `PaymentGateway` contract: hosted checkout
//! session creation plus the session → payment intent → invoice/customer
//! retrieval operations used by reconciliation.

use crate::config::StripeConfig;
use async_trait::async_trait;
use checkout_core::{
    CheckoutError, CheckoutResult, CreatedSession, CustomerDetails, InvoiceDetails,
    PaymentGateway, PaymentIntentDetails, SessionDetails, SessionSpec, ALLOWED_COUNTRIES,
};
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

/// Upper bound for any single call to the Stripe API
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Invoice description shown on every generated invoice
const INVOICE_DESCRIPTION: &str = "Thank you for choosing our services.";

/// Guidance shown next to the shipping-address form on the hosted page
const SHIPPING_ADDRESS_MESSAGE: &str =
    "Please ensure your shipping details are accurate. We cannot modify orders after submission.";

/// Confirmation shown after the customer submits payment
const AFTER_SUBMIT_MESSAGE: &str =
    "By completing your purchase, you confirm your order and agree to the purchase conditions.";

/// Stripe gateway
///
/// Uses Stripe's hosted checkout page for secure payments. One shared HTTP
/// client per instance; every call is a single attempt with a 10s bound.
pub struct StripeGateway {
    config: StripeConfig,
    client: Client,
}

impl StripeGateway {
    /// Create a new Stripe gateway
    pub fn new(config: StripeConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create from environment variables
    pub fn from_env() -> CheckoutResult<Self> {
        let config = StripeConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// Build the form parameters for a session-create call.
    ///
    /// Stripe's form encoding uses bracketed key paths; optional blocks
    /// (cancel URL, shipping option) are omitted entirely when absent so the
    /// provider's own defaults apply.
    fn session_form_params(spec: &SessionSpec) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = vec![
            ("payment_method_types[0]".to_string(), "card".to_string()),
            ("mode".to_string(), "payment".to_string()),
            ("success_url".to_string(), spec.success_url.clone()),
            (
                "billing_address_collection".to_string(),
                "required".to_string(),
            ),
        ];

        if let Some(ref cancel_url) = spec.cancel_url {
            params.push(("cancel_url".to_string(), cancel_url.clone()));
        }

        for (i, item) in spec.line_items.iter().enumerate() {
            params.push((
                format!("line_items[{}][price_data][currency]", i),
                "usd".to_string(),
            ));
            params.push((
                format!("line_items[{}][price_data][unit_amount]", i),
                item.unit_amount.to_string(),
            ));
            params.push((
                format!("line_items[{}][price_data][product_data][name]", i),
                item.name.clone(),
            ));
            if let Some(ref description) = item.description {
                params.push((
                    format!("line_items[{}][price_data][product_data][description]", i),
                    description.clone(),
                ));
            }
            if let Some(ref images) = item.images {
                for (j, image) in images.iter().enumerate() {
                    params.push((
                        format!("line_items[{}][price_data][product_data][images][{}]", i, j),
                        image.clone(),
                    ));
                }
            }
            for (key, value) in &item.metadata {
                params.push((
                    format!(
                        "line_items[{}][price_data][product_data][metadata][{}]",
                        i, key
                    ),
                    value.clone(),
                ));
            }
            params.push((
                format!("line_items[{}][quantity]", i),
                item.quantity.to_string(),
            ));
        }

        for (i, country) in ALLOWED_COUNTRIES.iter().enumerate() {
            params.push((
                format!("shipping_address_collection[allowed_countries][{}]", i),
                (*country).to_string(),
            ));
        }

        params.push(("invoice_creation[enabled]".to_string(), "true".to_string()));
        params.push((
            "invoice_creation[invoice_data][description]".to_string(),
            INVOICE_DESCRIPTION.to_string(),
        ));
        params.push((
            "invoice_creation[invoice_data][footer]".to_string(),
            invoice_footer(&spec.company_name),
        ));
        params.push((
            "invoice_creation[invoice_data][custom_fields][0][name]".to_string(),
            "Company".to_string(),
        ));
        params.push((
            "invoice_creation[invoice_data][custom_fields][0][value]".to_string(),
            spec.company_name.clone(),
        ));

        if let Some(ref shipping) = spec.shipping {
            params.push((
                "shipping_options[0][shipping_rate_data][type]".to_string(),
                "fixed_amount".to_string(),
            ));
            params.push((
                "shipping_options[0][shipping_rate_data][fixed_amount][amount]".to_string(),
                shipping.amount_cents.to_string(),
            ));
            params.push((
                "shipping_options[0][shipping_rate_data][fixed_amount][currency]".to_string(),
                "usd".to_string(),
            ));
            params.push((
                "shipping_options[0][shipping_rate_data][display_name]".to_string(),
                shipping.display_name.clone(),
            ));
        }

        params.push((
            "custom_text[shipping_address][message]".to_string(),
            SHIPPING_ADDRESS_MESSAGE.to_string(),
        ));
        params.push((
            "custom_text[after_submit][message]".to_string(),
            AFTER_SUBMIT_MESSAGE.to_string(),
        ));

        for (key, value) in &spec.metadata {
            params.push((format!("metadata[{}]", key), value.clone()));
        }

        params
    }

    /// GET a Stripe resource and decode its JSON body
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> CheckoutResult<T> {
        let url = format!("{}{}", self.config.api_base_url, path);

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .send()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);
            return Err(provider_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            CheckoutError::Serialization(format!("Failed to parse Stripe response: {}", e))
        })
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    #[instrument(skip(self, spec), fields(line_items = spec.line_items.len()))]
    async fn create_session(&self, spec: &SessionSpec) -> CheckoutResult<CreatedSession> {
        if spec.line_items.is_empty() {
            return Err(CheckoutError::Validation(
                "No products provided.".to_string(),
            ));
        }

        let params = Self::session_form_params(spec);

        debug!(
            "Creating Stripe checkout session: {} line items, {} form params",
            spec.line_items.len(),
            params.len()
        );

        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);

        let mut request = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version);

        if let Some(ref key) = spec.idempotency_key {
            request = request.header("Idempotency-Key", key);
        }

        let response = request
            .form(&params)
            .send()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);
            return Err(provider_error(status, &body));
        }

        let session: SessionCreateResponse = serde_json::from_str(&body).map_err(|e| {
            CheckoutError::Serialization(format!("Failed to parse Stripe response: {}", e))
        })?;

        info!(
            "Created Stripe checkout session: id={}, url={}",
            session.id, session.url
        );

        Ok(CreatedSession {
            id: session.id,
            url: session.url,
        })
    }

    #[instrument(skip(self))]
    async fn get_session(&self, session_id: &str) -> CheckoutResult<SessionDetails> {
        self.get_json(&format!("/v1/checkout/sessions/{}", session_id))
            .await
    }

    #[instrument(skip(self))]
    async fn get_payment_intent(&self, intent_id: &str) -> CheckoutResult<PaymentIntentDetails> {
        self.get_json(&format!("/v1/payment_intents/{}", intent_id))
            .await
    }

    #[instrument(skip(self))]
    async fn get_invoice(&self, invoice_id: &str) -> CheckoutResult<InvoiceDetails> {
        self.get_json(&format!("/v1/invoices/{}", invoice_id)).await
    }

    #[instrument(skip(self))]
    async fn get_customer(&self, customer_id: &str) -> CheckoutResult<CustomerDetails> {
        self.get_json(&format!("/v1/customers/{}", customer_id))
            .await
    }
}

/// Invoice footer: company name plus the current year
fn invoice_footer(company_name: &str) -> String {
    format!(
        "{} © {}. All rights reserved.",
        company_name,
        Utc::now().format("%Y")
    )
}

/// Map a non-2xx Stripe response to an upstream error.
///
/// Stripe errors carry `{"error": {"message": ...}}`; that message is
/// forwarded verbatim. Anything else keeps the raw status and body.
fn provider_error(status: StatusCode, body: &str) -> CheckoutError {
    if let Ok(response) = serde_json::from_str::<StripeErrorResponse>(body) {
        return CheckoutError::Upstream(response.error.message);
    }

    CheckoutError::Upstream(format!("HTTP {}: {}", status, body))
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct SessionCreateResponse {
    id: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeErrorBody,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    message: String,
}
