//! # Request Handlers
//!
//! Axum request handlers for the checkout API: session creation, success
//! reconciliation, and the static cancellation page. Handlers are stateless;
//! every error is turned into a structured JSON body at this boundary.

use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use checkout_core::{
    price_products, reconcile_session, CheckoutError, ProductInput, SessionSpec, ShippingOption,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{error, info, instrument};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create checkout request.
///
/// Field names match the public wire contract (`company-name`,
/// `shipping-cost`); every field is optional at the wire level, and
/// validation happens in the handler.
#[derive(Debug, Deserialize)]
pub struct CreateCheckoutRequest {
    #[serde(rename = "company-name", default)]
    pub company_name: Option<String>,

    /// Products to purchase
    #[serde(default)]
    pub products: Vec<ProductInput>,

    /// Flat shipping cost in major currency units; absent means no shipping
    /// options are offered
    #[serde(rename = "shipping-cost", default)]
    pub shipping_cost: Option<f64>,

    /// Session-level metadata, passed through to the provider verbatim
    #[serde(default)]
    pub metadata: HashMap<String, String>,

    /// Cancel URL; omitted from the provider payload when absent
    #[serde(default)]
    pub cancel_url: Option<String>,

    /// Optional idempotency token forwarded to the provider
    #[serde(default)]
    pub idempotency_key: Option<String>,
}

/// Create checkout response
#[derive(Debug, Serialize)]
pub struct CreateCheckoutResponse {
    /// Hosted checkout page URL (redirect the customer here)
    pub url: String,
}

/// Success-page query parameters
#[derive(Debug, Deserialize)]
pub struct SuccessQuery {
    #[serde(default)]
    pub session_id: Option<String>,

    /// `format=json` returns the assembled reconciliation instead of the
    /// invoice redirect
    #[serde(default)]
    pub format: Option<String>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

fn checkout_error_to_response(err: CheckoutError) -> (StatusCode, Json<ErrorResponse>) {
    let code = err.status_code();
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(ErrorResponse::new(err.to_string())),
    )
}

fn validation_error(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    checkout_error_to_response(CheckoutError::Validation(message.to_string()))
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "checkout-bridge",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Create a hosted checkout session.
///
/// Validation fails fast (company name first, then the products list);
/// no provider call is made once anything is rejected.
#[instrument(skip(state, request), fields(products = request.products.len()))]
pub async fn create_checkout(
    State(state): State<AppState>,
    Json(request): Json<CreateCheckoutRequest>,
) -> Result<Json<CreateCheckoutResponse>, (StatusCode, Json<ErrorResponse>)> {
    let company_name = match request.company_name {
        Some(ref name) if !name.is_empty() => name.clone(),
        _ => return Err(validation_error("Company name is required.")),
    };

    let cart = price_products(&request.products).map_err(checkout_error_to_response)?;
    let subtotal_cents = cart.subtotal_cents;
    let fee_cents = cart.fee.total_cents();

    let spec = SessionSpec {
        company_name,
        line_items: cart.line_items,
        shipping: request.shipping_cost.map(ShippingOption::standard),
        metadata: request.metadata,
        success_url: state.success_url(),
        cancel_url: request.cancel_url,
        idempotency_key: request.idempotency_key,
    };

    info!(
        "Creating checkout session: {} line items, subtotal={}¢, fee={}¢",
        spec.line_items.len(),
        subtotal_cents,
        fee_cents
    );

    let created = state.gateway.create_session(&spec).await.map_err(|e| {
        error!("Failed to create checkout session: {}", e);
        checkout_error_to_response(e)
    })?;

    info!("Created checkout session: {}", created.id);

    Ok(Json(CreateCheckoutResponse { url: created.url }))
}

/// Reconcile a completed session and send the customer to their invoice.
///
/// Default behavior is a 302 to the hosted invoice URL; `format=json`
/// returns the assembled details instead.
#[instrument(skip(state, query))]
pub async fn checkout_success(
    State(state): State<AppState>,
    Query(query): Query<SuccessQuery>,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let session_id = match query.session_id {
        Some(ref id) if !id.is_empty() => id.as_str(),
        _ => return Err(validation_error("Session ID is missing.")),
    };

    let result = reconcile_session(state.gateway.as_ref(), session_id)
        .await
        .map_err(|e| {
            error!("Reconciliation failed for session {}: {}", session_id, e);
            checkout_error_to_response(e)
        })?;

    if query.format.as_deref() == Some("json") {
        return Ok(Json(result).into_response());
    }

    // Literal 302; axum's Redirect helper only offers 303/307/308
    Ok((StatusCode::FOUND, [(header::LOCATION, result.invoice_url)]).into_response())
}

/// Checkout cancellation page
pub async fn checkout_cancel() -> impl IntoResponse {
    Html(
        r#"
<!DOCTYPE html>
<html>
<head><title>Checkout Cancelled</title></head>
<body style="font-family: system-ui; display: flex; justify-content: center; align-items: center; height: 100vh; margin: 0; background: linear-gradient(135deg, #1a1a2e 0%, #16213e 100%);">
    <div style="background: white; padding: 60px; border-radius: 16px; text-align: center;">
        <div style="font-size: 60px;">&#10060;</div>
        <h1>Checkout Cancelled</h1>
        <p style="color: #666;">Your order was not completed and no charges were made.</p>
    </div>
</body>
</html>
"#,
    )
}
