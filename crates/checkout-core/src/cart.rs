//! # Cart Pricing
//!
//! Turns an untrusted list of product descriptors into the priced line-item
//! set for a checkout session: validation, cent conversion, and the
//! processing-fee line item appended after the products.

use crate::error::{CheckoutError, CheckoutResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Processing fee percentage applied to the product subtotal (2.9%)
pub const PROCESSING_FEE_RATE: f64 = 0.029;

/// Fixed processing fee in minor currency units (30¢)
pub const PROCESSING_FEE_FIXED_CENTS: i64 = 30;

/// Display name of the synthetic fee line item
pub const FEE_LINE_NAME: &str = "Stripe Fee";

/// Description shown on the fee line item
pub const FEE_LINE_DESCRIPTION: &str = "Standard Stripe processing fee: 2.9% + 30¢";

/// Image attached to the fee line item
pub const FEE_LINE_IMAGE_URL: &str = "https://images.stripeassets.com/fzn2n1nzq965/HTTOloNPhisV9P4hlMPNA/cacf1bb88b9fc492dfad34378d844280/Stripe_icon_-_square.svg?q=80&w=1082";

/// A product descriptor as it arrives from the client.
///
/// Every field is optional at the wire level; `validate` turns this into a
/// fully-populated [`Product`] or rejects the whole request.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductInput {
    #[serde(default)]
    pub name: Option<String>,

    /// Decimal price in major currency units (dollars)
    #[serde(default)]
    pub price: Option<f64>,

    #[serde(default)]
    pub quantity: Option<i64>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub images: Option<Vec<String>>,

    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl ProductInput {
    /// Validate into a [`Product`].
    ///
    /// Name, price, and quantity are required; price must be a finite,
    /// non-negative number and quantity at least 1. Every violation yields
    /// the same fixed message.
    pub fn validate(&self) -> CheckoutResult<Product> {
        let invalid = || CheckoutError::Validation("Invalid product data.".to_string());

        let name = self.name.clone().ok_or_else(invalid)?;
        let price = self.price.ok_or_else(invalid)?;
        let quantity = self.quantity.ok_or_else(invalid)?;

        if !price.is_finite() || price < 0.0 {
            return Err(invalid());
        }
        if quantity < 1 {
            return Err(invalid());
        }

        Ok(Product {
            name,
            price,
            quantity: quantity as u32,
            description: self.description.clone(),
            images: self.images.clone(),
            metadata: self.metadata.clone(),
        })
    }
}

/// A validated product, ready for pricing
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub name: String,
    /// Decimal price in major currency units
    pub price: f64,
    pub quantity: u32,
    pub description: Option<String>,
    pub images: Option<Vec<String>>,
    pub metadata: HashMap<String, String>,
}

impl Product {
    /// Unit price in minor currency units, rounded half-away-from-zero
    pub fn unit_amount_cents(&self) -> i64 {
        (self.price * 100.0).round() as i64
    }
}

/// A priced, quantified entry within a checkout session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product name (shown on the hosted checkout page)
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,

    /// Unit price in minor currency units (cents)
    pub unit_amount: i64,

    pub quantity: u32,
}

impl LineItem {
    /// Build a line item from a validated product
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            images: product.images.clone(),
            metadata: product.metadata.clone(),
            unit_amount: product.unit_amount_cents(),
            quantity: product.quantity,
        }
    }

    /// Total price for this line item in minor currency units
    pub fn total(&self) -> i64 {
        self.unit_amount * self.quantity as i64
    }
}

/// Processing fee computed once over the product subtotal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeBreakdown {
    /// Percentage component, rounded to whole cents
    pub percent_cents: i64,
    /// Fixed component
    pub fixed_cents: i64,
}

impl FeeBreakdown {
    /// Compute the fee for a product subtotal in minor currency units
    pub fn for_subtotal(subtotal_cents: i64) -> Self {
        Self {
            percent_cents: (subtotal_cents as f64 * PROCESSING_FEE_RATE).round() as i64,
            fixed_cents: PROCESSING_FEE_FIXED_CENTS,
        }
    }

    /// Combined fee in minor currency units
    pub fn total_cents(&self) -> i64 {
        self.percent_cents + self.fixed_cents
    }

    /// The synthetic line item carrying this fee
    pub fn line_item(&self) -> LineItem {
        LineItem {
            name: FEE_LINE_NAME.to_string(),
            description: Some(FEE_LINE_DESCRIPTION.to_string()),
            images: Some(vec![FEE_LINE_IMAGE_URL.to_string()]),
            metadata: HashMap::new(),
            unit_amount: self.total_cents(),
            quantity: 1,
        }
    }
}

/// The fully-priced line-item set for one checkout request.
///
/// `line_items` preserves input order and always ends with the fee item, so
/// it is never empty.
#[derive(Debug, Clone)]
pub struct PricedCart {
    pub line_items: Vec<LineItem>,
    /// Sum of all product line totals, excluding the fee
    pub subtotal_cents: i64,
    pub fee: FeeBreakdown,
}

impl PricedCart {
    /// Total including the fee line item
    pub fn total_cents(&self) -> i64 {
        self.subtotal_cents + self.fee.total_cents()
    }
}

/// Price a cart of untrusted product descriptors.
///
/// Fails fast: the first invalid product aborts the whole request, and no
/// line items survive a partial failure. An empty list is rejected before
/// any product is inspected.
pub fn price_products(products: &[ProductInput]) -> CheckoutResult<PricedCart> {
    if products.is_empty() {
        return Err(CheckoutError::Validation("No products provided.".to_string()));
    }

    let mut line_items = Vec::with_capacity(products.len() + 1);
    let mut subtotal_cents: i64 = 0;

    for input in products {
        let product = input.validate()?;
        let item = LineItem::from_product(&product);
        subtotal_cents += item.total();
        line_items.push(item);
    }

    let fee = FeeBreakdown::for_subtotal(subtotal_cents);
    line_items.push(fee.line_item());

    Ok(PricedCart {
        line_items,
        subtotal_cents,
        fee,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, price: f64, quantity: i64) -> ProductInput {
        ProductInput {
            name: Some(name.to_string()),
            price: Some(price),
            quantity: Some(quantity),
            description: None,
            images: None,
            metadata: HashMap::new(),
        }
    }

    #[test]
    fn test_unit_amount_rounding() {
        let p = product("Widget", 19.99, 1).validate().unwrap();
        assert_eq!(p.unit_amount_cents(), 1999);

        // .5 cases round away from zero
        let p = product("Half", 0.125, 1).validate().unwrap();
        assert_eq!(p.unit_amount_cents(), 13);

        let p = product("Free", 0.0, 1).validate().unwrap();
        assert_eq!(p.unit_amount_cents(), 0);
    }

    #[test]
    fn test_fee_breakdown() {
        // round(3998 * 0.029) = round(115.942) = 116, plus the 30¢ fixed part
        let fee = FeeBreakdown::for_subtotal(3998);
        assert_eq!(fee.percent_cents, 116);
        assert_eq!(fee.total_cents(), 146);

        let fee = FeeBreakdown::for_subtotal(0);
        assert_eq!(fee.total_cents(), 30);

        let fee = FeeBreakdown::for_subtotal(100);
        assert_eq!(fee.percent_cents, 3); // round(2.9)
        assert_eq!(fee.total_cents(), 33);
    }

    #[test]
    fn test_price_products_appends_fee_last() {
        let cart = price_products(&[
            product("Widget", 19.99, 2),
            product("Gadget", 5.00, 1),
        ])
        .unwrap();

        assert_eq!(cart.line_items.len(), 3);
        assert_eq!(cart.subtotal_cents, 3998 + 500);

        let fee_item = cart.line_items.last().unwrap();
        assert_eq!(fee_item.name, FEE_LINE_NAME);
        assert_eq!(fee_item.quantity, 1);
        assert_eq!(fee_item.unit_amount, cart.fee.total_cents());

        // Input order preserved ahead of the fee
        assert_eq!(cart.line_items[0].name, "Widget");
        assert_eq!(cart.line_items[0].unit_amount, 1999);
        assert_eq!(cart.line_items[0].quantity, 2);
        assert_eq!(cart.line_items[1].name, "Gadget");
    }

    #[test]
    fn test_spec_example() {
        // {name: "Widget", price: 19.99, quantity: 2} → 1999 × 2 = 3998,
        // fee = round(3998 * 0.029) + 30 = 146
        let cart = price_products(&[product("Widget", 19.99, 2)]).unwrap();
        assert_eq!(cart.line_items.len(), 2);
        assert_eq!(cart.subtotal_cents, 3998);
        assert_eq!(cart.fee.total_cents(), 146);
        assert_eq!(cart.total_cents(), 4144);
    }

    #[test]
    fn test_empty_products_rejected() {
        let err = price_products(&[]).unwrap_err();
        assert_eq!(err.to_string(), "No products provided.");
    }

    #[test]
    fn test_invalid_product_short_circuits() {
        let mut missing_price = product("Broken", 0.0, 1);
        missing_price.price = None;

        let err = price_products(&[
            product("Widget", 19.99, 2),
            missing_price,
            product("Never reached", 1.00, 1),
        ])
        .unwrap_err();

        assert_eq!(err.to_string(), "Invalid product data.");
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut p = product("Neg", -1.0, 1);
        assert!(p.validate().is_err());

        p = product("Zero qty", 1.0, 0);
        assert!(p.validate().is_err());

        p = product("NaN", f64::NAN, 1);
        assert!(p.validate().is_err());

        let mut no_name = product("x", 1.0, 1);
        no_name.name = None;
        assert!(no_name.validate().is_err());
    }

    #[test]
    fn test_optional_fields_flow_through() {
        let mut p = product("Widget", 10.0, 1);
        p.description = Some("A fine widget".to_string());
        p.images = Some(vec!["https://example.com/widget.png".to_string()]);
        p.metadata.insert("sku".to_string(), "W-1".to_string());

        let cart = price_products(&[p]).unwrap();
        let item = &cart.line_items[0];
        assert_eq!(item.description.as_deref(), Some("A fine widget"));
        assert_eq!(item.images.as_ref().unwrap().len(), 1);
        assert_eq!(item.metadata.get("sku").map(String::as_str), Some("W-1"));

        // Absent optionals stay absent
        let cart = price_products(&[product("Bare", 10.0, 1)]).unwrap();
        assert!(cart.line_items[0].description.is_none());
        assert!(cart.line_items[0].images.is_none());
        assert!(cart.line_items[0].metadata.is_empty());
    }
}
