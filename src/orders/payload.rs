//! Builds the v2 Orders request body from [`CreateOrderParameters`]
//!
//! Amounts are computed in minor units (cents) so that the breakdown always
//! adds up to the total PayPal checks it against.

use serde_json::{Map, Value, json};

use super::parameters::{CreateOrderParameters, OrderItem};
use crate::error::{PayPalError, Result};

/// Amounts of one purchase unit, in minor units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakdown {
    /// Sum of unit cost × quantity
    pub item_total: i64,
    /// Sum of per-unit tax × quantity
    pub tax_total: i64,
    /// Shipping cost
    pub shipping: i64,
    /// Discount
    pub discount: i64,
}

impl Breakdown {
    /// Compute the breakdown of an order
    ///
    /// # Errors
    ///
    /// Returns [`PayPalError::InvalidParameters`] if a sum overflows.
    pub fn of(params: &CreateOrderParameters) -> Result<Self> {
        let mut item_total: i64 = 0;
        let mut tax_total: i64 = 0;
        for item in &params.items {
            let quantity = i64::from(item.quantity);
            item_total = unit_cents(item)
                .checked_mul(quantity)
                .and_then(|line| item_total.checked_add(line))
                .ok_or_else(too_large)?;
            tax_total = unit_tax_cents(item)
                .checked_mul(quantity)
                .and_then(|line| tax_total.checked_add(line))
                .ok_or_else(too_large)?;
        }
        Ok(Self {
            item_total,
            tax_total,
            shipping: to_cents(params.shipping_cost),
            discount: to_cents(params.discount),
        })
    }

    /// Amount the payer is charged
    ///
    /// # Errors
    ///
    /// Returns [`PayPalError::InvalidParameters`] if the sum overflows.
    pub fn total(&self) -> Result<i64> {
        self.item_total
            .checked_add(self.tax_total)
            .and_then(|sum| sum.checked_add(self.shipping))
            .and_then(|sum| sum.checked_sub(self.discount))
            .ok_or_else(too_large)
    }
}

fn too_large() -> PayPalError {
    PayPalError::invalid_parameters("amount too large")
}

/// Build the JSON body of `POST /v2/checkout/orders`
///
/// # Errors
///
/// Returns [`PayPalError::InvalidParameters`] if the parameters fail
/// validation, the discount exceeds the order total, or the amounts
/// overflow.
pub fn build_order_payload(params: &CreateOrderParameters) -> Result<Value> {
    params.validate()?;

    let currency = params.currency_code.as_str();
    let breakdown = Breakdown::of(params)?;
    let total = breakdown.total()?;
    if total < 0 {
        return Err(PayPalError::invalid_parameters(
            "discount exceeds the order total",
        ));
    }

    let items: Vec<Value> = params
        .items
        .iter()
        .map(|item| {
            let mut line = json!({
                "name": item.name,
                "quantity": item.quantity.to_string(),
                "unit_amount": money(currency, unit_cents(item)),
                "tax": money(currency, unit_tax_cents(item)),
            });
            if let Some(description) = &item.description {
                line["description"] = json!(description);
            }
            line
        })
        .collect();

    let mut purchase_unit = json!({
        "amount": {
            "currency_code": currency,
            "value": format_cents(total),
            "breakdown": {
                "item_total": money(currency, breakdown.item_total),
                "tax_total": money(currency, breakdown.tax_total),
                "shipping": money(currency, breakdown.shipping),
                "discount": money(currency, breakdown.discount),
            }
        },
        "items": items,
    });
    if let Some(notes) = &params.notes {
        purchase_unit["description"] = json!(notes);
    }
    if let Some(address) = &params.shipping_address {
        purchase_unit["shipping"] = json!({ "address": address });
    }

    let mut payload = json!({
        "intent": "CAPTURE",
        "purchase_units": [purchase_unit],
    });

    let mut experience = Map::new();
    if let Some(return_url) = &params.return_url {
        experience.insert("return_url".to_string(), json!(return_url));
    }
    if let Some(cancel_url) = &params.cancel_url {
        experience.insert("cancel_url".to_string(), json!(cancel_url));
    }
    if !experience.is_empty() {
        payload["payment_source"] = json!({
            "paypal": { "experience_context": experience }
        });
    }

    Ok(payload)
}

/// PayPal money object
fn money(currency: &str, cents: i64) -> Value {
    json!({ "currency_code": currency, "value": format_cents(cents) })
}

#[allow(clippy::cast_possible_truncation)]
fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

fn unit_cents(item: &OrderItem) -> i64 {
    to_cents(item.item_cost)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn unit_tax_cents(item: &OrderItem) -> i64 {
    (unit_cents(item) as f64 * item.tax_percent / 100.0).round() as i64
}

/// Render non-negative minor units as `123.45`
#[must_use]
pub fn format_cents(cents: i64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}
