//! Arguments accepted by the Orders tools

use serde::{Deserialize, Serialize};

use crate::error::{PayPalError, Result};

/// One line item of a new order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Item name
    pub name: String,
    /// Item description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Number of units (default 1)
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// Cost of one unit, before tax
    pub item_cost: f64,
    /// Tax rate applied to the unit cost, in percent
    #[serde(default)]
    pub tax_percent: f64,
}

fn default_quantity() -> u32 {
    1
}

/// Shipping address of a new order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingAddress {
    /// Street address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line_1: Option<String>,
    /// Apartment, suite, etc.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line_2: Option<String>,
    /// City or town
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_area_2: Option<String>,
    /// State or province
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_area_1: Option<String>,
    /// Postal code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// Two-letter ISO 3166-1 country code
    pub country_code: String,
}

/// Arguments of `create_order`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderParameters {
    /// Three-letter ISO 4217 currency code, e.g. `USD`
    pub currency_code: String,
    /// Line items (at least one)
    pub items: Vec<OrderItem>,
    /// Discount taken off the order total
    #[serde(default)]
    pub discount: f64,
    /// Shipping cost added to the order total
    #[serde(default)]
    pub shipping_cost: f64,
    /// Where to ship
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<ShippingAddress>,
    /// Free-form note shown to the payer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Where PayPal sends the payer after approval
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    /// Where PayPal sends the payer after cancelling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_url: Option<String>,
}

impl CreateOrderParameters {
    /// Check the arguments before any payload is built
    ///
    /// # Errors
    ///
    /// Returns [`PayPalError::InvalidParameters`] describing the first
    /// problem found.
    pub fn validate(&self) -> Result<()> {
        if self.currency_code.len() != 3
            || !self.currency_code.chars().all(|c| c.is_ascii_uppercase())
        {
            return Err(PayPalError::invalid_parameters(format!(
                "currency_code must be a three-letter uppercase ISO code, got {:?}",
                self.currency_code
            )));
        }
        if self.items.is_empty() {
            return Err(PayPalError::invalid_parameters("items must not be empty"));
        }
        for item in &self.items {
            if item.name.trim().is_empty() {
                return Err(PayPalError::invalid_parameters("item name must not be empty"));
            }
            if item.quantity == 0 {
                return Err(PayPalError::invalid_parameters(format!(
                    "quantity of {:?} must be at least 1",
                    item.name
                )));
            }
            check_amount(&format!("item_cost of {:?}", item.name), item.item_cost)?;
            check_range(
                &format!("tax_percent of {:?}", item.name),
                item.tax_percent,
                MAX_TAX_PERCENT,
            )?;
        }
        check_amount("discount", self.discount)?;
        check_amount("shipping_cost", self.shipping_cost)?;
        if let Some(address) = &self.shipping_address {
            if address.country_code.len() != 2 {
                return Err(PayPalError::invalid_parameters(
                    "shipping_address.country_code must be a two-letter code",
                ));
            }
        }
        Ok(())
    }
}

/// Largest amount PayPal accepts in a money field
pub const MAX_AMOUNT: f64 = 9_999_999.99;
/// Largest accepted tax rate, in percent
pub const MAX_TAX_PERCENT: f64 = 100.0;

fn check_amount(field: &str, value: f64) -> Result<()> {
    check_range(field, value, MAX_AMOUNT)
}

fn check_range(field: &str, value: f64, max: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(PayPalError::invalid_parameters(format!(
            "{field} must be a non-negative number"
        )));
    }
    if value > max {
        return Err(PayPalError::invalid_parameters(format!(
            "{field} must not exceed {max}"
        )));
    }
    Ok(())
}

/// Arguments of `capture_order`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureOrderParameters {
    /// Id of an approved order
    pub order_id: String,
}

/// Arguments of `get_order_details`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderIdParameters {
    /// Id of the order
    pub order_id: String,
}

/// Reject ids that would escape the `/v2/checkout/orders/{id}` path
pub(crate) fn validate_order_id(order_id: &str) -> Result<()> {
    if order_id.is_empty()
        || !order_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(PayPalError::invalid_parameters(format!(
            "invalid order_id {order_id:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> CreateOrderParameters {
        serde_json::from_value(json!({
            "currency_code": "USD",
            "items": [{"name": "Hoodie", "item_cost": 49.99}]
        }))
        .unwrap()
    }

    #[test]
    fn test_defaults_from_json() {
        let params = sample();
        assert_eq!(params.items[0].quantity, 1);
        assert_eq!(params.items[0].tax_percent, 0.0);
        assert_eq!(params.discount, 0.0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_currency() {
        let mut params = sample();
        params.currency_code = "usd".to_string();
        assert!(matches!(
            params.validate(),
            Err(PayPalError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_rejects_empty_items_and_zero_quantity() {
        let mut params = sample();
        params.items[0].quantity = 0;
        assert!(params.validate().is_err());

        params.items.clear();
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("items must not be empty"));
    }

    #[test]
    fn test_rejects_negative_amounts() {
        let mut params = sample();
        params.shipping_cost = -1.0;
        assert!(params.validate().is_err());

        let mut params = sample();
        params.items[0].item_cost = f64::NAN;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_rejects_amounts_above_ceiling() {
        let mut params = sample();
        params.items[0].item_cost = 1e17;
        params.items[0].quantity = 2;
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("must not exceed"));

        let mut params = sample();
        params.items[0].item_cost = MAX_AMOUNT;
        assert!(params.validate().is_ok());

        let mut params = sample();
        params.items[0].tax_percent = 250.0;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_validate_order_id() {
        assert!(validate_order_id("5O190127TN364715T").is_ok());
        assert!(validate_order_id("").is_err());
        assert!(validate_order_id("../v1/oauth2/token").is_err());
    }
}
