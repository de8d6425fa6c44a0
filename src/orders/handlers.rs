//! Orders tool handlers

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::parameters::{
    CaptureOrderParameters, CreateOrderParameters, OrderIdParameters, validate_order_id,
};
use super::payload::build_order_payload;
use crate::client::PayPalClient;
use crate::error::Result;

/// Orders API collection path
pub const ORDERS_PATH: &str = "/v2/checkout/orders";

/// What `capture_order` and `get_order_details` hand back to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    /// Human-readable outcome
    pub message: String,
    /// Order status reported by PayPal, e.g. `COMPLETED`
    pub status: Option<String>,
    /// First capture amount as `"USD 49.99"`, or `"N/A"`
    pub amount: String,
    /// Full PayPal response
    pub raw: Value,
}

impl OrderSummary {
    /// Summarize an order response
    #[must_use]
    pub fn from_order(message: impl Into<String>, raw: Value) -> Self {
        let status = raw
            .get("status")
            .and_then(Value::as_str)
            .map(str::to_string);
        let amount = raw
            .pointer("/purchase_units/0/payments/captures/0/amount")
            .and_then(|amount| {
                let value = amount.get("value").and_then(Value::as_str)?;
                let currency = amount.get("currency_code").and_then(Value::as_str)?;
                Some(format!("{currency} {value}"))
            })
            .unwrap_or_else(|| "N/A".to_string());

        Self {
            message: message.into(),
            status,
            amount,
            raw,
        }
    }
}

/// Create an order and return PayPal's response (id, status, approval links)
///
/// # Errors
///
/// Returns a parameter error before any request is made, or the client's
/// token/API/HTTP error.
pub async fn create_order(client: &PayPalClient, params: &CreateOrderParameters) -> Result<Value> {
    let payload = build_order_payload(params)?;
    tracing::debug!(
        currency = %params.currency_code,
        items = params.items.len(),
        "Creating PayPal order"
    );
    client.post_json(ORDERS_PATH, Some(&payload)).await
}

/// Capture payment for an approved order
///
/// # Errors
///
/// Returns a parameter error for a malformed id, or the client's
/// token/API/HTTP error.
pub async fn capture_order(
    client: &PayPalClient,
    params: &CaptureOrderParameters,
) -> Result<OrderSummary> {
    validate_order_id(&params.order_id)?;
    let path = format!("{ORDERS_PATH}/{}/capture", params.order_id);
    tracing::debug!(order_id = %params.order_id, "Capturing PayPal order");

    let raw: Value = client.post_json(&path, None).await?;
    Ok(OrderSummary::from_order(
        format!(
            "The PayPal order {} has been successfully captured.",
            params.order_id
        ),
        raw,
    ))
}

/// Fetch an order
///
/// # Errors
///
/// Returns a parameter error for a malformed id, or the client's
/// token/API/HTTP error.
pub async fn get_order_details(
    client: &PayPalClient,
    params: &OrderIdParameters,
) -> Result<OrderSummary> {
    validate_order_id(&params.order_id)?;
    let path = format!("{ORDERS_PATH}/{}", params.order_id);

    let raw: Value = client.get_json(&path).await?;
    Ok(OrderSummary::from_order(
        format!("Retrieved details of PayPal order {}.", params.order_id),
        raw,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_reads_first_capture() {
        let raw = json!({
            "id": "5O190127TN364715T",
            "status": "COMPLETED",
            "purchase_units": [{
                "payments": {"captures": [{
                    "id": "3C679366HH908993F",
                    "amount": {"currency_code": "USD", "value": "49.99"}
                }]}
            }]
        });
        let summary = OrderSummary::from_order("done", raw.clone());
        assert_eq!(summary.status.as_deref(), Some("COMPLETED"));
        assert_eq!(summary.amount, "USD 49.99");
        assert_eq!(summary.raw, raw);
    }

    #[test]
    fn test_summary_without_capture() {
        let summary = OrderSummary::from_order("created", json!({"status": "CREATED"}));
        assert_eq!(summary.amount, "N/A");

        let summary = OrderSummary::from_order("empty", json!(null));
        assert!(summary.status.is_none());
        assert_eq!(summary.amount, "N/A");
    }
}
