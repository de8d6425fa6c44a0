//! PayPal Orders v2 tools
//!
//! Three operations backed by [`PayPalClient`](crate::PayPalClient):
//!
//! - [`create_order`]: `POST /v2/checkout/orders`
//! - [`capture_order`]: `POST /v2/checkout/orders/{id}/capture`
//! - [`get_order_details`]: `GET /v2/checkout/orders/{id}`
//!
//! # Example
//!
//! ```no_run
//! use paypal_agent_toolkit::orders::{CreateOrderParameters, create_order};
//! use paypal_agent_toolkit::{Context, PayPalClient};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PayPalClient::new("CLIENT_ID", "CLIENT_SECRET", Context::default());
//! let params: CreateOrderParameters = serde_json::from_value(json!({
//!     "currency_code": "USD",
//!     "items": [{"name": "Hoodie", "item_cost": 49.99}]
//! }))?;
//!
//! let order = create_order(&client, &params).await?;
//! println!("order id: {}", order["id"]);
//! # Ok(())
//! # }
//! ```

mod handlers;
mod parameters;
mod payload;

pub use handlers::{ORDERS_PATH, OrderSummary, capture_order, create_order, get_order_details};
pub use parameters::{
    CaptureOrderParameters, CreateOrderParameters, OrderIdParameters, OrderItem, ShippingAddress,
};
pub use payload::{Breakdown, build_order_payload, format_cents};
