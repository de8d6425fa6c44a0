//! Tool registry and dispatcher
//!
//! [`tools`] lists every tool this crate can expose. A [`PayPalToolkit`]
//! keeps the ones its [`Configuration`] enables and runs them by method name,
//! taking JSON arguments and returning a JSON string, which is the shape
//! agent frameworks pass around.
//!
//! # Example
//!
//! ```no_run
//! use paypal_agent_toolkit::{Configuration, PayPalToolkit};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let configuration = Configuration::new()
//!     .with_action("orders", "create", true)
//!     .with_action("orders", "get", true);
//! let toolkit = PayPalToolkit::new("CLIENT_ID", "CLIENT_SECRET", configuration);
//!
//! for tool in toolkit.tools() {
//!     println!("{}: {}", tool.method, tool.description);
//! }
//!
//! let details = toolkit
//!     .run("orders.get", r#"{"order_id": "5O190127TN364715T"}"#)
//!     .await?;
//! println!("{details}");
//! # Ok(())
//! # }
//! ```

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;

use crate::client::PayPalClient;
use crate::error::{PayPalError, Result};
use crate::orders::{self, CaptureOrderParameters, CreateOrderParameters, OrderIdParameters};
use crate::types::{ActionMap, Configuration, is_tool_allowed};

/// `orders.create`
pub const CREATE_ORDER: &str = "orders.create";
/// `orders.capture`
pub const CAPTURE_ORDER: &str = "orders.capture";
/// `orders.get`
pub const GET_ORDER: &str = "orders.get";

/// A tool the toolkit can expose
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    /// Dispatch key, e.g. `orders.create`
    pub method: String,
    /// Display name
    pub name: String,
    /// What the tool does, written for a language model
    pub description: String,
    /// Product/action pairs that enable this tool
    pub actions: ActionMap,
}

impl ToolDefinition {
    fn new(method: &str, name: &str, description: &str, product: &str, action: &str) -> Self {
        let mut actions = ActionMap::new();
        actions.insert(
            product.to_string(),
            HashMap::from([(action.to_string(), true)]),
        );
        Self {
            method: method.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            actions,
        }
    }
}

/// Every tool known to the crate
#[must_use]
pub fn tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            CREATE_ORDER,
            "Create PayPal Order",
            "Create an order in PayPal. Takes a currency code, line items with cost, \
             quantity and tax percent, and optional discount, shipping cost, shipping \
             address, notes and return/cancel URLs. Returns the order, including the \
             approval link the buyer must follow.",
            "orders",
            "create",
        ),
        ToolDefinition::new(
            CAPTURE_ORDER,
            "Capture PayPal Order",
            "Capture payment for an order the buyer has approved. Takes the order id.",
            "orders",
            "capture",
        ),
        ToolDefinition::new(
            GET_ORDER,
            "Get PayPal Order Details",
            "Retrieve the status and amounts of a PayPal order. Takes the order id.",
            "orders",
            "get",
        ),
    ]
}

/// Tools filtered by configuration, bound to one [`PayPalClient`]
#[derive(Debug)]
pub struct PayPalToolkit {
    client: PayPalClient,
    tools: Vec<ToolDefinition>,
}

impl PayPalToolkit {
    /// Build a client from credentials and the configuration's context
    /// (default context when absent)
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        configuration: Configuration,
    ) -> Self {
        let context = configuration.context.clone().unwrap_or_default();
        let client = PayPalClient::new(client_id, client_secret, context);
        Self::from_client(client, &configuration)
    }

    /// Wrap an existing client
    #[must_use]
    pub fn from_client(client: PayPalClient, configuration: &Configuration) -> Self {
        let tools: Vec<ToolDefinition> = tools()
            .into_iter()
            .filter(|tool| is_tool_allowed(&tool.actions, configuration))
            .collect();
        tracing::debug!(
            enabled = ?tools.iter().map(|t| t.method.as_str()).collect::<Vec<_>>(),
            "Configured PayPal toolkit"
        );
        Self { client, tools }
    }

    /// The enabled tools
    #[must_use]
    pub fn tools(&self) -> &[ToolDefinition] {
        &self.tools
    }

    /// The underlying client
    #[must_use]
    pub fn client(&self) -> &PayPalClient {
        &self.client
    }

    /// Run an enabled tool
    ///
    /// `arguments` is the tool's JSON argument object; the result is the
    /// handler's output serialized to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PayPalError::ToolNotFound`] for unknown or disabled methods,
    /// [`PayPalError::InvalidParameters`] when the arguments do not decode,
    /// and whatever the handler returns otherwise.
    pub async fn run(&self, method: &str, arguments: &str) -> Result<String> {
        if !self.tools.iter().any(|tool| tool.method == method) {
            return Err(PayPalError::tool_not_found(method));
        }
        tracing::info!(method = %method, "Running PayPal tool");

        match method {
            CREATE_ORDER => {
                let params: CreateOrderParameters = parse_arguments(method, arguments)?;
                to_json(&orders::create_order(&self.client, &params).await?)
            }
            CAPTURE_ORDER => {
                let params: CaptureOrderParameters = parse_arguments(method, arguments)?;
                to_json(&orders::capture_order(&self.client, &params).await?)
            }
            GET_ORDER => {
                let params: OrderIdParameters = parse_arguments(method, arguments)?;
                to_json(&orders::get_order_details(&self.client, &params).await?)
            }
            _ => Err(PayPalError::tool_not_found(method)),
        }
    }
}

/// Decode tool arguments, unwrapping a `{"kwargs": {...}}` envelope some
/// agent frameworks wrap them in
fn parse_arguments<T: DeserializeOwned>(method: &str, arguments: &str) -> Result<T> {
    let invalid = |e: serde_json::Error| PayPalError::invalid_parameters(format!("{method}: {e}"));
    let mut value: Value = serde_json::from_str(arguments).map_err(invalid)?;
    if let Some(inner) = value
        .get_mut("kwargs")
        .filter(|inner| inner.is_object())
        .map(Value::take)
    {
        value = inner;
    }
    serde_json::from_value(value).map_err(invalid)
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}
