//! Toolkit configuration and tool gating

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::context::Context;

/// Product → action → enabled, e.g. `{"orders": {"create": true}}`
pub type ActionMap = HashMap<String, HashMap<String, bool>>;

/// Which tools a [`PayPalToolkit`](crate::PayPalToolkit) exposes, and the
/// context its client is built with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// Enabled actions per product
    #[serde(default)]
    pub actions: ActionMap,
    /// Context for the underlying client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
}

impl Configuration {
    /// Create an empty configuration (every tool disabled)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable one action of a product
    #[must_use]
    pub fn with_action(
        mut self,
        product: impl Into<String>,
        action: impl Into<String>,
        enabled: bool,
    ) -> Self {
        self.actions
            .entry(product.into())
            .or_default()
            .insert(action.into(), enabled);
        self
    }

    /// Set the client context
    #[must_use]
    pub fn with_context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    /// Whether `product.action` is switched on
    #[must_use]
    pub fn is_enabled(&self, product: &str, action: &str) -> bool {
        self.actions
            .get(product)
            .and_then(|actions| actions.get(action))
            .copied()
            .unwrap_or(false)
    }
}

/// A tool is allowed when any action it declares is enabled in the
/// configuration. The flag values the tool itself declares are ignored.
#[must_use]
pub fn is_tool_allowed(tool_actions: &ActionMap, configuration: &Configuration) -> bool {
    tool_actions.iter().any(|(product, actions)| {
        actions
            .keys()
            .any(|action| configuration.is_enabled(product, action))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tool(product: &str, action: &str) -> ActionMap {
        let mut actions = ActionMap::new();
        actions
            .entry(product.to_string())
            .or_default()
            .insert(action.to_string(), true);
        actions
    }

    #[test]
    fn test_allowed_when_enabled() {
        let config = Configuration::new().with_action("orders", "create", true);
        assert!(is_tool_allowed(&tool("orders", "create"), &config));
    }

    #[test]
    fn test_denied_when_disabled_or_missing() {
        let config = Configuration::new().with_action("orders", "create", false);
        assert!(!is_tool_allowed(&tool("orders", "create"), &config));
        assert!(!is_tool_allowed(&tool("orders", "capture"), &config));
        assert!(!is_tool_allowed(&tool("invoices", "create"), &config));
    }

    #[test]
    fn test_any_action_suffices() {
        let mut actions = tool("orders", "get");
        actions
            .entry("orders".to_string())
            .or_default()
            .insert("capture".to_string(), true);
        let config = Configuration::new().with_action("orders", "capture", true);
        assert!(is_tool_allowed(&actions, &config));
    }

    #[test]
    fn test_deserialize() {
        let config: Configuration = serde_json::from_value(json!({
            "actions": {"orders": {"create": true, "get": false}},
            "context": {"isSandbox": true, "request_id": "r"}
        }))
        .unwrap();
        assert!(config.is_enabled("orders", "create"));
        assert!(!config.is_enabled("orders", "get"));
        assert_eq!(
            config.context.as_ref().and_then(Context::request_id),
            Some("r")
        );
    }
}
