//! Caller-supplied request context

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use typed_builder::TypedBuilder;

use super::environment::Environment;

/// Environment variable selecting sandbox (default) or production
pub const ENV_SANDBOX: &str = "PAYPAL_SANDBOX";
/// Environment variable enabling verbose SDK logging
pub const ENV_DEBUG: &str = "PAYPAL_DEBUG";
/// Environment variable carrying a `PayPal-Request-Id`
pub const ENV_REQUEST_ID: &str = "PAYPAL_REQUEST_ID";
/// Environment variable carrying the merchant id
pub const ENV_MERCHANT_ID: &str = "PAYPAL_MERCHANT_ID";

/// Settings the caller hands to a [`PayPalClient`](crate::PayPalClient).
///
/// The client only reads the context. Unset flags fall back to their
/// defaults: sandbox on, debug off.
///
/// ```
/// use paypal_agent_toolkit::Context;
/// use serde_json::json;
///
/// let context = Context::builder()
///     .request_id("order-42")
///     .tenant_context(json!({"tenant_id": "acme"}))
///     .build();
///
/// assert!(context.sandbox());
/// assert!(!context.debug_enabled());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[builder(
    builder_method(doc = "Create a new builder for Context"),
    builder_type(doc = "Builder for Context", vis = "pub"),
    build_method(doc = "Build the Context")
)]
pub struct Context {
    /// Use the sandbox environment (default: true)
    #[serde(rename = "isSandbox", alias = "sandbox", skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub is_sandbox: Option<bool>,

    /// Enable verbose request/response logging (default: false)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub debug: Option<bool>,

    /// Value forwarded as the `PayPal-Request-Id` header
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option, into))]
    pub request_id: Option<String>,

    /// Arbitrary JSON forwarded, serialized, as `PayPal-Tenant-Context`
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option, into))]
    pub tenant_context: Option<Value>,

    /// Merchant the calls are made on behalf of
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option, into))]
    pub merchant_id: Option<String>,

    /// Any further caller keys, kept verbatim
    #[serde(flatten)]
    #[builder(default)]
    pub extra: HashMap<String, Value>,
}

impl Context {
    /// Whether the sandbox environment is selected
    #[must_use]
    pub fn sandbox(&self) -> bool {
        self.is_sandbox.unwrap_or(true)
    }

    /// Whether verbose SDK logging is requested
    #[must_use]
    pub fn debug_enabled(&self) -> bool {
        self.debug.unwrap_or(false)
    }

    /// The environment selected by the sandbox flag
    #[must_use]
    pub fn environment(&self) -> Environment {
        Environment::from_sandbox(self.sandbox())
    }

    /// The request id, if set and non-empty
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref().filter(|id| !id.is_empty())
    }

    /// The tenant context, if set and not JSON `null`
    #[must_use]
    pub fn tenant_context(&self) -> Option<&Value> {
        self.tenant_context.as_ref().filter(|value| !value.is_null())
    }

    /// Load a context from `PAYPAL_*` environment variables
    ///
    /// Reads [`ENV_SANDBOX`], [`ENV_DEBUG`], [`ENV_REQUEST_ID`] and
    /// [`ENV_MERCHANT_ID`]. Missing variables leave the field unset.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load a context through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            is_sandbox: lookup(ENV_SANDBOX).and_then(|v| parse_flag(&v)),
            debug: lookup(ENV_DEBUG).and_then(|v| parse_flag(&v)),
            request_id: lookup(ENV_REQUEST_ID),
            merchant_id: lookup(ENV_MERCHANT_ID),
            ..Self::default()
        }
    }
}

/// Parse a boolean-ish environment value
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
