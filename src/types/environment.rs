//! PayPal API environments

use serde::{Deserialize, Serialize};

/// Base URL of the PayPal sandbox REST API
pub const SANDBOX_BASE_URL: &str = "https://api.sandbox.paypal.com";

/// Base URL of the PayPal production REST API
pub const PRODUCTION_BASE_URL: &str = "https://api.paypal.com";

/// The PayPal environment a client talks to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Test environment (default)
    #[default]
    Sandbox,
    /// Live environment
    Production,
}

impl Environment {
    /// Select the environment from a sandbox flag
    #[must_use]
    pub fn from_sandbox(is_sandbox: bool) -> Self {
        if is_sandbox {
            Self::Sandbox
        } else {
            Self::Production
        }
    }

    /// REST API base URL for this environment (no trailing slash)
    #[must_use]
    pub fn base_url(self) -> &'static str {
        match self {
            Self::Sandbox => SANDBOX_BASE_URL,
            Self::Production => PRODUCTION_BASE_URL,
        }
    }

    /// Whether this is the sandbox environment
    #[must_use]
    pub fn is_sandbox(self) -> bool {
        matches!(self, Self::Sandbox)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sandbox => write!(f, "sandbox"),
            Self::Production => write!(f, "production"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_sandbox() {
        assert_eq!(Environment::from_sandbox(true), Environment::Sandbox);
        assert_eq!(Environment::from_sandbox(false), Environment::Production);
        assert_eq!(Environment::default(), Environment::Sandbox);
    }

    #[test]
    fn test_base_urls() {
        assert_eq!(
            Environment::Sandbox.base_url(),
            "https://api.sandbox.paypal.com"
        );
        assert_eq!(Environment::Production.base_url(), "https://api.paypal.com");
    }
}
