//! Error types for the PayPal agent toolkit

use thiserror::Error;

/// Main error type for the PayPal agent toolkit
#[derive(Error, Debug)]
pub enum PayPalError {
    /// The OAuth2 client-credentials exchange failed
    ///
    /// Carries the provider's `error_description` when PayPal returned one,
    /// otherwise the transport-level message.
    #[error("Failed to fetch access token: {0}")]
    TokenExchange(String),

    /// PayPal answered a REST call with a non-success status
    #[error("PayPal API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Provider message, or the raw response body
        message: String,
    },

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON encode/decode error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Tool arguments failed validation
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Tool method is unknown or disabled by the configuration
    #[error("Tool not found or not enabled: {0}")]
    ToolNotFound(String),
}

/// Result type alias for toolkit operations
pub type Result<T> = std::result::Result<T, PayPalError>;

impl PayPalError {
    /// Create a token exchange error
    pub fn token_exchange(msg: impl Into<String>) -> Self {
        Self::TokenExchange(msg.into())
    }

    /// Create an API error from a status code and message
    pub fn api(status: u16, msg: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: msg.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an invalid parameters error
    pub fn invalid_parameters(msg: impl Into<String>) -> Self {
        Self::InvalidParameters(msg.into())
    }

    /// Create a tool not found error
    pub fn tool_not_found(method: impl Into<String>) -> Self {
        Self::ToolNotFound(method.into())
    }

    /// Whether this error came from the token endpoint
    #[must_use]
    pub fn is_token_exchange(&self) -> bool {
        matches!(self, Self::TokenExchange(_))
    }
}
