//! Client-credential pair for the OAuth2 client-credentials grant

use base64::{Engine, engine::general_purpose::STANDARD};
use secrecy::{ExposeSecret, SecretString};

use crate::error::{PayPalError, Result};

/// Environment variable holding the REST app client id
pub const ENV_CLIENT_ID: &str = "PAYPAL_CLIENT_ID";
/// Environment variable holding the REST app client secret
pub const ENV_CLIENT_SECRET: &str = "PAYPAL_CLIENT_SECRET";

/// PayPal REST app credentials
///
/// The secret is kept in a [`SecretString`] so it never shows up in
/// `Debug` output or logs.
#[derive(Debug, Clone)]
pub struct Credentials {
    client_id: String,
    client_secret: SecretString,
}

impl Credentials {
    /// Create credentials from an id/secret pair
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: SecretString::from(client_secret.into()),
        }
    }

    /// Load credentials from `PAYPAL_CLIENT_ID` / `PAYPAL_CLIENT_SECRET`
    ///
    /// # Errors
    ///
    /// Returns [`PayPalError::InvalidConfig`] if either variable is missing
    /// or empty.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load credentials through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns [`PayPalError::InvalidConfig`] if either value is missing or
    /// empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| PayPalError::invalid_config(format!("{key} must be set")))
        };
        Ok(Self::new(
            required(ENV_CLIENT_ID)?,
            required(ENV_CLIENT_SECRET)?,
        ))
    }

    /// The client id
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// `Authorization` header value for the token endpoint:
    /// `Basic base64(client_id:client_secret)`
    #[must_use]
    pub fn basic_authorization(&self) -> String {
        let pair = format!("{}:{}", self.client_id, self.client_secret.expose_secret());
        format!("Basic {}", STANDARD.encode(pair))
    }
}
