//! OAuth2 client-credentials exchange against PayPal's token endpoint

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;

use super::credentials::Credentials;
use crate::error::{PayPalError, Result};

/// Token endpoint path, relative to the API base URL
pub const TOKEN_PATH: &str = "/v1/oauth2/token";

/// Form body of the client-credentials grant
const GRANT_BODY: &str = "grant_type=client_credentials";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Successful response from the token endpoint
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    /// Bearer token for subsequent API calls
    pub access_token: String,
    /// Token type (usually "Bearer")
    #[serde(default)]
    pub token_type: Option<String>,
    /// Seconds until expiry (informational; never acted on)
    #[serde(default)]
    pub expires_in: Option<u64>,
    /// Space-separated scopes granted
    #[serde(default)]
    pub scope: Option<String>,
    /// PayPal app id the token was issued to
    #[serde(default)]
    pub app_id: Option<String>,
}

/// Error response from the token endpoint
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    #[allow(dead_code)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

/// Full URL of the token endpoint under `base_url`
#[must_use]
pub fn token_url(base_url: &str) -> String {
    format!("{}{TOKEN_PATH}", base_url.trim_end_matches('/'))
}

/// Exchange a client-credential pair for a bearer token
///
/// # Errors
///
/// Every failure is reported as [`PayPalError::TokenExchange`]. A non-success
/// response carries PayPal's `error_description` when the body has one,
/// otherwise a generic status message.
pub async fn exchange_client_credentials(
    http: &reqwest::Client,
    base_url: &str,
    credentials: &Credentials,
) -> Result<TokenResponse> {
    let url = token_url(base_url);
    tracing::debug!(url = %url, client_id = %credentials.client_id(), "Requesting PayPal access token");

    let response = http
        .post(&url)
        .header(AUTHORIZATION, credentials.basic_authorization())
        .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
        .body(GRANT_BODY)
        .send()
        .await
        .map_err(|e| PayPalError::token_exchange(e.to_string()))?;

    let status = response.status();
    let response_text = response
        .text()
        .await
        .map_err(|e| PayPalError::token_exchange(e.to_string()))?;

    if !status.is_success() {
        let message = describe_failure(status.as_u16(), &response_text);
        tracing::warn!(status = status.as_u16(), error = %message, "PayPal token exchange failed");
        return Err(PayPalError::TokenExchange(message));
    }

    let token: TokenResponse = serde_json::from_str(&response_text)
        .map_err(|e| PayPalError::token_exchange(format!("invalid token response: {e}")))?;

    tracing::debug!(
        token_type = ?token.token_type,
        expires_in = ?token.expires_in,
        "Obtained PayPal access token"
    );
    Ok(token)
}

/// Prefer the provider's `error_description`, fall back to the status line.
fn describe_failure(status: u16, body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|error| error.error_description)
        .filter(|description| !description.is_empty())
        .unwrap_or_else(|| format!("request failed with status code {status}"))
}
