//! `PayPalClient`: credentials, base URL, bearer token and request headers
//!
//! The client resolves its base URL once from the context's sandbox flag,
//! fetches an OAuth2 bearer token lazily the first time headers are needed,
//! and keeps that token for the rest of its life. There is no expiry
//! tracking and no refresh: callers that need a new token build a new client
//! or call [`PayPalClient::set_access_token`].
//!
//! # Example: credentials
//!
//! ```no_run
//! use paypal_agent_toolkit::{Context, PayPalClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PayPalClient::new("CLIENT_ID", "CLIENT_SECRET", Context::default());
//! assert_eq!(client.base_url(), "https://api.sandbox.paypal.com");
//!
//! // First call exchanges the credentials for a token
//! let headers = client.headers().await?;
//! println!("{}", headers["Authorization"]);
//! # Ok(())
//! # }
//! ```
//!
//! # Example: pre-obtained token
//!
//! ```no_run
//! use paypal_agent_toolkit::{Context, PayPalClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let context = Context::builder().is_sandbox(false).request_id("order-42").build();
//! let client = PayPalClient::with_access_token(context, Some("A21AAF".to_string()));
//!
//! // No network call: the supplied token is used as-is
//! let headers = client.headers().await?;
//! assert_eq!(headers["PayPal-Request-Id"], "order-42");
//! # Ok(())
//! # }
//! ```

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::auth::{Credentials, exchange_client_credentials};
use crate::error::{PayPalError, Result};
use crate::sdk::{self, ApiResponse, LoggingConfig, SdkClient};
use crate::types::{Context, Environment};
use crate::utils::truncate_for_display;

/// `Content-Type` header name
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
/// `Authorization` header name
pub const HEADER_AUTHORIZATION: &str = "Authorization";
/// Idempotency header PayPal uses to de-duplicate retried POSTs
pub const HEADER_REQUEST_ID: &str = "PayPal-Request-Id";
/// Header carrying the serialized tenant context
pub const HEADER_TENANT_CONTEXT: &str = "PayPal-Tenant-Context";

const JSON_CONTENT_TYPE: &str = "application/json";
const MAX_ERROR_BODY_BYTES: usize = 512;

/// Builder for [`PayPalClient`]
#[derive(Debug, Default)]
pub struct PayPalClientBuilder {
    credentials: Option<Credentials>,
    context: Option<Context>,
    access_token: Option<String>,
    base_url: Option<String>,
    http_client: Option<reqwest::Client>,
}

impl PayPalClientBuilder {
    /// Create a new builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the client id and secret
    #[must_use]
    pub fn client_credentials(
        self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.credentials(Credentials::new(client_id, client_secret))
    }

    /// Set prepared credentials
    #[must_use]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the caller context (default: [`Context::default`])
    #[must_use]
    pub fn context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    /// Supply an access token so no token exchange is needed
    ///
    /// An empty token counts as absent.
    #[must_use]
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Override the base URL derived from the sandbox flag
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Use a preconfigured HTTP client
    #[must_use]
    pub fn http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Build the client
    ///
    /// The SDK client is created here, and only when credentials were given.
    #[must_use]
    pub fn build(self) -> PayPalClient {
        let context = self.context.unwrap_or_default();
        let environment = context.environment();
        let base_url = self
            .base_url
            .unwrap_or_else(|| environment.base_url().to_string())
            .trim_end_matches('/')
            .to_string();
        let http = self.http_client.unwrap_or_default();
        let access_token = self.access_token.filter(|token| !token.is_empty());

        let sdk_client = self.credentials.as_ref().map(|_| {
            let logging = context.debug_enabled().then(LoggingConfig::verbose);
            SdkClient::with_http_client(environment, logging, http.clone())
        });

        tracing::debug!(
            environment = %environment,
            base_url = %base_url,
            has_credentials = self.credentials.is_some(),
            has_access_token = access_token.is_some(),
            "Created PayPal client"
        );

        PayPalClient {
            credentials: self.credentials,
            context,
            environment,
            base_url,
            access_token: RwLock::new(access_token),
            sdk_client,
            http,
        }
    }
}

/// Client wrapper around PayPal's REST API
pub struct PayPalClient {
    credentials: Option<Credentials>,
    context: Context,
    environment: Environment,
    base_url: String,
    access_token: RwLock<Option<String>>,
    sdk_client: Option<SdkClient>,
    http: reqwest::Client,
}

impl PayPalClient {
    /// Create a client from a client id/secret pair
    ///
    /// An SDK client is built eagerly for the context's environment, with
    /// verbose logging when `context.debug` is set.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        context: Context,
    ) -> Self {
        Self::builder()
            .client_credentials(client_id, client_secret)
            .context(context)
            .build()
    }

    /// Create a client without credentials, optionally with a token
    /// obtained elsewhere
    #[must_use]
    pub fn with_access_token(context: Context, access_token: Option<String>) -> Self {
        let builder = Self::builder().context(context);
        match access_token {
            Some(token) => builder.access_token(token),
            None => builder,
        }
        .build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> PayPalClientBuilder {
        PayPalClientBuilder::new()
    }

    /// The REST API base URL, fixed at construction
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The environment selected by the context
    #[must_use]
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// The caller context
    #[must_use]
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// The SDK client, present only when built with credentials
    #[must_use]
    pub fn sdk_client(&self) -> Option<&SdkClient> {
        self.sdk_client.as_ref()
    }

    /// Whether client credentials were supplied
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Exchange the client credentials for a fresh bearer token
    ///
    /// Always hits the token endpoint; the result is not cached. Use
    /// [`headers`](Self::headers) for the cached path.
    ///
    /// # Errors
    ///
    /// Returns [`PayPalError::TokenExchange`] if the client has no
    /// credentials, the request fails, or PayPal rejects the credentials.
    pub async fn fetch_access_token(&self) -> Result<String> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or_else(|| PayPalError::token_exchange("no client credentials configured"))?;
        let token = exchange_client_credentials(&self.http, &self.base_url, credentials).await?;
        Ok(token.access_token)
    }

    /// The cached token, without fetching
    pub async fn cached_access_token(&self) -> Option<String> {
        self.access_token.read().await.clone()
    }

    /// Replace the cached token
    pub async fn set_access_token(&self, token: impl Into<String>) {
        *self.access_token.write().await = Some(token.into());
    }

    /// Return the cached token, fetching and caching one if absent.
    ///
    /// The lock is not held across the exchange: concurrent first calls may
    /// each fetch, and the last write wins.
    async fn access_token(&self) -> Result<String> {
        if let Some(token) = self.access_token.read().await.as_ref() {
            return Ok(token.clone());
        }

        let token = self.fetch_access_token().await?;
        *self.access_token.write().await = Some(token.clone());
        Ok(token)
    }

    /// Headers for a PayPal REST call
    ///
    /// Always contains `Content-Type: application/json` and
    /// `Authorization: Bearer <token>`; adds `PayPal-Request-Id` and
    /// `PayPal-Tenant-Context` (serialized JSON) when the context has them.
    ///
    /// # Errors
    ///
    /// Returns [`PayPalError::TokenExchange`] if no token is cached and the
    /// exchange fails.
    pub async fn headers(&self) -> Result<HashMap<String, String>> {
        let mut headers = HashMap::new();
        headers.insert(HEADER_CONTENT_TYPE.to_string(), JSON_CONTENT_TYPE.to_string());

        let token = self.access_token().await?;
        headers.insert(HEADER_AUTHORIZATION.to_string(), format!("Bearer {token}"));

        if let Some(request_id) = self.context.request_id() {
            headers.insert(HEADER_REQUEST_ID.to_string(), request_id.to_string());
        }

        if let Some(tenant_context) = self.context.tenant_context() {
            headers.insert(HEADER_TENANT_CONTEXT.to_string(), tenant_context.to_string());
        }

        Ok(headers)
    }

    /// `GET {base_url}{path}` and decode the JSON response
    ///
    /// # Errors
    ///
    /// Returns a token error, an HTTP error, [`PayPalError::Api`] for a
    /// non-2xx status, or a JSON error if the body does not decode.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::GET, path, None).await?.json()
    }

    /// `POST {base_url}{path}` with an optional JSON body and decode the
    /// JSON response
    ///
    /// # Errors
    ///
    /// Same as [`get_json`](Self::get_json).
    pub async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&Value>,
    ) -> Result<T> {
        self.request(Method::POST, path, body).await?.json()
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<ApiResponse> {
        let mut builder = self.http.request(method, self.url(path));
        for (name, value) in self.headers().await? {
            builder = builder.header(name, value);
        }
        if let Some(body) = body {
            builder = builder.body(serde_json::to_string(body)?);
        }
        let request = builder.build()?;

        let response = match &self.sdk_client {
            Some(sdk_client) => sdk_client.execute(request).await?,
            None => sdk::send(&self.http, request, None).await?,
        };

        if !response.is_success() {
            let error = api_error(&response);
            tracing::warn!(path = %path, error = %error, "PayPal request failed");
            return Err(error);
        }
        Ok(response)
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

#[allow(clippy::missing_fields_in_debug)]
impl std::fmt::Debug for PayPalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let token_state = match self.access_token.try_read() {
            Ok(token) if token.is_some() => "<cached>",
            Ok(_) => "<none>",
            Err(_) => "<locked>",
        };
        f.debug_struct("PayPalClient")
            .field("credentials", &self.credentials)
            .field("context", &self.context)
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .field("access_token", &token_state)
            .field("sdk_client", &self.sdk_client)
            .finish()
    }
}

/// Turn a non-2xx response into [`PayPalError::Api`], preferring PayPal's
/// `message`, then `error_description`, then the raw body.
fn api_error(response: &ApiResponse) -> PayPalError {
    let status = response.status.as_u16();
    let parsed = serde_json::from_str::<Value>(&response.body).ok();
    let provided = parsed.as_ref().and_then(|body| {
        ["message", "error_description"]
            .iter()
            .find_map(|key| body.get(*key).and_then(Value::as_str))
            .map(str::to_string)
    });

    let message = provided.unwrap_or_else(|| {
        if response.body.trim().is_empty() {
            response
                .status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        } else {
            truncate_for_display(&response.body, MAX_ERROR_BODY_BYTES)
        }
    });
    PayPalError::api(status, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use reqwest::header::HeaderMap;
    use serde_json::json;

    #[test]
    fn test_base_url_defaults_to_sandbox() {
        let client = PayPalClient::with_access_token(Context::default(), None);
        assert_eq!(client.base_url(), "https://api.sandbox.paypal.com");
        assert_eq!(client.environment(), Environment::Sandbox);
    }

    #[test]
    fn test_base_url_production() {
        let context = Context::builder().is_sandbox(false).build();
        let client = PayPalClient::new("id", "secret", context);
        assert_eq!(client.base_url(), "https://api.paypal.com");
    }

    #[test]
    fn test_base_url_override_trims_slash() {
        let client = PayPalClient::builder()
            .base_url("http://127.0.0.1:9000/")
            .build();
        assert_eq!(client.base_url(), "http://127.0.0.1:9000");
        assert_eq!(client.url("/v2/checkout/orders"), "http://127.0.0.1:9000/v2/checkout/orders");
        assert_eq!(client.url("v2/checkout/orders"), "http://127.0.0.1:9000/v2/checkout/orders");
    }

    #[test]
    fn test_sdk_client_only_with_credentials() {
        let client = PayPalClient::with_access_token(Context::default(), Some("tok".into()));
        assert!(client.sdk_client().is_none());
        assert!(!client.has_credentials());

        let client = PayPalClient::new("id", "secret", Context::default());
        let sdk = client.sdk_client().unwrap();
        assert_eq!(sdk.environment(), Environment::Sandbox);
        assert!(sdk.logging().is_none());
    }

    #[test]
    fn test_debug_enables_sdk_logging() {
        let context = Context::builder().debug(true).is_sandbox(false).build();
        let client = PayPalClient::new("id", "secret", context);
        let sdk = client.sdk_client().unwrap();
        assert_eq!(sdk.environment(), Environment::Production);
        assert_eq!(sdk.logging(), Some(&LoggingConfig::verbose()));
    }

    #[test]
    fn test_debug_output_hides_secrets() {
        let client = PayPalClient::builder()
            .client_credentials("id", "very-secret")
            .access_token("cached-token-value")
            .build();
        let debug = format!("{client:?}");
        assert!(!debug.contains("very-secret"));
        assert!(!debug.contains("cached-token-value"));
        assert!(debug.contains("<cached>"));
    }

    #[tokio::test]
    async fn test_headers_with_supplied_token() {
        let context = Context::builder()
            .request_id("req-123")
            .tenant_context(json!({"tenant_id": "t-1"}))
            .build();
        let client = PayPalClient::with_access_token(context, Some("A21AAF".into()));

        let headers = client.headers().await.unwrap();
        assert_eq!(headers[HEADER_CONTENT_TYPE], "application/json");
        assert_eq!(headers[HEADER_AUTHORIZATION], "Bearer A21AAF");
        assert_eq!(headers[HEADER_REQUEST_ID], "req-123");
        assert_eq!(headers[HEADER_TENANT_CONTEXT], r#"{"tenant_id":"t-1"}"#);
    }

    #[tokio::test]
    async fn test_headers_omit_absent_context_values() {
        let client = PayPalClient::with_access_token(Context::default(), Some("tok".into()));
        let headers = client.headers().await.unwrap();
        assert_eq!(headers.len(), 2);
        assert!(!headers.contains_key(HEADER_REQUEST_ID));
        assert!(!headers.contains_key(HEADER_TENANT_CONTEXT));
    }

    #[tokio::test]
    async fn test_fetch_without_credentials_fails() {
        let client = PayPalClient::with_access_token(Context::default(), None);
        let err = client.fetch_access_token().await.unwrap_err();
        assert!(err.is_token_exchange());
        assert!(err.to_string().contains("no client credentials"));

        let err = client.headers().await.unwrap_err();
        assert!(err.is_token_exchange());
    }

    #[tokio::test]
    async fn test_empty_supplied_token_is_absent() {
        let client = PayPalClient::with_access_token(Context::default(), Some(String::new()));
        assert!(client.cached_access_token().await.is_none());

        let err = client.headers().await.unwrap_err();
        assert!(err.is_token_exchange());
    }

    #[tokio::test]
    async fn test_set_access_token_overwrites() {
        let client = PayPalClient::with_access_token(Context::default(), Some("old".into()));
        client.set_access_token("new").await;
        assert_eq!(client.cached_access_token().await.as_deref(), Some("new"));
        let headers = client.headers().await.unwrap();
        assert_eq!(headers[HEADER_AUTHORIZATION], "Bearer new");
    }

    fn response(status: u16, body: &str) -> ApiResponse {
        ApiResponse {
            status: StatusCode::from_u16(status).unwrap(),
            headers: HeaderMap::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_api_error_prefers_message() {
        let err = api_error(&response(
            422,
            r#"{"name":"UNPROCESSABLE_ENTITY","message":"The requested action could not be performed"}"#,
        ));
        match err {
            PayPalError::Api { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "The requested action could not be performed");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_api_error_fallbacks() {
        let err = api_error(&response(401, r#"{"error":"invalid_token","error_description":"Token signature verification failed"}"#));
        assert!(err.to_string().contains("Token signature verification failed"));

        let err = api_error(&response(404, ""));
        assert!(err.to_string().contains("Not Found"));

        let err = api_error(&response(500, "upstream exploded"));
        assert!(err.to_string().contains("upstream exploded"));
    }
}
