//! Environment-bound transport used for PayPal REST calls
//!
//! A [`SdkClient`] is built by [`PayPalClient`](crate::PayPalClient) whenever
//! it is given client credentials. It pins the environment and, when the
//! context asks for debug output, logs every request and response through
//! `tracing` with sensitive headers masked.
//!
//! Requests carry no explicit timeout; the HTTP client's default applies.

use reqwest::header::HeaderMap;
use reqwest::{Request, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::types::Environment;
use crate::utils::{MAX_LOGGED_BODY_BYTES, format_headers, truncate_for_display};

/// Level verbose SDK logging is emitted at
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// `tracing::debug!`
    Debug,
    /// `tracing::info!`
    #[default]
    Info,
    /// `tracing::warn!`
    Warn,
}

/// What verbose SDK logging writes out
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Level of every emitted event
    pub level: LogLevel,
    /// Replace `Authorization` and similar header values with a placeholder
    pub mask_sensitive_headers: bool,
    /// Log outgoing request bodies
    pub log_request_body: bool,
    /// Log response bodies
    pub log_response_body: bool,
    /// Log response headers
    pub log_response_headers: bool,
    /// Bodies longer than this are truncated in the log line
    pub max_body_bytes: usize,
}

impl LoggingConfig {
    /// The configuration enabled by `context.debug`: info level, headers
    /// masked, request body, response body and response headers logged.
    #[must_use]
    pub fn verbose() -> Self {
        Self {
            level: LogLevel::Info,
            mask_sensitive_headers: true,
            log_request_body: true,
            log_response_body: true,
            log_response_headers: true,
            max_body_bytes: MAX_LOGGED_BODY_BYTES,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::verbose()
    }
}

macro_rules! log_at {
    ($level:expr, $($arg:tt)+) => {
        match $level {
            LogLevel::Debug => tracing::debug!($($arg)+),
            LogLevel::Info => tracing::info!($($arg)+),
            LogLevel::Warn => tracing::warn!($($arg)+),
        }
    };
}

/// A fully read REST response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body as text
    pub body: String,
}

impl ApiResponse {
    /// Whether the status is 2xx
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Deserialize the body, treating an empty body as JSON `null`
    ///
    /// # Errors
    ///
    /// Returns a JSON error if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        let body = if self.body.trim().is_empty() {
            "null"
        } else {
            self.body.as_str()
        };
        Ok(serde_json::from_str(body)?)
    }
}

/// PayPal SDK client handle
#[derive(Debug, Clone)]
pub struct SdkClient {
    environment: Environment,
    logging: Option<LoggingConfig>,
    http: reqwest::Client,
}

impl SdkClient {
    /// Create an SDK client with its own HTTP client
    #[must_use]
    pub fn new(environment: Environment, logging: Option<LoggingConfig>) -> Self {
        Self::with_http_client(environment, logging, reqwest::Client::new())
    }

    /// Create an SDK client over an existing HTTP client
    #[must_use]
    pub fn with_http_client(
        environment: Environment,
        logging: Option<LoggingConfig>,
        http: reqwest::Client,
    ) -> Self {
        Self {
            environment,
            logging,
            http,
        }
    }

    /// Environment the client was built for
    #[must_use]
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Active logging configuration, if verbose logging is on
    #[must_use]
    pub fn logging(&self) -> Option<&LoggingConfig> {
        self.logging.as_ref()
    }

    /// Send a request and read the whole response
    ///
    /// # Errors
    ///
    /// Returns an HTTP error if the request cannot be sent or the body
    /// cannot be read. Non-2xx statuses are not errors here.
    pub async fn execute(&self, request: Request) -> Result<ApiResponse> {
        send(&self.http, request, self.logging.as_ref()).await
    }
}

/// Send `request` on `http`, logging it per `logging`.
pub(crate) async fn send(
    http: &reqwest::Client,
    request: Request,
    logging: Option<&LoggingConfig>,
) -> Result<ApiResponse> {
    if let Some(config) = logging {
        log_request(config, &request);
    } else {
        tracing::debug!(method = %request.method(), url = %request.url(), "PayPal request");
    }

    let response = http.execute(request).await?;
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.text().await?;

    let api_response = ApiResponse {
        status,
        headers,
        body,
    };

    if let Some(config) = logging {
        log_response(config, &api_response);
    } else {
        tracing::debug!(status = status.as_u16(), "PayPal response");
    }

    Ok(api_response)
}

fn log_request(config: &LoggingConfig, request: &Request) {
    let headers = format_headers(request.headers(), config.mask_sensitive_headers);
    let body = if config.log_request_body {
        request
            .body()
            .and_then(reqwest::Body::as_bytes)
            .map(|bytes| truncate_for_display(&String::from_utf8_lossy(bytes), config.max_body_bytes))
    } else {
        None
    };
    log_at!(
        config.level,
        method = %request.method(),
        url = %request.url(),
        headers = ?headers,
        body = ?body,
        "PayPal request"
    );
}

fn log_response(config: &LoggingConfig, response: &ApiResponse) {
    let headers = config
        .log_response_headers
        .then(|| format_headers(&response.headers, config.mask_sensitive_headers));
    let body = config
        .log_response_body
        .then(|| truncate_for_display(&response.body, config.max_body_bytes));
    log_at!(
        config.level,
        status = response.status.as_u16(),
        headers = ?headers,
        body = ?body,
        "PayPal response"
    );
}
