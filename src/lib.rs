//! # PayPal Agent Toolkit for Rust
//!
//! PayPal REST client wrapper and Orders tools for agents.
//! Async/await, strong typing, tokio-based.
//!
//! ## Quick Start
//!
//! Create a client and get the headers for a REST call with
//! [`PayPalClient::headers`]:
//!
//! ```no_run
//! use paypal_agent_toolkit::{Context, PayPalClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let context = Context::builder().request_id("checkout-7781").build();
//!     let client = PayPalClient::new("CLIENT_ID", "CLIENT_SECRET", context);
//!
//!     let headers = client.headers().await?;
//!     println!("{} -> {}", client.base_url(), headers["Authorization"]);
//!     Ok(())
//! }
//! ```
//!
//! ## Core Features
//!
//! ### 1. Client Wrapper with [`PayPalClient`]
//!
//! - Base URL resolved once from the context's sandbox flag (sandbox by default)
//! - OAuth2 client-credentials token fetched lazily and cached for the
//!   client's lifetime
//! - Headers: `Content-Type`, `Authorization: Bearer`, and optionally
//!   `PayPal-Request-Id` and `PayPal-Tenant-Context`
//! - A pre-obtained token can be supplied instead of credentials
//!
//! ### 2. Orders Tools
//!
//! [`orders::create_order`], [`orders::capture_order`] and
//! [`orders::get_order_details`] call the v2 Orders API through the client.
//!
//! ### 3. Toolkit with [`PayPalToolkit`]
//!
//! Filters the tools by [`Configuration`] and dispatches JSON tool calls:
//!
//! ```no_run
//! # use paypal_agent_toolkit::{Configuration, PayPalToolkit};
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let configuration = Configuration::new().with_action("orders", "capture", true);
//! let toolkit = PayPalToolkit::new("CLIENT_ID", "CLIENT_SECRET", configuration);
//!
//! let result = toolkit
//!     .run("orders.capture", r#"{"order_id": "5O190127TN364715T"}"#)
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, PayPalError>`](Result):
//!
//! ```no_run
//! # use paypal_agent_toolkit::{Context, PayPalClient, PayPalError};
//! # async fn example() {
//! let client = PayPalClient::new("CLIENT_ID", "CLIENT_SECRET", Context::default());
//! match client.fetch_access_token().await {
//!     Ok(token) => { /* ... */ }
//!     Err(PayPalError::TokenExchange(msg)) => {
//!         eprintln!("PayPal rejected the credentials: {}", msg);
//!     }
//!     Err(e) => {
//!         eprintln!("Error: {}", e);
//!     }
//! }
//! # }
//! ```
//!
//! ## Security
//!
//! - **Secret handling** - The client secret is held in a `SecretString` and
//!   never appears in `Debug` output; cached tokens are not printed either
//! - **Log masking** - With `context.debug`, request/response logging masks
//!   `Authorization` and other credential headers
//! - **Path safety** - Order ids are validated before being placed in a URL

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod client;
pub mod error;
pub mod orders;
pub mod sdk;
pub mod tools;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use auth::Credentials;
pub use client::{
    HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE, HEADER_REQUEST_ID, HEADER_TENANT_CONTEXT,
    PayPalClient, PayPalClientBuilder,
};
pub use error::{PayPalError, Result};
pub use orders::OrderSummary;
pub use sdk::{LogLevel, LoggingConfig, SdkClient};
pub use tools::{PayPalToolkit, ToolDefinition};
pub use types::{
    ActionMap, Configuration, Context, Environment, PRODUCTION_BASE_URL, SANDBOX_BASE_URL,
    is_tool_allowed,
};

/// Version of the toolkit
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
