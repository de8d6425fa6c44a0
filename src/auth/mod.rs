//! OAuth2 client-credentials authentication for PayPal
//!
//! PayPal REST calls are authorized with a bearer token obtained by
//! exchanging an app's client id and secret at `/v1/oauth2/token`:
//!
//! ```text
//! POST {base_url}/v1/oauth2/token
//! Authorization: Basic base64(client_id:client_secret)
//! Content-Type: application/x-www-form-urlencoded
//!
//! grant_type=client_credentials
//! ```
//!
//! Most callers never touch this module directly: [`PayPalClient`](crate::PayPalClient)
//! performs the exchange lazily the first time it builds request headers.
//!
//! # Example
//!
//! ```no_run
//! use paypal_agent_toolkit::auth::{Credentials, exchange_client_credentials};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let credentials = Credentials::from_env()?;
//! let http = reqwest::Client::new();
//! let token = exchange_client_credentials(
//!     &http,
//!     "https://api.sandbox.paypal.com",
//!     &credentials,
//! )
//! .await?;
//! println!("token type: {:?}", token.token_type);
//! # Ok(())
//! # }
//! ```

mod credentials;
mod token;

pub use credentials::{Credentials, ENV_CLIENT_ID, ENV_CLIENT_SECRET};
pub use token::{TOKEN_PATH, TokenResponse, exchange_client_credentials, token_url};
