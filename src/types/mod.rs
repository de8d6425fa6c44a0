//! Type definitions for the PayPal agent toolkit
//!
//! Environments, the caller-supplied context and the toolkit configuration.

pub mod configuration;
pub mod context;
pub mod environment;

pub use configuration::{ActionMap, Configuration, is_tool_allowed};
pub use context::Context;
pub use environment::{Environment, PRODUCTION_BASE_URL, SANDBOX_BASE_URL};
