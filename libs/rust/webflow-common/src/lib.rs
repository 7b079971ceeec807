//! Shared library for cross-cutting concerns of the Webflow provider.
//!
//! This crate provides centralized implementations for:
//! - The Webflow API error taxonomy with remediation messages
//! - Bearer credentials with redaction
//! - Rate-limit retry policy with exponential backoff
//! - HTTP client configuration and building
//! - Tracing initialization and log-safety helpers

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod credential;
pub mod error;
pub mod http;
pub mod logging;
pub mod retry;
pub mod tracing_config;

pub use credential::{Credential, CredentialError, redact};
pub use error::ApiError;
pub use http::{HttpConfig, build_http_client};
pub use logging::{safe_field, truncate_for_logging};
pub use retry::RetryPolicy;
pub use tracing_config::{TracingConfig, init_tracing, try_init_tracing};
