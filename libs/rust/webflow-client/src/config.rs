//! Webflow client configuration.

use webflow_common::{HttpConfig, RetryPolicy};

use crate::endpoint::Endpoint;

/// Webflow client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL
    pub endpoint: Endpoint,
    /// Rate-limit retry policy
    pub retry: RetryPolicy,
    /// Base HTTP client settings
    pub http: HttpConfig,
    /// Version reported in the `User-Agent` header
    pub version: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::default(),
            retry: RetryPolicy::default(),
            http: HttpConfig::default(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl ClientConfig {
    /// Set the endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Set the retry policy.
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Set the HTTP configuration.
    #[must_use]
    pub fn with_http(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    /// Set the reported version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}
