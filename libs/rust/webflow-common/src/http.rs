//! Pooled reqwest client used as the innermost transport.
//!
//! One client is built per Webflow client and shared by every request, so
//! the connection pool and TLS sessions are reused.

use reqwest::Client;
use reqwest::tls::Version;
use std::time::Duration;

/// Default whole-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default TCP connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Default lifetime of an idle pooled connection.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(90);
/// Default number of idle connections kept per host.
pub const DEFAULT_MAX_IDLE_PER_HOST: usize = 10;

/// Timeouts and pool sizing for the Webflow HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// Whole-request timeout, body included
    pub timeout: Duration,
    /// TCP connect timeout
    pub connect_timeout: Duration,
    /// Idle pooled connections are closed after this long
    pub idle_timeout: Duration,
    /// Idle connections kept per host
    pub max_idle_per_host: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            max_idle_per_host: DEFAULT_MAX_IDLE_PER_HOST,
        }
    }
}

impl HttpConfig {
    /// Override the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the connect timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Override idle pool behaviour.
    #[must_use]
    pub const fn with_idle_pool(mut self, idle_timeout: Duration, max_idle_per_host: usize) -> Self {
        self.idle_timeout = idle_timeout;
        self.max_idle_per_host = max_idle_per_host;
        self
    }
}

/// Build the pooled client: rustls, TLS 1.2 or newer, configured timeouts.
///
/// Auth and identification headers are not set here; the authenticated
/// transport adds them per request.
///
/// # Errors
///
/// Fails if the TLS backend cannot be initialised.
///
/// ```
/// use std::time::Duration;
/// use webflow_common::{HttpConfig, build_http_client};
///
/// let config = HttpConfig::default().with_timeout(Duration::from_secs(5));
/// assert!(build_http_client(&config).is_ok());
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .use_rustls_tls()
        .min_tls_version(Version::TLS_1_2)
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .pool_idle_timeout(config.idle_timeout)
        .pool_max_idle_per_host(config.max_idle_per_host)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HttpConfig::default();
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.idle_timeout, Duration::from_secs(90));
        assert_eq!(config.max_idle_per_host, 10);
    }

    #[test]
    fn test_overrides_leave_other_fields() {
        let config = HttpConfig::default()
            .with_connect_timeout(Duration::from_secs(2))
            .with_idle_pool(Duration::from_secs(5), 0);

        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.connect_timeout, Duration::from_secs(2));
        assert_eq!(config.idle_timeout, Duration::from_secs(5));
        assert_eq!(config.max_idle_per_host, 0);
    }

    #[test]
    fn test_client_builds_without_idle_pool() {
        let config = HttpConfig::default().with_idle_pool(Duration::from_secs(1), 0);
        assert!(build_http_client(&config).is_ok());
    }
}
