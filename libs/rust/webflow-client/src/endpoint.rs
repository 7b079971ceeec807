//! API base URL, injected into each client.

use url::Url;

use crate::error::{ClientError, ClientResult};

/// Production Webflow API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.webflow.com";

const API_PREFIX: &str = "v2";

/// Resolves Webflow API paths against a base URL.
///
/// Each client owns its own endpoint, so tests can point a client at a mock
/// server without touching any shared state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: String,
}

impl Endpoint {
    /// Create an endpoint for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base` is not an absolute
    /// http(s) URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use webflow_client::Endpoint;
    ///
    /// let endpoint = Endpoint::new("http://127.0.0.1:8080").unwrap();
    /// let url = endpoint.url(&["sites", "abc", "redirects"]).unwrap();
    /// assert_eq!(url.as_str(), "http://127.0.0.1:8080/v2/sites/abc/redirects");
    /// ```
    pub fn new(base: &str) -> ClientResult<Self> {
        let invalid = |reason: &str| ClientError::InvalidUrl {
            url: base.to_string(),
            reason: reason.to_string(),
        };

        let parsed = Url::parse(base).map_err(|e| invalid(&e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid("scheme must be http or https"));
        }
        if parsed.cannot_be_a_base() {
            return Err(invalid("URL cannot be used as a base"));
        }
        Ok(Self {
            base: parsed.to_string(),
        })
    }

    /// Base URL.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Build `{base}/v2/{segments...}`, percent-encoding every segment.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if the base cannot take path segments.
    pub fn url(&self, segments: &[&str]) -> ClientResult<Url> {
        let invalid = |reason: String| ClientError::InvalidUrl {
            url: self.base.clone(),
            reason,
        };
        let mut url = Url::parse(&self.base).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("URL cannot be used as a base".to_string()))?
            .pop_if_empty()
            .push(API_PREFIX)
            .extend(segments);
        Ok(url)
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            base: format!("{DEFAULT_BASE_URL}/"),
        }
    }
}
