//! Client error types using thiserror 2.0.

use thiserror::Error;
use webflow_common::{ApiError, CredentialError};

use crate::transport::TransportError;

/// Network failure, with remediation guidance.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// Timed out
    #[error(
        "network timeout: the request to the Webflow API timed out. \
         This may indicate network connectivity issues or a slow API. \
         To fix this: 1) check your internet connection, 2) verify Webflow API status, \
         3) wait a few minutes and retry: {0}"
    )]
    Timeout(String),

    /// Could not connect
    #[error(
        "connection failed: unable to connect to the Webflow API. \
         This may indicate network connectivity or DNS problems. \
         To fix this: 1) check your internet connection, 2) verify DNS resolution of api.webflow.com, \
         3) check firewall and proxy settings: {0}"
    )]
    Connect(String),

    /// Anything else
    #[error(
        "network error: request to the Webflow API failed. \
         To fix this: 1) check your internet connection, 2) verify the Webflow API is reachable, \
         3) wait a few minutes and retry: {0}"
    )]
    Other(String),
}

/// Errors returned by [`crate::WebflowClient`].
#[derive(Error, Debug)]
pub enum ClientError {
    /// The API answered with a non-success status
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The caller cancelled the operation
    #[error("operation cancelled before the Webflow API request completed")]
    Cancelled,

    /// No response was received
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// The response body did not match the expected shape
    #[error(
        "failed to decode Webflow API response: {source}. \
         The API may have changed its response format; body: {body}"
    )]
    Decode {
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
        /// Truncated response body
        body: String,
    },

    /// The request payload could not be serialized
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The API token was rejected before any request was made
    #[error(transparent)]
    Credential(#[from] CredentialError),

    /// The configured base URL is unusable
    #[error(
        "invalid API base URL '{url}': {reason}. \
         Expected an absolute http(s) URL such as https://api.webflow.com"
    )]
    InvalidUrl {
        /// Rejected URL
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// The HTTP client could not be built
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Check if the operation was cancelled.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Check if the API reported the resource as missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api(ApiError::NotFound { .. }))
    }

    /// Check if the retry budget for rate limiting was exhausted.
    #[must_use]
    pub const fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Api(ApiError::RateLimitExceeded { .. }))
    }

    /// Classified API error, if any.
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TransportError> for ClientError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Cancelled => Self::Cancelled,
            TransportError::Timeout(msg) => Self::Network(NetworkError::Timeout(msg)),
            TransportError::Connect(msg) => Self::Network(NetworkError::Connect(msg)),
            TransportError::Network(msg) => Self::Network(NetworkError::Other(msg)),
        }
    }
}
