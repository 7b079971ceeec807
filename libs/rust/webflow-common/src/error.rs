//! Classified Webflow API errors.
//!
//! Every non-success HTTP status returned by the Webflow API is mapped to one
//! variant of [`ApiError`]. Each variant keeps the original status code and the
//! raw response body, and its display text tells the user what went wrong and
//! how to fix it.

use thiserror::Error;

/// Error returned by the Webflow API, classified by status code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// HTTP 400
    #[error(
        "bad request: the request to the Webflow API was incorrectly formatted. Details: {body}. \
         Check the resource configuration and make sure every required field has a valid value"
    )]
    BadRequest {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// HTTP 401
    #[error(
        "unauthorized: authentication failed, the Webflow API token is invalid or has expired. \
         To fix this: 1) verify the token in the Webflow dashboard (Settings > Integrations > API Access), \
         2) make sure the token has the scopes the resource needs, \
         3) update the provider configuration or the WEBFLOW_API_TOKEN environment variable"
    )]
    Unauthorized {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// HTTP 403
    #[error(
        "forbidden: the API token does not have permission to access this resource. \
         To fix this: 1) verify the site or collection ID is correct, \
         2) make sure the token has the required scopes, \
         3) check that the site belongs to the workspace associated with the token"
    )]
    Forbidden {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// HTTP 404
    #[error(
        "not found: the requested Webflow resource does not exist. \
         To fix this: 1) verify the ID is correct (24-character lowercase hex string), \
         2) check that the resource still exists in the Webflow dashboard"
    )]
    NotFound {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// HTTP 429 still present after the retry budget was spent
    #[error(
        "rate limited: too many requests to the Webflow API and retries were exhausted. \
         Wait a few minutes before trying again, and reduce the frequency of operations \
         if rate limits are consistently exceeded"
    )]
    RateLimitExceeded {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// HTTP 5xx
    #[error(
        "server error (HTTP {status}): the Webflow API encountered an internal error. Details: {body}. \
         This is a temporary issue on Webflow's side; wait a few minutes and try again, \
         and check Webflow's status page if the problem persists"
    )]
    ServerError {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Any other status
    #[error(
        "unexpected error (HTTP {status}): {body}. \
         This is an unexpected response from the Webflow API; \
         check Webflow's status page or contact Webflow support if it persists"
    )]
    Unexpected {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },
}

impl ApiError {
    /// Classify a non-success status code and its body.
    ///
    /// # Examples
    ///
    /// ```
    /// use webflow_common::ApiError;
    ///
    /// let err = ApiError::from_status(404, "{}");
    /// assert!(err.is_not_found());
    ///
    /// let err = ApiError::from_status(503, "maintenance");
    /// assert!(matches!(err, ApiError::ServerError { status: 503, .. }));
    /// ```
    #[must_use]
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            400 => Self::BadRequest { status, body },
            401 => Self::Unauthorized { status, body },
            403 => Self::Forbidden { status, body },
            404 => Self::NotFound { status, body },
            429 => Self::RateLimitExceeded { status, body },
            500..=599 => Self::ServerError { status, body },
            _ => Self::Unexpected { status, body },
        }
    }

    /// Original HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::BadRequest { status, .. }
            | Self::Unauthorized { status, .. }
            | Self::Forbidden { status, .. }
            | Self::NotFound { status, .. }
            | Self::RateLimitExceeded { status, .. }
            | Self::ServerError { status, .. }
            | Self::Unexpected { status, .. } => *status,
        }
    }

    /// Raw response body.
    #[must_use]
    pub fn body(&self) -> &str {
        match self {
            Self::BadRequest { body, .. }
            | Self::Unauthorized { body, .. }
            | Self::Forbidden { body, .. }
            | Self::NotFound { body, .. }
            | Self::RateLimitExceeded { body, .. }
            | Self::ServerError { body, .. }
            | Self::Unexpected { body, .. } => body,
        }
    }

    /// Check if this error is a 404.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if a later attempt could succeed.
    ///
    /// The transport never retries on its own except for rate limiting; this
    /// classification is for callers deciding whether to re-run an operation.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimitExceeded { .. } | Self::ServerError { .. }
        )
    }
}
