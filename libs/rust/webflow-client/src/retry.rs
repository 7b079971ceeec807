//! Rate-limit retry tower layer.
//!
//! Retries HTTP 429 responses with exponential backoff, honouring a
//! `Retry-After` hint. Every other response, and every transport error, is
//! handed back to the caller unchanged after a single attempt.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tower::Layer;
use tracing::{debug, warn};
use webflow_common::RetryPolicy;

use crate::transport::{ApiRequest, ApiResponse, Transport, TransportError};

/// Layer producing [`RetryTransport`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RetryLayer {
    policy: RetryPolicy,
}

impl RetryLayer {
    /// Create a layer with the given policy.
    #[must_use]
    pub const fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }
}

impl<T> Layer<T> for RetryLayer {
    type Service = RetryTransport<T>;

    fn layer(&self, inner: T) -> Self::Service {
        RetryTransport {
            inner,
            policy: self.policy,
        }
    }
}

/// Transport decorator retrying rate-limited requests.
///
/// Holds only immutable configuration; the attempt counter lives on the
/// stack of each [`Transport::send`] call.
#[derive(Debug, Clone)]
pub struct RetryTransport<T> {
    inner: T,
    policy: RetryPolicy,
}

impl<T> RetryTransport<T> {
    /// Get a reference to the inner transport.
    pub const fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Policy in use.
    pub const fn policy(&self) -> &RetryPolicy {
        &self.policy
    }
}

#[async_trait]
impl<T: Transport> Transport for RetryTransport<T> {
    async fn send(
        &self,
        request: ApiRequest,
        cancel: &CancellationToken,
    ) -> Result<ApiResponse, TransportError> {
        let mut attempt: u32 = 0;
        loop {
            let response = match self.inner.send(request.clone(), cancel).await {
                Ok(response) => response,
                Err(err) => {
                    debug!(
                        method = %request.method,
                        path = request.path(),
                        attempt = attempt + 1,
                        error = %err,
                        "HTTP request failed"
                    );
                    return Err(err);
                }
            };

            debug!(
                method = %request.method,
                path = request.path(),
                status = response.status.as_u16(),
                attempt = attempt + 1,
                "HTTP request completed"
            );

            if !response.is_rate_limited() {
                return Ok(response);
            }

            if !self.policy.should_retry(attempt) {
                warn!(
                    method = %request.method,
                    path = request.path(),
                    max_retries = self.policy.max_retries,
                    "Rate limit exceeded, max retries exhausted"
                );
                return Ok(response);
            }

            let delay = self.policy.delay_with_hint(attempt, response.retry_after());
            warn!(
                method = %request.method,
                path = request.path(),
                attempt = attempt + 1,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "Rate limited, retrying"
            );

            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    debug!(path = request.path(), "Retry wait cancelled");
                    return Err(TransportError::Cancelled);
                }
                () = tokio::time::sleep(delay) => {}
            }

            attempt += 1;
        }
    }
}
