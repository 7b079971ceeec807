//! Rate-limit retry policy with exponential backoff.
//!
//! The policy only computes delays; the retrying itself happens in the
//! client's retry transport, which consults the policy on every HTTP 429.

use std::time::Duration;

/// Retry policy for rate-limited requests.
///
/// The delay before retry `n` (zero based) is `min(max_delay, base_delay * 2^n)`,
/// unless the server supplied a valid `Retry-After` hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry
    pub base_delay: Duration,
    /// Upper bound for any single delay
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Create a policy from its three parameters.
    #[must_use]
    pub const fn new(max_retries: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            max_delay,
        }
    }

    /// Set the maximum number of retries.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the base delay.
    #[must_use]
    pub const fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Set the maximum delay.
    #[must_use]
    pub const fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Total number of attempts a single request may make.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Check whether another attempt is allowed after `attempt` (zero based).
    #[must_use]
    pub const fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_retries
    }

    /// Exponential backoff delay for a given attempt.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use webflow_common::RetryPolicy;
    ///
    /// let policy = RetryPolicy::default();
    /// assert_eq!(policy.delay_for_attempt(0), Duration::from_secs(1));
    /// assert_eq!(policy.delay_for_attempt(2), Duration::from_secs(4));
    /// assert_eq!(policy.delay_for_attempt(10), Duration::from_secs(30));
    /// ```
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.base_delay
            .checked_mul(factor)
            .map_or(self.max_delay, |delay| delay.min(self.max_delay))
    }

    /// Delay for a given attempt, honouring a server `Retry-After` hint.
    ///
    /// A valid hint replaces the computed backoff and is clamped to `max_delay`;
    /// an invalid or absent hint falls back to [`RetryPolicy::delay_for_attempt`].
    #[must_use]
    pub fn delay_with_hint(&self, attempt: u32, retry_after: Option<&str>) -> Duration {
        retry_after
            .and_then(parse_retry_after)
            .map_or_else(|| self.delay_for_attempt(attempt), |hint| hint.min(self.max_delay))
    }
}

/// Parse a `Retry-After` value given as a positive integer count of seconds.
///
/// Returns `None` for anything else: empty, non-numeric, zero, negative or
/// HTTP-date values.
#[must_use]
pub fn parse_retry_after(value: &str) -> Option<Duration> {
    match value.trim().parse::<u64>() {
        Ok(seconds) if seconds > 0 => Some(Duration::from_secs(seconds)),
        _ => None,
    }
}
