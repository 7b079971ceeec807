//! Helpers for keeping log output safe and bounded.

use crate::credential::redact;

/// Default cap for response bodies written to logs.
pub const DEFAULT_LOG_TRUNCATE: usize = 500;

const SENSITIVE_MARKERS: [&str; 5] = ["token", "password", "secret", "key", "authorization"];

/// Truncate a value to at most `max_len` characters, appending `...` when cut.
///
/// Truncation happens on a character boundary.
#[must_use]
pub fn truncate_for_logging(value: &str, max_len: usize) -> String {
    match value.char_indices().nth(max_len) {
        Some((cut, _)) => format!("{}...", &value[..cut]),
        None => value.to_string(),
    }
}

/// Check whether a field name looks like it holds a secret.
#[must_use]
pub fn is_sensitive_field(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    SENSITIVE_MARKERS.iter().any(|marker| name.contains(marker))
}

/// Render a field value for logging, redacting it when the name is sensitive.
///
/// ```
/// use webflow_common::safe_field;
///
/// assert_eq!(safe_field("apiToken", "abc"), "[REDACTED]");
/// assert_eq!(safe_field("siteId", "abc"), "abc");
/// ```
#[must_use]
pub fn safe_field(name: &str, value: &str) -> String {
    if is_sensitive_field(name) {
        redact(value).to_string()
    } else {
        value.to_string()
    }
}
