//! Webflow API bearer credentials.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use thiserror::Error;

/// Minimum accepted token length.
pub const MIN_TOKEN_LENGTH: usize = 10;

/// Sentinel printed in place of a non-empty secret.
pub const REDACTED: &str = "[REDACTED]";

/// Marker printed for an empty secret.
pub const EMPTY_MARKER: &str = "<empty>";

/// Credential resolution and validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// No token in configuration or environment
    #[error(
        "[WEBFLOW_AUTH_001] Webflow API token not configured. \
         Set the apiToken provider configuration value OR the WEBFLOW_API_TOKEN environment variable. \
         See: https://github.com/jdetmar/pulumi-webflow/blob/main/docs/troubleshooting.md#api-token-not-configured"
    )]
    NotConfigured,

    /// Token present but empty
    #[error(
        "[WEBFLOW_AUTH_002] API token cannot be empty. \
         Provide a valid Webflow API token via configuration or environment variable. \
         See: https://github.com/jdetmar/pulumi-webflow/blob/main/docs/troubleshooting.md#api-token-not-configured"
    )]
    Empty,

    /// Token shorter than [`MIN_TOKEN_LENGTH`]
    #[error(
        "[WEBFLOW_AUTH_003] API token appears invalid (too short: {length} characters, expected at least 10). \
         Webflow API tokens are typically 40+ characters. \
         See: https://github.com/jdetmar/pulumi-webflow/blob/main/docs/troubleshooting.md#invalid-or-expired-token"
    )]
    TooShort {
        /// Length of the rejected token
        length: usize,
    },

    /// Token contains characters that cannot appear in an HTTP header
    #[error(
        "[WEBFLOW_AUTH_003] API token appears invalid (contains whitespace or non-printable characters). \
         Copy the token again from the Webflow dashboard without surrounding spaces or line breaks. \
         See: https://github.com/jdetmar/pulumi-webflow/blob/main/docs/troubleshooting.md#invalid-or-expired-token"
    )]
    Malformed,
}

impl CredentialError {
    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotConfigured => "WEBFLOW_AUTH_001",
            Self::Empty => "WEBFLOW_AUTH_002",
            Self::TooShort { .. } | Self::Malformed => "WEBFLOW_AUTH_003",
        }
    }
}

/// A validated bearer token.
///
/// The token is held in a [`SecretString`] and is never printed: both
/// `Debug` and [`Credential::redacted`] yield [`REDACTED`].
#[derive(Clone)]
pub struct Credential {
    token: SecretString,
}

impl Credential {
    /// Validate and wrap a token.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Empty`] for an empty token,
    /// [`CredentialError::TooShort`] when it is shorter than [`MIN_TOKEN_LENGTH`]
    /// and [`CredentialError::Malformed`] when it is not printable ASCII.
    ///
    /// # Examples
    ///
    /// ```
    /// use webflow_common::{Credential, CredentialError};
    ///
    /// assert!(Credential::new("wf_0123456789abcdef").is_ok());
    /// assert_eq!(Credential::new("").unwrap_err(), CredentialError::Empty);
    /// ```
    pub fn new(token: impl Into<String>) -> Result<Self, CredentialError> {
        Self::from_secret(SecretString::from(token.into()))
    }

    /// Validate an already-wrapped secret.
    ///
    /// # Errors
    ///
    /// Same as [`Credential::new`].
    pub fn from_secret(token: SecretString) -> Result<Self, CredentialError> {
        let length = token.expose_secret().chars().count();
        if length == 0 {
            return Err(CredentialError::Empty);
        }
        if length < MIN_TOKEN_LENGTH {
            return Err(CredentialError::TooShort { length });
        }
        if !token.expose_secret().chars().all(|c| c.is_ascii_graphic()) {
            return Err(CredentialError::Malformed);
        }
        Ok(Self { token })
    }

    /// Value for the `Authorization` header.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token.expose_secret())
    }

    /// Redacted form, safe for diagnostics.
    #[must_use]
    pub fn redacted(&self) -> &'static str {
        redact(self.token.expose_secret())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&REDACTED).finish()
    }
}

/// Redact a secret for diagnostic output.
///
/// Empty input yields [`EMPTY_MARKER`], anything else yields [`REDACTED`].
#[must_use]
pub fn redact(value: &str) -> &'static str {
    if value.is_empty() { EMPTY_MARKER } else { REDACTED }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_token() {
        let credential = Credential::new("abcdefghij").unwrap();
        assert_eq!(credential.bearer(), "Bearer abcdefghij");
    }

    #[test]
    fn test_empty_token_rejected() {
        assert_eq!(Credential::new("").unwrap_err(), CredentialError::Empty);
    }

    #[test]
    fn test_short_token_rejected() {
        let err = Credential::new("short").unwrap_err();
        assert_eq!(err, CredentialError::TooShort { length: 5 });
        assert_eq!(err.code(), "WEBFLOW_AUTH_003");
    }

    #[test]
    fn test_malformed_token_rejected() {
        assert_eq!(
            Credential::new("token with spaces").unwrap_err(),
            CredentialError::Malformed
        );
        assert_eq!(
            Credential::new("abcdefghij\n").unwrap_err(),
            CredentialError::Malformed
        );
    }

    #[test]
    fn test_debug_is_redacted() {
        let credential = Credential::new("super-secret-token-value").unwrap();
        let debug = format!("{credential:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains(REDACTED));
        assert_eq!(credential.redacted(), REDACTED);
    }

    #[test]
    fn test_redact() {
        assert_eq!(redact(""), EMPTY_MARKER);
        assert_eq!(redact("x"), REDACTED);
        assert_eq!(redact("[REDACTED]"), REDACTED);
    }

    #[test]
    fn test_error_messages_are_actionable() {
        let msg = CredentialError::NotConfigured.to_string();
        assert!(msg.contains("WEBFLOW_AUTH_001"));
        assert!(msg.contains("WEBFLOW_API_TOKEN"));
    }
}
