//! Provider error types using thiserror 2.0.

use thiserror::Error;
use webflow_client::ClientError;
use webflow_common::CredentialError;

use crate::identifier::ResourceKind;

/// A desired-state value failed local validation.
///
/// Raised before any network call and never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field missing or empty
    #[error("{field} is required but was not provided. {hint}")]
    Required {
        /// Field name as written in configuration
        field: &'static str,
        /// Where to find a valid value
        hint: &'static str,
    },

    /// Value does not match the expected format
    #[error("{field} has an invalid format: got {value:?}, expected {expected}. {hint}")]
    InvalidFormat {
        /// Field name as written in configuration
        field: &'static str,
        /// Offending value
        value: String,
        /// Expected format
        expected: &'static str,
        /// How to fix it
        hint: &'static str,
    },

    /// Value outside the allowed set
    #[error("{field} has an unsupported value {value:?}; allowed values: {allowed}")]
    NotAllowed {
        /// Field name as written in configuration
        field: &'static str,
        /// Offending value
        value: String,
        /// Allowed values
        allowed: String,
    },
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable could not be parsed
    #[error("Failed to parse environment variable {name}: {reason}")]
    ParseError {
        /// Variable name
        name: String,
        /// Parse failure
        reason: String,
    },

    /// The client could not be built from the configuration
    #[error("Failed to build the Webflow client: {0}")]
    Client(#[source] ClientError),
}

/// Errors returned by resource controllers and the reconciler.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Desired state rejected locally
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Identifier string is malformed
    #[error(
        "invalid resource identifier {value:?}: expected format {expected}. \
         Use the identifier reported when the resource was created"
    )]
    InvalidIdentifier {
        /// Offending input
        value: String,
        /// Expected format
        expected: String,
    },

    /// An API call failed
    #[error("failed to {operation} {id}: {source}")]
    Client {
        /// Operation in progress, e.g. `create redirect`
        operation: &'static str,
        /// Resource identifier or parent ID
        id: String,
        /// Underlying client error
        #[source]
        source: ClientError,
    },

    /// The resource exists remotely but a post-create step failed
    #[error(
        "{id} was created but a follow-up step failed: {source}. \
         The resource exists in Webflow; import it with this identifier or delete it before retrying"
    )]
    PartialCreate {
        /// Identifier of the created resource
        id: String,
        /// Underlying client error
        #[source]
        source: ClientError,
    },

    /// Create succeeded without an assigned ID
    #[error("Webflow API returned no id for the created {kind}; the response format may have changed")]
    MissingId {
        /// Resource kind
        kind: ResourceKind,
    },

    /// The kind has no update endpoint
    #[error("{kind} resources cannot be updated in place; every change requires replacement")]
    UpdateUnsupported {
        /// Resource kind
        kind: ResourceKind,
    },

    /// Preview ID could not be derived
    #[error("failed to serialize desired state: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration problem
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Credential missing or malformed
    #[error(transparent)]
    Credential(#[from] CredentialError),
}

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

impl ProviderError {
    /// Wrap a client error with operation and identifier context.
    #[must_use]
    pub fn client(operation: &'static str, id: impl Into<String>, source: ClientError) -> Self {
        Self::Client {
            operation,
            id: id.into(),
            source,
        }
    }

    /// Check if the error was raised locally before any network call.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::InvalidIdentifier { .. })
    }

    /// Check if the operation was cancelled by the caller.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        match self {
            Self::Client { source, .. } | Self::PartialCreate { source, .. } => {
                source.is_cancelled()
            }
            _ => false,
        }
    }

    /// Underlying client error, if any.
    #[must_use]
    pub const fn client_error(&self) -> Option<&ClientError> {
        match self {
            Self::Client { source, .. } | Self::PartialCreate { source, .. } => Some(source),
            _ => None,
        }
    }
}
