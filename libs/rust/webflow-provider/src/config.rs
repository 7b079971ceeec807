//! Provider configuration and credential resolution.

use secrecy::{ExposeSecret, SecretString};
use std::env;
use std::time::Duration;
use tracing::debug;
use webflow_client::{ClientConfig, Endpoint, WebflowClient};
use webflow_common::{Credential, CredentialError, safe_field};

use crate::error::{ConfigError, ProviderResult};

/// Environment variable holding the API token.
pub const TOKEN_ENV: &str = "WEBFLOW_API_TOKEN";
/// Environment variable overriding the API base URL.
pub const BASE_URL_ENV: &str = "WEBFLOW_API_BASE_URL";
/// Environment variable overriding the rate-limit retry count.
pub const MAX_RETRIES_ENV: &str = "WEBFLOW_MAX_RETRIES";
/// Environment variable overriding the request timeout.
pub const HTTP_TIMEOUT_ENV: &str = "WEBFLOW_HTTP_TIMEOUT_SECS";

/// Provider configuration.
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    /// Explicitly configured token; takes precedence over the environment
    pub api_token: Option<SecretString>,
    /// Client settings
    pub client: ClientConfig,
}

impl ProviderConfig {
    /// Create a default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load overrides from the environment, reading `.env` if present.
    ///
    /// The token itself is resolved later by [`Self::resolve_credential`].
    ///
    /// # Errors
    ///
    /// Returns an error if an override is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load overrides through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if an override is present but unparseable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut client = ClientConfig::default();

        if let Some(base) = lookup(BASE_URL_ENV) {
            debug!(variable = BASE_URL_ENV, value = %safe_field(BASE_URL_ENV, &base), "Applying environment override");
            let endpoint = Endpoint::new(&base).map_err(|e| ConfigError::ParseError {
                name: BASE_URL_ENV.to_string(),
                reason: e.to_string(),
            })?;
            client = client.with_endpoint(endpoint);
        }
        if let Some(retries) = parse_var::<u32>(&lookup, MAX_RETRIES_ENV)? {
            let retry = client.retry.with_max_retries(retries);
            client = client.with_retry(retry);
        }
        if let Some(secs) = parse_var::<u64>(&lookup, HTTP_TIMEOUT_ENV)? {
            if secs == 0 {
                return Err(ConfigError::ParseError {
                    name: HTTP_TIMEOUT_ENV.to_string(),
                    reason: "timeout must be greater than 0".to_string(),
                });
            }
            let http = client.http.clone().with_timeout(Duration::from_secs(secs));
            client = client.with_http(http);
        }

        Ok(Self {
            api_token: None,
            client,
        })
    }

    /// Set the explicit API token.
    #[must_use]
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(SecretString::from(token.into()));
        self
    }

    /// Set the client configuration.
    #[must_use]
    pub fn with_client(mut self, client: ClientConfig) -> Self {
        self.client = client;
        self
    }

    /// Resolve the credential from configuration, then `WEBFLOW_API_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is configured or the token is malformed.
    pub fn resolve_credential(&self) -> Result<Credential, CredentialError> {
        self.resolve_with(|name| env::var(name).ok())
    }

    /// Resolve the credential, reading the environment through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is configured or the token is malformed.
    pub fn resolve_with<F>(&self, lookup: F) -> Result<Credential, CredentialError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = &self.api_token {
            if !token.expose_secret().is_empty() {
                debug!("Using API token from provider configuration");
                return Credential::from_secret(token.clone());
            }
        }
        match lookup(TOKEN_ENV) {
            Some(token) if !token.is_empty() => {
                debug!("Using API token from {TOKEN_ENV}");
                Credential::new(token)
            }
            _ => Err(CredentialError::NotConfigured),
        }
    }

    /// Build a client with the resolved credential.
    ///
    /// # Errors
    ///
    /// Returns credential or client construction errors.
    pub fn build_client(&self) -> ProviderResult<WebflowClient> {
        let credential = self.resolve_credential()?;
        WebflowClient::new(&self.client, &credential)
            .map_err(|e| ConfigError::Client(e).into())
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    lookup(name)
        .map(|value| {
            debug!(variable = name, value = %safe_field(name, &value), "Applying environment override");
            value.trim().parse().map_err(|e: T::Err| ConfigError::ParseError {
                name: name.to_string(),
                reason: e.to_string(),
            })
        })
        .transpose()
}
