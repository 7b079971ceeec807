//! Authentication tower layer.
//!
//! Injects the bearer token and client identification headers into every
//! outbound request. The token is validated once, when the layer is built.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderName, HeaderValue, USER_AGENT};
use tokio_util::sync::CancellationToken;
use tower::Layer;
use webflow_common::{Credential, CredentialError};

use crate::transport::{ApiRequest, ApiResponse, Transport, TransportError};

/// Webflow API version header.
pub const ACCEPT_VERSION: HeaderName = HeaderName::from_static("accept-version");

/// Webflow API version requested on every call.
pub const API_VERSION: &str = "2.0.0";

/// Client identifier prefix for the `User-Agent` header.
pub const CLIENT_NAME: &str = "webflow-provider";

/// Layer producing [`AuthenticatedTransport`].
#[derive(Debug, Clone)]
pub struct AuthLayer {
    authorization: HeaderValue,
    user_agent: HeaderValue,
}

impl AuthLayer {
    /// Build the layer from a validated credential and the client version.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Malformed`] if the token cannot be encoded
    /// as a header value.
    pub fn new(credential: &Credential, version: &str) -> Result<Self, CredentialError> {
        let mut authorization =
            HeaderValue::from_str(&credential.bearer()).map_err(|_| CredentialError::Malformed)?;
        authorization.set_sensitive(true);

        let user_agent = HeaderValue::from_str(&format!("{CLIENT_NAME}/{version}"))
            .unwrap_or_else(|_| HeaderValue::from_static(CLIENT_NAME));

        Ok(Self {
            authorization,
            user_agent,
        })
    }

    /// Build the layer from a raw token.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Empty`] for an empty token, or any other
    /// validation failure from [`Credential::new`].
    pub fn from_token(token: &str, version: &str) -> Result<Self, CredentialError> {
        Self::new(&Credential::new(token)?, version)
    }
}

impl<T> Layer<T> for AuthLayer {
    type Service = AuthenticatedTransport<T>;

    fn layer(&self, inner: T) -> Self::Service {
        AuthenticatedTransport {
            inner,
            authorization: self.authorization.clone(),
            user_agent: self.user_agent.clone(),
        }
    }
}

/// Transport decorator adding authentication headers.
#[derive(Debug, Clone)]
pub struct AuthenticatedTransport<T> {
    inner: T,
    authorization: HeaderValue,
    user_agent: HeaderValue,
}

impl<T> AuthenticatedTransport<T> {
    /// Get a reference to the inner transport.
    pub const fn get_ref(&self) -> &T {
        &self.inner
    }
}

#[async_trait]
impl<T: Transport> Transport for AuthenticatedTransport<T> {
    async fn send(
        &self,
        mut request: ApiRequest,
        cancel: &CancellationToken,
    ) -> Result<ApiResponse, TransportError> {
        let headers = &mut request.headers;
        headers.insert(AUTHORIZATION, self.authorization.clone());
        headers.insert(USER_AGENT, self.user_agent.clone());
        headers.insert(ACCEPT_VERSION, HeaderValue::from_static(API_VERSION));
        headers
            .entry(ACCEPT)
            .or_insert_with(|| HeaderValue::from_static("application/json"));

        self.inner.send(request, cancel).await
    }
}
