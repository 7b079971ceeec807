//! Transport abstraction shared by every layer of the client stack.
//!
//! A [`Transport`] sends one fully materialized [`ApiRequest`] and returns a
//! fully drained [`ApiResponse`]. Decorators such as the authentication and
//! retry transports wrap an inner transport and implement the same trait, so
//! the stack can be composed with tower layers and shared behind an `Arc`.

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, RETRY_AFTER};
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use url::Url;
use webflow_common::{HttpConfig, build_http_client};

/// One HTTP request attempt.
///
/// The body is held as bytes so every retry attempt can send an identical,
/// independent clone.
#[derive(Clone)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute request URL
    pub url: Url,
    /// Request headers
    pub headers: HeaderMap,
    /// Serialized request body
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    /// Create a request without body.
    #[must_use]
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if `body` cannot be serialized.
    pub fn with_json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_vec(body)?);
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(self)
    }

    /// URL path, used in logs instead of the full URL.
    #[must_use]
    pub fn path(&self) -> &str {
        self.url.path()
    }
}

impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header_names: Vec<&str> = self.headers.keys().map(HeaderName::as_str).collect();
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("headers", &header_names)
            .field("body_len", &self.body.as_ref().map_or(0, Vec::len))
            .finish()
    }
}

/// A fully read HTTP response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// Response status
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw response body
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Create a response with the given status and body.
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Add a header.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Check for HTTP 429.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        self.status == StatusCode::TOO_MANY_REQUESTS
    }

    /// Raw `Retry-After` header value, if present and readable.
    #[must_use]
    pub fn retry_after(&self) -> Option<&str> {
        self.headers.get(RETRY_AFTER).and_then(|v| v.to_str().ok())
    }

    /// Body as text, with invalid UTF-8 replaced.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Failure to obtain any HTTP response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The request or connection timed out
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The connection could not be established
    #[error("connection failed: {0}")]
    Connect(String),

    /// Any other I/O or protocol failure
    #[error("network error: {0}")]
    Network(String),

    /// The caller cancelled the operation
    #[error("request cancelled")]
    Cancelled,
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Sends API requests.
///
/// Implementations must be safe to share across concurrent requests and
/// must not keep per-request state between calls.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and return the fully read response.
    async fn send(
        &self,
        request: ApiRequest,
        cancel: &CancellationToken,
    ) -> Result<ApiResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(
        &self,
        request: ApiRequest,
        cancel: &CancellationToken,
    ) -> Result<ApiResponse, TransportError> {
        (**self).send(request, cancel).await
    }
}

/// Base transport backed by a pooled reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build the pooled client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the reqwest client cannot be built.
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::from_client(build_http_client(config)?))
    }

    /// Wrap an existing client.
    #[must_use]
    pub const fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        request: ApiRequest,
        cancel: &CancellationToken,
    ) -> Result<ApiResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let exchange = async {
            let response = builder.send().await?;
            let status = response.status();
            let headers = response.headers().clone();
            let body = response.bytes().await?.to_vec();
            Ok::<_, TransportError>(ApiResponse {
                status,
                headers,
                body,
            })
        };

        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(TransportError::Cancelled),
            result = exchange => result,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::AUTHORIZATION;

    fn url() -> Url {
        Url::parse("https://api.webflow.com/v2/sites/abc/redirects").unwrap()
    }

    #[test]
    fn test_json_body_sets_content_type() {
        let request = ApiRequest::new(Method::POST, url())
            .with_json(&serde_json::json!({"fromUrl": "/a"}))
            .unwrap();
        assert_eq!(request.headers[CONTENT_TYPE], "application/json");
        assert_eq!(request.body.as_deref(), Some(br#"{"fromUrl":"/a"}"#.as_slice()));
        assert_eq!(request.path(), "/v2/sites/abc/redirects");
    }

    #[test]
    fn test_request_debug_hides_header_values() {
        let mut request = ApiRequest::new(Method::GET, url());
        request
            .headers
            .insert(AUTHORIZATION, HeaderValue::from_static("Bearer secret-value-123"));
        let debug = format!("{request:?}");
        assert!(debug.contains("authorization"));
        assert!(!debug.contains("secret-value-123"));
    }

    #[test]
    fn test_retry_after_header() {
        let response = ApiResponse::new(StatusCode::TOO_MANY_REQUESTS, Vec::new())
            .with_header(RETRY_AFTER, HeaderValue::from_static("3"));
        assert!(response.is_rate_limited());
        assert_eq!(response.retry_after(), Some("3"));

        let response = ApiResponse::new(StatusCode::OK, Vec::new());
        assert!(!response.is_rate_limited());
        assert_eq!(response.retry_after(), None);
    }

    #[test]
    fn test_response_text_and_json() {
        let response = ApiResponse::new(StatusCode::OK, br#"{"id":"r1"}"#.to_vec());
        assert_eq!(response.text(), r#"{"id":"r1"}"#);
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["id"], "r1");
    }

    #[tokio::test]
    async fn test_http_transport_honours_cancellation() {
        let transport = HttpTransport::new(&HttpConfig::default()).unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = transport
            .send(ApiRequest::new(Method::GET, url()), &cancel)
            .await;
        assert_eq!(result.unwrap_err(), TransportError::Cancelled);
    }
}
