//! Webflow API client.
//!
//! Owns the layered transport stack and turns raw responses into typed
//! results or classified errors. Resource-specific request functions live in
//! sibling modules as inherent methods on [`WebflowClient`].

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;
use tracing::{debug, instrument, warn};
use url::Url;
use webflow_common::logging::DEFAULT_LOG_TRUNCATE;
use webflow_common::{ApiError, Credential, truncate_for_logging};

use crate::auth::AuthLayer;
use crate::config::ClientConfig;
use crate::endpoint::Endpoint;
use crate::error::{ClientError, ClientResult};
use crate::retry::RetryLayer;
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Transport};

/// Statuses accepted for reads and updates.
pub(crate) const OK: &[StatusCode] = &[StatusCode::OK];

/// Statuses accepted for creates; the API may accept asynchronously.
pub(crate) const CREATED: &[StatusCode] =
    &[StatusCode::OK, StatusCode::CREATED, StatusCode::ACCEPTED];

/// Webflow API client.
///
/// Cheap to clone; clones share the same connection pool and transport stack.
#[derive(Clone)]
pub struct WebflowClient {
    transport: Arc<dyn Transport>,
    endpoint: Endpoint,
}

impl fmt::Debug for WebflowClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebflowClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl WebflowClient {
    /// Create a client with a pooled HTTP transport.
    ///
    /// The stack is `retry -> auth -> http`: rate-limited responses are
    /// retried with fresh authenticated attempts.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the credential
    /// cannot be encoded as a header.
    pub fn new(config: &ClientConfig, credential: &Credential) -> ClientResult<Self> {
        let base = HttpTransport::new(&config.http)?;
        Self::layered(base, config, credential)
    }

    /// Create a client stacking the auth and retry layers over `base`.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential cannot be encoded as a header.
    pub fn layered<T>(base: T, config: &ClientConfig, credential: &Credential) -> ClientResult<Self>
    where
        T: Transport + 'static,
    {
        let transport = ServiceBuilder::new()
            .layer(RetryLayer::new(config.retry))
            .layer(AuthLayer::new(credential, &config.version)?)
            .service(base);
        Ok(Self::with_transport(Arc::new(transport), config.endpoint.clone()))
    }

    /// Create a client over a fully assembled transport.
    #[must_use]
    pub fn with_transport(transport: Arc<dyn Transport>, endpoint: Endpoint) -> Self {
        Self {
            transport,
            endpoint,
        }
    }

    /// Endpoint in use.
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub(crate) fn url(&self, segments: &[&str]) -> ClientResult<Url> {
        self.endpoint.url(segments)
    }

    /// Send one logical request through the transport stack.
    ///
    /// Cancellation is checked before anything is sent.
    #[instrument(skip(self, body, cancel), fields(path = %url.path()))]
    pub(crate) async fn send<B>(
        &self,
        cancel: &CancellationToken,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> ClientResult<ApiResponse>
    where
        B: Serialize + ?Sized + Sync,
    {
        if cancel.is_cancelled() {
            debug!("Request skipped, operation already cancelled");
            return Err(ClientError::Cancelled);
        }

        let mut request = ApiRequest::new(method, url);
        if let Some(body) = body {
            request = request.with_json(body).map_err(ClientError::Encode)?;
        }

        Ok(self.transport.send(request, cancel).await?)
    }

    /// Send a request without body.
    pub(crate) async fn send_empty(
        &self,
        cancel: &CancellationToken,
        method: Method,
        url: Url,
    ) -> ClientResult<ApiResponse> {
        self.send::<()>(cancel, method, url, None).await
    }
}

/// Decode a response whose status is in `accepted`, classify it otherwise.
pub(crate) fn decode<T: DeserializeOwned>(
    response: &ApiResponse,
    accepted: &[StatusCode],
) -> ClientResult<T> {
    if !accepted.contains(&response.status) {
        return Err(classify(response));
    }
    response.json().map_err(|source| ClientError::Decode {
        source,
        body: truncate_for_logging(&response.text(), DEFAULT_LOG_TRUNCATE),
    })
}

/// Accept a response whose status is in `accepted`, ignoring the body.
pub(crate) fn expect_status(response: &ApiResponse, accepted: &[StatusCode]) -> ClientResult<()> {
    if accepted.contains(&response.status) {
        Ok(())
    } else {
        Err(classify(response))
    }
}

/// Interpret a delete response; an already absent resource is success.
pub(crate) fn expect_deleted(response: &ApiResponse) -> ClientResult<()> {
    match response.status {
        StatusCode::OK | StatusCode::ACCEPTED | StatusCode::NO_CONTENT => Ok(()),
        StatusCode::NOT_FOUND => {
            debug!("Resource already absent, treating delete as successful");
            Ok(())
        }
        _ => Err(classify(response)),
    }
}

/// Classify a non-success response into the API error taxonomy.
pub(crate) fn classify(response: &ApiResponse) -> ClientError {
    let body = response.text();
    warn!(
        status = response.status.as_u16(),
        body = %truncate_for_logging(&body, DEFAULT_LOG_TRUNCATE),
        "Webflow API returned an error"
    );
    ApiError::from_status(response.status.as_u16(), body).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::StubTransport;
    use crate::transport::TransportError;
    use serde::Deserialize;
    use webflow_common::RetryPolicy;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: String,
    }

    fn client(replies: Vec<Result<ApiResponse, TransportError>>) -> (WebflowClient, Arc<StubTransport>) {
        let stub = Arc::new(StubTransport::new(replies));
        let client = WebflowClient::with_transport(stub.clone(), Endpoint::default());
        (client, stub)
    }

    #[tokio::test]
    async fn test_cancelled_before_send() {
        let (client, stub) = client(vec![StubTransport::status(200, "{}")]);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let url = client.url(&["sites"]).unwrap();
        let err = client.send_empty(&cancel, Method::GET, url).await.unwrap_err();

        assert!(err.is_cancelled());
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_body_serialized_as_json() {
        let (client, stub) = client(vec![StubTransport::status(200, "{}")]);
        let url = client.url(&["sites"]).unwrap();

        client
            .send(&CancellationToken::new(), Method::POST, url, Some(&serde_json::json!({"a": 1})))
            .await
            .unwrap();

        let sent = stub.requests();
        assert_eq!(sent[0].method, Method::POST);
        assert_eq!(sent[0].body.as_deref(), Some(br#"{"a":1}"#.as_slice()));
    }

    #[test]
    fn test_decode_success() {
        let response = ApiResponse::new(StatusCode::CREATED, br#"{"id":"x"}"#.to_vec());
        let item: Item = decode(&response, CREATED).unwrap();
        assert_eq!(item, Item { id: "x".into() });
    }

    #[test]
    fn test_decode_rejects_unaccepted_status() {
        let response = ApiResponse::new(StatusCode::CREATED, br#"{"id":"x"}"#.to_vec());
        let err = decode::<Item>(&response, OK).unwrap_err();
        assert!(matches!(err, ClientError::Api(ApiError::Unexpected { status: 201, .. })));
    }

    #[test]
    fn test_decode_malformed_body() {
        let response = ApiResponse::new(StatusCode::OK, b"not json".to_vec());
        let err = decode::<Item>(&response, OK).unwrap_err();
        assert!(matches!(err, ClientError::Decode { ref body, .. } if body == "not json"));
    }

    #[test]
    fn test_classification_keeps_body() {
        let response = ApiResponse::new(StatusCode::BAD_REQUEST, b"bad field".to_vec());
        match classify(&response) {
            ClientError::Api(ApiError::BadRequest { status, body }) => {
                assert_eq!(status, 400);
                assert_eq!(body, "bad field");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rate_limit_after_retries_is_classified() {
        let response = ApiResponse::new(StatusCode::TOO_MANY_REQUESTS, Vec::new());
        assert!(expect_status(&response, OK).unwrap_err().is_rate_limited());
    }

    #[test]
    fn test_delete_idempotent() {
        for status in [StatusCode::OK, StatusCode::NO_CONTENT, StatusCode::NOT_FOUND] {
            assert!(expect_deleted(&ApiResponse::new(status, Vec::new())).is_ok());
        }
        let err = expect_deleted(&ApiResponse::new(StatusCode::FORBIDDEN, Vec::new())).unwrap_err();
        assert!(matches!(err, ClientError::Api(ApiError::Forbidden { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_layered_stack_authenticates_and_retries() {
        let stub = Arc::new(StubTransport::new(vec![
            StubTransport::status(429, ""),
            StubTransport::status(200, r#"{"id":"x"}"#),
        ]));
        let config = ClientConfig::default().with_retry(RetryPolicy::default());
        let credential = Credential::new("wf_layered_token_123").unwrap();
        let client = WebflowClient::layered(stub.clone(), &config, &credential).unwrap();

        let url = client.url(&["webhooks", "x"]).unwrap();
        let response = client
            .send_empty(&CancellationToken::new(), Method::GET, url)
            .await
            .unwrap();
        let item: Item = decode(&response, OK).unwrap();

        assert_eq!(item.id, "x");
        assert_eq!(stub.calls(), 2);
        for request in stub.requests() {
            assert_eq!(
                request.headers[reqwest::header::AUTHORIZATION],
                "Bearer wf_layered_token_123"
            );
        }
    }
}
