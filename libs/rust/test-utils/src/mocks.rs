//! Mock transports for testing.
//!
//! [`ScriptedTransport`] replays a fixed sequence of replies, counts calls and
//! records every request it receives.

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{HeaderValue, RETRY_AFTER};
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;
use webflow_client::{ApiRequest, ApiResponse, Transport, TransportError};

/// Build a response with a JSON body.
///
/// # Panics
///
/// Panics if `status` is not a valid HTTP status code.
#[must_use]
pub fn json_response(status: u16, body: &serde_json::Value) -> ApiResponse {
    ApiResponse::new(status_code(status), body.to_string())
}

/// Build a response without body.
///
/// # Panics
///
/// Panics if `status` is not a valid HTTP status code.
#[must_use]
pub fn empty_response(status: u16) -> ApiResponse {
    ApiResponse::new(status_code(status), Vec::new())
}

/// Build a 429 response, optionally carrying `Retry-After`.
///
/// # Panics
///
/// Panics if `retry_after` is not a valid header value.
#[must_use]
pub fn rate_limited(retry_after: Option<&str>) -> ApiResponse {
    let response = empty_response(429);
    match retry_after {
        Some(value) => response.with_header(
            RETRY_AFTER,
            HeaderValue::from_str(value).unwrap_or_else(|_| panic!("invalid header value {value:?}")),
        ),
        None => response,
    }
}

fn status_code(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or_else(|_| panic!("invalid status code {status}"))
}

/// What to do once the script is exhausted.
#[derive(Debug, Clone)]
enum Exhausted {
    Fail,
    Repeat(ApiResponse),
}

/// Transport replaying scripted replies in order.
#[derive(Debug)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<ApiResponse, TransportError>>>,
    requests: Mutex<Vec<ApiRequest>>,
    exhausted: Exhausted,
}

impl ScriptedTransport {
    /// Replay `replies`; further calls fail with a network error.
    #[must_use]
    pub fn new(replies: Vec<Result<ApiResponse, TransportError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::default(),
            exhausted: Exhausted::Fail,
        }
    }

    /// Replay successful responses.
    #[must_use]
    pub fn responses(responses: Vec<ApiResponse>) -> Self {
        Self::new(responses.into_iter().map(Ok).collect())
    }

    /// Answer every call with `response`.
    #[must_use]
    pub fn always(response: ApiResponse) -> Self {
        Self {
            replies: Mutex::default(),
            requests: Mutex::default(),
            exhausted: Exhausted::Repeat(response),
        }
    }

    /// Number of requests received.
    ///
    /// # Panics
    ///
    /// Panics if the request log is poisoned.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap_or_else(|e| panic!("poisoned: {e}")).len()
    }

    /// Requests received, in order.
    ///
    /// # Panics
    ///
    /// Panics if the request log is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap_or_else(|e| panic!("poisoned: {e}")).clone()
    }

    fn next_reply(&self) -> Result<ApiResponse, TransportError> {
        let scripted = self
            .replies
            .lock()
            .unwrap_or_else(|e| panic!("poisoned: {e}"))
            .pop_front();
        match (scripted, &self.exhausted) {
            (Some(reply), _) => reply,
            (None, Exhausted::Repeat(response)) => Ok(response.clone()),
            (None, Exhausted::Fail) => Err(TransportError::Network("script exhausted".into())),
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(
        &self,
        request: ApiRequest,
        cancel: &CancellationToken,
    ) -> Result<ApiResponse, TransportError> {
        self.requests
            .lock()
            .unwrap_or_else(|e| panic!("poisoned: {e}"))
            .push(request);
        if cancel.is_cancelled() {
            return Err(TransportError::Cancelled);
        }
        self.next_reply()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;

    fn request() -> ApiRequest {
        ApiRequest::new(Method::GET, "https://api.webflow.com/v2/sites".parse().unwrap())
    }

    #[tokio::test]
    async fn test_replays_in_order_then_fails() {
        let transport = ScriptedTransport::responses(vec![empty_response(200), empty_response(204)]);
        let cancel = CancellationToken::new();

        assert_eq!(transport.send(request(), &cancel).await.unwrap().status, StatusCode::OK);
        assert_eq!(transport.send(request(), &cancel).await.unwrap().status, StatusCode::NO_CONTENT);
        assert!(matches!(
            transport.send(request(), &cancel).await,
            Err(TransportError::Network(_))
        ));
        assert_eq!(transport.calls(), 3);
    }

    #[tokio::test]
    async fn test_always_repeats() {
        let transport = ScriptedTransport::always(rate_limited(Some("2")));
        let cancel = CancellationToken::new();
        for _ in 0..5 {
            let response = transport.send(request(), &cancel).await.unwrap();
            assert_eq!(response.retry_after(), Some("2"));
        }
        assert_eq!(transport.calls(), 5);
    }

    #[test]
    fn test_json_response_body() {
        let response = json_response(201, &serde_json::json!({"id": "x"}));
        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.text(), r#"{"id":"x"}"#);
    }
}
