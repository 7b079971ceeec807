//! Webflow API client with a layered, rate-limit aware transport.
//!
//! Requests flow through `RetryTransport -> AuthenticatedTransport -> HttpTransport`.
//! Resource request functions build a request, send it through the stack and
//! decode the typed result or classify the error.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod auth;
pub mod client;
pub mod collection_items;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod redirects;
pub mod retry;
pub mod transport;
pub mod webhooks;

pub use auth::{AuthLayer, AuthenticatedTransport};
pub use client::WebflowClient;
pub use collection_items::{CollectionItem, ItemPayload};
pub use config::ClientConfig;
pub use endpoint::{DEFAULT_BASE_URL, Endpoint};
pub use error::{ClientError, ClientResult, NetworkError};
pub use redirects::{NewRedirect, RedirectPatch, RedirectRule};
pub use retry::{RetryLayer, RetryTransport};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport, TransportError};
pub use webhooks::{NewWebhook, Webhook};

pub use tokio_util::sync::CancellationToken;
