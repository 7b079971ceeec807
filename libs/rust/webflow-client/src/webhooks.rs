//! Webhook requests.
//!
//! The API has no update endpoint for webhooks.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use crate::client::{CREATED, OK, WebflowClient, decode, expect_deleted};
use crate::error::ClientResult;

/// A webhook as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    /// Webflow-assigned ID
    #[serde(default)]
    pub id: String,
    /// Event that triggers the webhook
    pub trigger_type: String,
    /// HTTPS endpoint receiving the events
    pub url: String,
    /// Workspace ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    /// Site ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_id: Option<String>,
    /// Last trigger timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_triggered: Option<String>,
    /// Creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<String>,
    /// Event filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Map<String, Value>>,
}

/// Body for creating a webhook.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWebhook {
    /// Event that triggers the webhook
    pub trigger_type: String,
    /// HTTPS endpoint receiving the events
    pub url: String,
    /// Event filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct WebhookList {
    #[serde(default)]
    webhooks: Vec<Webhook>,
}

impl WebflowClient {
    /// List the webhooks of a site.
    ///
    /// # Errors
    ///
    /// Returns a classified error for any status other than 200.
    #[instrument(skip(self, cancel))]
    pub async fn list_webhooks(
        &self,
        cancel: &CancellationToken,
        site_id: &str,
    ) -> ClientResult<Vec<Webhook>> {
        let url = self.url(&["sites", site_id, "webhooks"])?;
        let response = self.send_empty(cancel, Method::GET, url).await?;
        let list: WebhookList = decode(&response, OK)?;
        Ok(list.webhooks)
    }

    /// Fetch one webhook.
    ///
    /// # Errors
    ///
    /// Returns a classified error for any status other than 200.
    #[instrument(skip(self, cancel))]
    pub async fn get_webhook(
        &self,
        cancel: &CancellationToken,
        webhook_id: &str,
    ) -> ClientResult<Webhook> {
        let url = self.url(&["webhooks", webhook_id])?;
        let response = self.send_empty(cancel, Method::GET, url).await?;
        decode(&response, OK)
    }

    /// Create a webhook on a site.
    ///
    /// # Errors
    ///
    /// Returns a classified error for any status other than 200, 201 or 202.
    #[instrument(skip(self, cancel, webhook), fields(trigger_type = %webhook.trigger_type))]
    pub async fn create_webhook(
        &self,
        cancel: &CancellationToken,
        site_id: &str,
        webhook: &NewWebhook,
    ) -> ClientResult<Webhook> {
        let url = self.url(&["sites", site_id, "webhooks"])?;
        let response = self.send(cancel, Method::POST, url, Some(webhook)).await?;
        decode(&response, CREATED)
    }

    /// Delete a webhook. A webhook that is already gone counts as deleted.
    ///
    /// # Errors
    ///
    /// Returns a classified error for any status other than 200, 202, 204 or 404.
    #[instrument(skip(self, cancel))]
    pub async fn delete_webhook(
        &self,
        cancel: &CancellationToken,
        webhook_id: &str,
    ) -> ClientResult<()> {
        let url = self.url(&["webhooks", webhook_id])?;
        let response = self.send_empty(cancel, Method::DELETE, url).await?;
        expect_deleted(&response)
    }
}
