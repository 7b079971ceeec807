//! Site redirect requests.
//!
//! Endpoints:
//! - `GET    /v2/sites/{site_id}/redirects`
//! - `POST   /v2/sites/{site_id}/redirects`
//! - `PATCH  /v2/sites/{site_id}/redirects/{redirect_id}`
//! - `DELETE /v2/sites/{site_id}/redirects/{redirect_id}`

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::client::{CREATED, OK, WebflowClient, decode, expect_deleted};
use crate::error::ClientResult;

/// A redirect rule as returned by the API.
///
/// The list endpoint omits `statusCode`, in which case it decodes as `0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectRule {
    /// Webflow-assigned ID
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Path to redirect from
    #[serde(rename = "fromUrl")]
    pub source_path: String,
    /// Path to redirect to
    #[serde(rename = "toUrl")]
    pub destination_path: String,
    /// 301 or 302, `0` when omitted by the API
    #[serde(rename = "statusCode", default)]
    pub status_code: u16,
}

/// Body for creating a redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRedirect {
    /// Path to redirect from
    #[serde(rename = "fromUrl")]
    pub source_path: String,
    /// Path to redirect to
    #[serde(rename = "toUrl")]
    pub destination_path: String,
    /// 301 or 302
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

/// Body for patching a redirect.
///
/// There is deliberately no `fromUrl`: the API rejects a patch carrying the
/// redirect's own source path with a uniqueness conflict.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RedirectPatch {
    /// New destination path
    #[serde(rename = "toUrl", skip_serializing_if = "Option::is_none")]
    pub destination_path: Option<String>,
    /// New status code
    #[serde(rename = "statusCode", skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct RedirectList {
    #[serde(default)]
    redirects: Vec<RedirectRule>,
}

impl WebflowClient {
    /// List all redirects of a site.
    ///
    /// # Errors
    ///
    /// Returns a classified error for any status other than 200.
    #[instrument(skip(self, cancel))]
    pub async fn list_redirects(
        &self,
        cancel: &CancellationToken,
        site_id: &str,
    ) -> ClientResult<Vec<RedirectRule>> {
        let url = self.url(&["sites", site_id, "redirects"])?;
        let response = self.send_empty(cancel, Method::GET, url).await?;
        let list: RedirectList = decode(&response, OK)?;
        debug!(count = list.redirects.len(), "Listed redirects");
        Ok(list.redirects)
    }

    /// Create a redirect.
    ///
    /// # Errors
    ///
    /// Returns a classified error for any status other than 200, 201 or 202.
    #[instrument(skip(self, cancel))]
    pub async fn create_redirect(
        &self,
        cancel: &CancellationToken,
        site_id: &str,
        redirect: &NewRedirect,
    ) -> ClientResult<RedirectRule> {
        let url = self.url(&["sites", site_id, "redirects"])?;
        let response = self.send(cancel, Method::POST, url, Some(redirect)).await?;
        decode(&response, CREATED)
    }

    /// Patch a redirect.
    ///
    /// # Errors
    ///
    /// Returns a classified error for any status other than 200.
    #[instrument(skip(self, cancel))]
    pub async fn update_redirect(
        &self,
        cancel: &CancellationToken,
        site_id: &str,
        redirect_id: &str,
        patch: &RedirectPatch,
    ) -> ClientResult<RedirectRule> {
        let url = self.url(&["sites", site_id, "redirects", redirect_id])?;
        let response = self.send(cancel, Method::PATCH, url, Some(patch)).await?;
        decode(&response, OK)
    }

    /// Delete a redirect. A redirect that is already gone counts as deleted.
    ///
    /// # Errors
    ///
    /// Returns a classified error for any status other than 200, 202, 204 or 404.
    #[instrument(skip(self, cancel))]
    pub async fn delete_redirect(
        &self,
        cancel: &CancellationToken,
        site_id: &str,
        redirect_id: &str,
    ) -> ClientResult<()> {
        let url = self.url(&["sites", site_id, "redirects", redirect_id])?;
        let response = self.send_empty(cancel, Method::DELETE, url).await?;
        expect_deleted(&response)
    }
}
