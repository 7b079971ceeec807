//! CMS collection item requests.

use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::client::{CREATED, OK, WebflowClient, decode, expect_deleted, expect_status};
use crate::error::ClientResult;

/// A collection item as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionItem {
    /// Webflow-assigned ID
    #[serde(default)]
    pub id: String,
    /// Locale, populated by the server on localized sites
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cms_locale_id: Option<String>,
    /// Last publish timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_published: Option<String>,
    /// Last update timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    /// Creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<String>,
    /// Archived flag
    #[serde(default)]
    pub is_archived: bool,
    /// Draft flag
    #[serde(default)]
    pub is_draft: bool,
    /// Field values keyed by field slug
    #[serde(default)]
    pub field_data: Map<String, Value>,
}

/// Body for creating or patching a collection item.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPayload {
    /// Field values keyed by field slug
    pub field_data: Map<String, Value>,
    /// Archived flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
    /// Draft flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_draft: Option<bool>,
    /// Locale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cms_locale_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ItemList {
    #[serde(default)]
    items: Vec<CollectionItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PublishRequest<'a> {
    item_ids: &'a [String],
}

impl WebflowClient {
    /// List the items of a collection.
    ///
    /// # Errors
    ///
    /// Returns a classified error for any status other than 200.
    #[instrument(skip(self, cancel))]
    pub async fn list_collection_items(
        &self,
        cancel: &CancellationToken,
        collection_id: &str,
    ) -> ClientResult<Vec<CollectionItem>> {
        let url = self.url(&["collections", collection_id, "items"])?;
        let response = self.send_empty(cancel, Method::GET, url).await?;
        let list: ItemList = decode(&response, OK)?;
        Ok(list.items)
    }

    /// Fetch one collection item.
    ///
    /// # Errors
    ///
    /// Returns a classified error for any status other than 200.
    #[instrument(skip(self, cancel))]
    pub async fn get_collection_item(
        &self,
        cancel: &CancellationToken,
        collection_id: &str,
        item_id: &str,
    ) -> ClientResult<CollectionItem> {
        let url = self.url(&["collections", collection_id, "items", item_id])?;
        let response = self.send_empty(cancel, Method::GET, url).await?;
        decode(&response, OK)
    }

    /// Create a collection item.
    ///
    /// # Errors
    ///
    /// Returns a classified error for any status other than 200, 201 or 202.
    #[instrument(skip(self, cancel, item))]
    pub async fn create_collection_item(
        &self,
        cancel: &CancellationToken,
        collection_id: &str,
        item: &ItemPayload,
    ) -> ClientResult<CollectionItem> {
        let url = self.url(&["collections", collection_id, "items"])?;
        let response = self.send(cancel, Method::POST, url, Some(item)).await?;
        decode(&response, CREATED)
    }

    /// Patch a collection item.
    ///
    /// # Errors
    ///
    /// Returns a classified error for any status other than 200.
    #[instrument(skip(self, cancel, patch))]
    pub async fn update_collection_item(
        &self,
        cancel: &CancellationToken,
        collection_id: &str,
        item_id: &str,
        patch: &ItemPayload,
    ) -> ClientResult<CollectionItem> {
        let url = self.url(&["collections", collection_id, "items", item_id])?;
        let response = self.send(cancel, Method::PATCH, url, Some(patch)).await?;
        decode(&response, OK)
    }

    /// Delete a collection item. An item that is already gone counts as deleted.
    ///
    /// # Errors
    ///
    /// Returns a classified error for any status other than 200, 202, 204 or 404.
    #[instrument(skip(self, cancel))]
    pub async fn delete_collection_item(
        &self,
        cancel: &CancellationToken,
        collection_id: &str,
        item_id: &str,
    ) -> ClientResult<()> {
        let url = self.url(&["collections", collection_id, "items", item_id])?;
        let response = self.send_empty(cancel, Method::DELETE, url).await?;
        expect_deleted(&response)
    }

    /// Publish items of a collection to the live site.
    ///
    /// # Errors
    ///
    /// Returns a classified error for any status other than 200 or 202.
    #[instrument(skip(self, cancel))]
    pub async fn publish_collection_items(
        &self,
        cancel: &CancellationToken,
        collection_id: &str,
        item_ids: &[String],
    ) -> ClientResult<()> {
        let url = self.url(&["collections", collection_id, "items", "publish"])?;
        let body = PublishRequest { item_ids };
        let response = self.send(cancel, Method::POST, url, Some(&body)).await?;
        expect_status(&response, &[StatusCode::OK, StatusCode::ACCEPTED])?;
        debug!(count = item_ids.len(), "Published collection items");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_item_with_server_fields() {
        let item: CollectionItem = serde_json::from_value(serde_json::json!({
            "id": "i1",
            "cmsLocaleId": "loc",
            "isArchived": false,
            "isDraft": true,
            "createdOn": "2024-05-01T10:00:00Z",
            "fieldData": {"name": "Post", "slug": "post"}
        }))
        .unwrap();
        assert_eq!(item.cms_locale_id.as_deref(), Some("loc"));
        assert!(item.is_draft);
        assert_eq!(item.field_data["slug"], "post");
    }

    #[test]
    fn test_payload_omits_unset_optionals() {
        let mut field_data = Map::new();
        field_data.insert("name".into(), Value::from("Post"));
        let body = serde_json::to_value(ItemPayload {
            field_data,
            ..ItemPayload::default()
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"fieldData": {"name": "Post"}}));
    }

    #[test]
    fn test_publish_request_wire_format() {
        let ids = vec!["a".to_string(), "b".to_string()];
        let body = serde_json::to_value(PublishRequest { item_ids: &ids }).unwrap();
        assert_eq!(body, serde_json::json!({"itemIds": ["a", "b"]}));
    }
}
