//! Test fixtures with sample API payloads.

use serde_json::{Value, json};

/// Sample site ID.
pub const SITE_ID: &str = "5f0c8c9e1c9d440000e8d8c3";

/// Sample collection ID.
pub const COLLECTION_ID: &str = "6a1b2c3d4e5f60718293a4b5";

/// Locale the server assigns to items created without one.
pub const LOCALE_ID: &str = "653ad57de882f528b32e810e";

/// Sample API token.
pub const TOKEN: &str = "wf_test_token_0123456789";

/// Body of a redirect list holding one rule.
///
/// Like the real list endpoint, the rule carries no `statusCode`.
#[must_use]
pub fn redirect_list(id: &str, from: &str, to: &str) -> Value {
    json!({
        "redirects": [
            {"id": id, "fromUrl": from, "toUrl": to}
        ]
    })
}

/// Body of a created redirect.
#[must_use]
pub fn redirect(id: &str, from: &str, to: &str, status_code: u16) -> Value {
    json!({"id": id, "fromUrl": from, "toUrl": to, "statusCode": status_code})
}

/// Body of a webhook.
#[must_use]
pub fn webhook(id: &str, trigger_type: &str, url: &str) -> Value {
    json!({
        "id": id,
        "triggerType": trigger_type,
        "url": url,
        "workspaceId": "64f0a1b2c3d4e5f6a7b8c9d0",
        "siteId": SITE_ID,
        "createdOn": "2024-03-01T12:00:00Z"
    })
}

/// Body of a collection item with server-populated fields.
#[must_use]
pub fn collection_item(id: &str, field_data: Value) -> Value {
    json!({
        "id": id,
        "cmsLocaleId": LOCALE_ID,
        "lastPublished": null,
        "lastUpdated": "2024-03-02T08:30:00Z",
        "createdOn": "2024-03-02T08:30:00Z",
        "isArchived": false,
        "isDraft": false,
        "fieldData": field_data
    })
}

/// Body of a typical error response.
#[must_use]
pub fn error_body(code: &str, message: &str) -> Value {
    json!({"code": code, "message": message})
}
