//! Shared proptest generators.
//!
//! Values produced here pass the provider's local validation unless the
//! generator name says otherwise.

use proptest::prelude::*;
use serde_json::{Map, Value};
use std::time::Duration;

/// Webhook trigger types accepted by the API.
pub const TRIGGER_TYPES: [&str; 15] = [
    "form_submission",
    "site_publish",
    "page_created",
    "page_metadata_updated",
    "page_deleted",
    "ecomm_new_order",
    "ecomm_order_changed",
    "ecomm_inventory_changed",
    "memberships_user_account_added",
    "memberships_user_account_updated",
    "memberships_user_account_deleted",
    "collection_item_created",
    "collection_item_changed",
    "collection_item_deleted",
    "collection_item_unpublished",
];

/// Generate 24-character hex object IDs (sites, collections).
pub fn object_id_strategy() -> impl Strategy<Value = String> {
    "[a-f0-9]{24}"
}

/// Generate opaque instance IDs without `/`.
pub fn instance_id_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_-]{1,32}"
}

/// Generate valid redirect paths.
pub fn path_strategy() -> impl Strategy<Value = String> {
    "(/[a-z0-9][a-z0-9_.-]{0,15}){1,4}"
}

/// Generate redirect status codes.
pub fn redirect_status_strategy() -> impl Strategy<Value = u16> {
    prop_oneof![Just(301u16), Just(302u16)]
}

/// Generate valid API tokens (printable ASCII, at least 10 characters).
///
/// Square brackets are excluded so no token equals the redaction marker.
pub fn token_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_.-]{10,64}"
}

/// Generate webhook trigger types.
pub fn trigger_type_strategy() -> impl Strategy<Value = String> {
    proptest::sample::select(TRIGGER_TYPES.to_vec()).prop_map(str::to_string)
}

/// Generate HTTPS webhook URLs.
pub fn webhook_url_strategy() -> impl Strategy<Value = String> {
    ("[a-z]{3,12}", "[a-z]{2,4}", "(/[a-z0-9]{1,10}){0,3}")
        .prop_map(|(host, tld, path)| format!("https://{host}.{tld}{path}"))
}

/// Generate a JSON scalar field value.
pub fn field_value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,20}".prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
    ]
}

/// Generate non-empty collection item field data.
pub fn field_data_strategy() -> impl Strategy<Value = Map<String, Value>> {
    proptest::collection::btree_map("[a-z][a-z0-9-]{0,10}", field_value_strategy(), 1..6)
        .prop_map(|fields| fields.into_iter().collect())
}

/// Generate retry counts.
pub fn max_retries_strategy() -> impl Strategy<Value = u32> {
    0u32..6
}

/// Generate backoff base delays (1ms to 2s).
pub fn base_delay_strategy() -> impl Strategy<Value = Duration> {
    (1u64..2000).prop_map(Duration::from_millis)
}

/// Generate API error statuses.
pub fn error_status_strategy() -> impl Strategy<Value = u16> {
    prop_oneof![
        Just(400u16),
        Just(401u16),
        Just(403u16),
        Just(404u16),
        Just(409u16),
        Just(429u16),
        Just(500u16),
        Just(502u16),
        Just(503u16),
    ]
}
