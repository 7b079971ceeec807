//! Local validation of desired-state values.
//!
//! Runs before any network call so malformed input fails fast with a message
//! naming the field, the expected format and a fix.

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

use crate::error::ValidationError;

/// Prefix of placeholder IDs produced in dry-run mode.
pub const PREVIEW_PREFIX: &str = "preview-";

/// Redirect status codes accepted by the API.
pub const REDIRECT_STATUS_CODES: [u16; 2] = [301, 302];

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

static OBJECT_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^[a-f0-9]{24}$").unwrap_or_else(|_| unreachable!("static pattern"))
});

static PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/[a-zA-Z0-9\-_/.]*$").unwrap_or_else(|_| unreachable!("static pattern"))
});

const SITE_ID_HINT: &str =
    "Find the site ID in Webflow under Site Settings > General, or via GET /v2/sites.";
const COLLECTION_ID_HINT: &str =
    "Find the collection ID in the Webflow CMS settings, or via GET /v2/sites/{siteId}/collections.";
const PATH_HINT: &str =
    "Use a path starting with '/' containing only letters, digits, '-', '_', '.' and '/', e.g. /old-page.";

/// Validate a site ID: 24 lowercase hex characters.
///
/// Placeholder IDs from dry-run parents are accepted so previews can chain.
///
/// # Errors
///
/// Returns an error if the ID is empty or malformed.
pub fn validate_site_id(site_id: &str) -> Result<(), ValidationError> {
    if site_id.is_empty() {
        return Err(ValidationError::Required {
            field: "siteId",
            hint: SITE_ID_HINT,
        });
    }
    if site_id.starts_with(PREVIEW_PREFIX) || OBJECT_ID.is_match(site_id) {
        return Ok(());
    }
    Err(ValidationError::InvalidFormat {
        field: "siteId",
        value: site_id.to_string(),
        expected: "a 24-character lowercase hexadecimal string",
        hint: SITE_ID_HINT,
    })
}

/// Validate a collection ID: 24 lowercase hex characters.
///
/// # Errors
///
/// Returns an error if the ID is empty or malformed.
pub fn validate_collection_id(collection_id: &str) -> Result<(), ValidationError> {
    if collection_id.is_empty() {
        return Err(ValidationError::Required {
            field: "collectionId",
            hint: COLLECTION_ID_HINT,
        });
    }
    if OBJECT_ID.is_match(collection_id) {
        return Ok(());
    }
    Err(ValidationError::InvalidFormat {
        field: "collectionId",
        value: collection_id.to_string(),
        expected: "a 24-character lowercase hexadecimal string",
        hint: COLLECTION_ID_HINT,
    })
}

fn validate_path(field: &'static str, path: &str) -> Result<(), ValidationError> {
    if path.is_empty() {
        return Err(ValidationError::Required {
            field,
            hint: PATH_HINT,
        });
    }
    if PATH.is_match(path) {
        return Ok(());
    }
    Err(ValidationError::InvalidFormat {
        field,
        value: path.to_string(),
        expected: "a relative path starting with '/'",
        hint: PATH_HINT,
    })
}

/// Validate a redirect source path.
///
/// # Errors
///
/// Returns an error if the path is empty or contains unsupported characters.
pub fn validate_source_path(path: &str) -> Result<(), ValidationError> {
    validate_path("sourcePath", path)
}

/// Validate a redirect destination path.
///
/// # Errors
///
/// Returns an error if the path is empty or contains unsupported characters.
pub fn validate_destination_path(path: &str) -> Result<(), ValidationError> {
    validate_path("destinationPath", path)
}

/// Validate a redirect status code.
///
/// # Errors
///
/// Returns an error unless the code is 301 or 302.
pub fn validate_status_code(status_code: u16) -> Result<(), ValidationError> {
    if REDIRECT_STATUS_CODES.contains(&status_code) {
        Ok(())
    } else {
        Err(ValidationError::NotAllowed {
            field: "statusCode",
            value: status_code.to_string(),
            allowed: "301 (permanent), 302 (temporary)".to_string(),
        })
    }
}

/// Validate a webhook destination URL.
///
/// # Errors
///
/// Returns an error unless the URL uses HTTPS and names a dotted host.
pub fn validate_webhook_url(url: &str) -> Result<(), ValidationError> {
    const HINT: &str = "Use a publicly reachable HTTPS endpoint, e.g. https://example.com/webhooks.";

    if url.is_empty() {
        return Err(ValidationError::Required {
            field: "url",
            hint: HINT,
        });
    }
    let invalid = |expected| ValidationError::InvalidFormat {
        field: "url",
        value: url.to_string(),
        expected,
        hint: HINT,
    };

    let Some(rest) = url.strip_prefix("https://") else {
        return Err(invalid("an https:// URL"));
    };
    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if host.contains('.') {
        Ok(())
    } else {
        Err(invalid("an https:// URL with a fully qualified host name"))
    }
}

/// Validate a webhook trigger type.
///
/// # Errors
///
/// Returns an error unless the trigger is one the API accepts.
pub fn validate_trigger_type(trigger_type: &str) -> Result<(), ValidationError> {
    if trigger_type.is_empty() {
        return Err(ValidationError::Required {
            field: "triggerType",
            hint: "Choose one of the supported Webflow webhook events.",
        });
    }
    if TRIGGER_TYPES.contains(&trigger_type) {
        Ok(())
    } else {
        Err(ValidationError::NotAllowed {
            field: "triggerType",
            value: trigger_type.to_string(),
            allowed: TRIGGER_TYPES.join(", "),
        })
    }
}

/// Validate collection item field data.
///
/// # Errors
///
/// Returns an error if no fields are set.
pub fn validate_field_data(field_data: &Map<String, Value>) -> Result<(), ValidationError> {
    if field_data.is_empty() {
        Err(ValidationError::Required {
            field: "fieldData",
            hint: "Set at least the collection's required fields, usually name and slug.",
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SITE: &str = "5f0c8c9e1c9d440000e8d8c3";

    #[test]
    fn test_site_id() {
        assert!(validate_site_id(SITE).is_ok());
        assert!(validate_site_id("preview-1234").is_ok());
        assert!(matches!(
            validate_site_id(""),
            Err(ValidationError::Required { field: "siteId", .. })
        ));
        assert!(validate_site_id("5F0C8C9E1C9D440000E8D8C3").is_err());
        assert!(validate_site_id("abc").is_err());
    }

    #[test]
    fn test_collection_id_rejects_preview() {
        assert!(validate_collection_id(SITE).is_ok());
        assert!(validate_collection_id("preview-1234").is_err());
    }

    #[test]
    fn test_paths() {
        assert!(validate_source_path("/").is_ok());
        assert!(validate_source_path("/blog/old-post_1.html").is_ok());
        assert!(validate_source_path("old").is_err());
        assert!(validate_destination_path("/a b").is_err());
        assert!(validate_destination_path("").is_err());
    }

    #[test]
    fn test_status_code() {
        assert!(validate_status_code(301).is_ok());
        assert!(validate_status_code(302).is_ok());
        let err = validate_status_code(307).unwrap_err();
        assert!(err.to_string().contains("301"));
    }

    #[test]
    fn test_webhook_url() {
        assert!(validate_webhook_url("https://example.com/hook").is_ok());
        assert!(validate_webhook_url("http://example.com/hook").is_err());
        assert!(validate_webhook_url("https://localhost/hook").is_err());
        assert!(validate_webhook_url("https://").is_err());
        assert!(validate_webhook_url("").is_err());
    }

    #[test]
    fn test_trigger_types() {
        for trigger in TRIGGER_TYPES {
            assert!(validate_trigger_type(trigger).is_ok());
        }
        let err = validate_trigger_type("page_viewed").unwrap_err();
        assert!(err.to_string().contains("form_submission"));
    }

    #[test]
    fn test_field_data() {
        assert!(validate_field_data(&Map::new()).is_err());
        let mut data = Map::new();
        data.insert("name".into(), Value::from("x"));
        assert!(validate_field_data(&data).is_ok());
    }
}
