//! Change detection between desired and observed state.
//!
//! Field policies:
//! - identity: part of the composite identifier, any change replaces
//! - field: ordinary attribute, updated in place when the kind can be updated
//! - listed: the list endpoint may omit it, an observed zero value is ignored
//! - supplied: populated by the server when unset, compared only when set

use serde_json::{Map, Value};

/// Outcome of comparing desired against observed state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeDecision {
    /// Nothing to do
    NoChange,
    /// Apply the listed fields with an update call
    UpdateInPlace(Vec<String>),
    /// Delete, then create; lists every changed field
    ReplaceRequired(Vec<String>),
}

impl ChangeDecision {
    /// Check for no change.
    #[must_use]
    pub const fn is_no_change(&self) -> bool {
        matches!(self, Self::NoChange)
    }

    /// Check for replacement.
    #[must_use]
    pub const fn requires_replace(&self) -> bool {
        matches!(self, Self::ReplaceRequired(_))
    }

    /// Changed field names.
    #[must_use]
    pub fn changed_fields(&self) -> &[String] {
        match self {
            Self::NoChange => &[],
            Self::UpdateInPlace(fields) | Self::ReplaceRequired(fields) => fields,
        }
    }
}

/// Accumulates per-field comparisons into a [`ChangeDecision`].
#[derive(Debug, Clone)]
#[must_use]
pub struct DiffBuilder {
    updatable: bool,
    replace: bool,
    changed: Vec<String>,
}

impl Default for DiffBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffBuilder {
    /// Builder for a kind whose ordinary fields update in place.
    pub const fn new() -> Self {
        Self {
            updatable: true,
            replace: false,
            changed: Vec::new(),
        }
    }

    /// Builder for a kind where every change goes through replacement.
    pub const fn without_update_endpoint() -> Self {
        Self {
            updatable: false,
            replace: false,
            changed: Vec::new(),
        }
    }

    fn record(&mut self, field: impl Into<String>, replace: bool) {
        self.changed.push(field.into());
        self.replace |= replace;
    }

    /// Compare an identifier component.
    pub fn identity<T: PartialEq + ?Sized>(mut self, field: &str, desired: &T, observed: &T) -> Self {
        if desired != observed {
            self.record(field, true);
        }
        self
    }

    /// Compare an ordinary field.
    pub fn field<T: PartialEq + ?Sized>(mut self, field: &str, desired: &T, observed: &T) -> Self {
        if desired != observed {
            let replace = !self.updatable;
            self.record(field, replace);
        }
        self
    }

    /// Compare a field the list endpoint may omit.
    ///
    /// An observed zero value means "not reported" rather than "changed".
    pub fn listed<T: PartialEq + Default>(self, field: &str, desired: &T, observed: &T) -> Self {
        if *observed == T::default() {
            self
        } else {
            self.field(field, desired, observed)
        }
    }

    /// Compare an optional field only when the caller supplied it.
    pub fn supplied<T: PartialEq + ?Sized>(
        self,
        field: &str,
        desired: Option<&T>,
        observed: Option<&T>,
    ) -> Self {
        match desired {
            Some(desired) if Some(desired) != observed => {
                let mut this = self;
                let replace = !this.updatable;
                this.record(field, replace);
                this
            }
            _ => self,
        }
    }

    /// Compare a map key by key over the caller's keys.
    ///
    /// Keys present only on the observed side are ignored. Changes are
    /// reported as `field.key`.
    pub fn entries(
        mut self,
        field: &str,
        desired: &Map<String, Value>,
        observed: &Map<String, Value>,
    ) -> Self {
        let replace = !self.updatable;
        for (key, value) in desired {
            if observed.get(key) != Some(value) {
                self.record(format!("{field}.{key}"), replace);
            }
        }
        self
    }

    /// Produce the decision; any replace-forcing change replaces.
    #[must_use]
    pub fn finish(self) -> ChangeDecision {
        if self.changed.is_empty() {
            ChangeDecision::NoChange
        } else if self.replace {
            ChangeDecision::ReplaceRequired(self.changed)
        } else {
            ChangeDecision::UpdateInPlace(self.changed)
        }
    }
}

/// Drop `keys` from `payload` where they equal the prior value.
///
/// The API rejects some unchanged values on update (a slug equal to its own
/// current slug conflicts), so they are left out of patch bodies.
#[must_use]
pub fn strip_unchanged(
    payload: &Map<String, Value>,
    prior: &Map<String, Value>,
    keys: &[&str],
) -> Map<String, Value> {
    let mut stripped = payload.clone();
    for key in keys {
        if payload.get(*key).is_some_and(|value| prior.get(*key) == Some(value)) {
            stripped.remove(*key);
        }
    }
    stripped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn test_no_change() {
        let decision = DiffBuilder::new()
            .identity("siteId", "a", "a")
            .field("url", "x", "x")
            .finish();
        assert_eq!(decision, ChangeDecision::NoChange);
        assert!(decision.changed_fields().is_empty());
    }

    #[test]
    fn test_field_updates_in_place() {
        let decision = DiffBuilder::new().field("url", "x", "y").finish();
        assert_eq!(decision, ChangeDecision::UpdateInPlace(vec!["url".into()]));
    }

    #[test]
    fn test_identity_forces_replace_listing_all_fields() {
        let decision = DiffBuilder::new()
            .identity("collectionId", "a", "b")
            .field("name", "x", "y")
            .finish();
        assert_eq!(
            decision,
            ChangeDecision::ReplaceRequired(vec!["collectionId".into(), "name".into()])
        );
    }

    #[test]
    fn test_without_update_endpoint_replaces() {
        let decision = DiffBuilder::without_update_endpoint()
            .field("url", "x", "y")
            .finish();
        assert!(decision.requires_replace());
    }

    #[test]
    fn test_listed_zero_is_not_a_change() {
        let decision = DiffBuilder::new().listed("statusCode", &301_u16, &0).finish();
        assert!(decision.is_no_change());

        let decision = DiffBuilder::new().listed("statusCode", &302_u16, &301).finish();
        assert_eq!(decision.changed_fields(), ["statusCode".to_string()]);
    }

    #[test]
    fn test_supplied_only_when_set() {
        let decision = DiffBuilder::new()
            .supplied::<str>("cmsLocaleId", None, Some("loc"))
            .finish();
        assert!(decision.is_no_change());

        let decision = DiffBuilder::new()
            .supplied("isDraft", Some(&true), Some(&false))
            .finish();
        assert_eq!(decision, ChangeDecision::UpdateInPlace(vec!["isDraft".into()]));
    }

    #[test]
    fn test_entries_ignore_server_keys() {
        let desired = map(json!({"name": "A"}));
        let observed = map(json!({"name": "A", "slug": "a", "_archived": false}));
        assert!(DiffBuilder::new().entries("fieldData", &desired, &observed).finish().is_no_change());

        let observed = map(json!({"name": "B"}));
        let decision = DiffBuilder::new().entries("fieldData", &desired, &observed).finish();
        assert_eq!(decision.changed_fields(), ["fieldData.name".to_string()]);
    }

    #[test]
    fn test_strip_unchanged_slug() {
        let payload = map(json!({"name": "New", "slug": "post"}));
        let prior = map(json!({"name": "Old", "slug": "post"}));
        assert_eq!(strip_unchanged(&payload, &prior, &["slug"]), map(json!({"name": "New"})));

        let prior = map(json!({"slug": "other"}));
        assert_eq!(strip_unchanged(&payload, &prior, &["slug"]), payload);
    }
}
