//! Composite resource identifiers.
//!
//! Format: `{parent_id}/{kind_plural}/{instance_id}`, e.g.
//! `5f0c8c9e1c9d440000e8d8c3/redirects/64a1b2c3d4e5f6a7b8c9d0e1`.

use std::fmt;
use std::str::FromStr;

use crate::error::{ProviderError, ProviderResult};

/// Managed resource kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Site redirect rule, parented by a site
    Redirect,
    /// Site webhook, parented by a site
    Webhook,
    /// CMS collection item, parented by a collection
    CollectionItem,
}

impl ResourceKind {
    /// Every kind.
    pub const ALL: [Self; 3] = [Self::Redirect, Self::Webhook, Self::CollectionItem];

    /// Plural path segment used in identifiers.
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Redirect => "redirects",
            Self::Webhook => "webhooks",
            Self::CollectionItem => "items",
        }
    }

    /// Name of the parent ID field.
    #[must_use]
    pub const fn parent_field(self) -> &'static str {
        match self {
            Self::Redirect | Self::Webhook => "siteId",
            Self::CollectionItem => "collectionId",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Redirect => "redirect",
            Self::Webhook => "webhook",
            Self::CollectionItem => "collection item",
        }
    }

    /// Kind for a plural segment.
    #[must_use]
    pub fn from_plural(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.plural() == segment)
    }

    /// Expected identifier format for this kind.
    #[must_use]
    pub fn format(self) -> String {
        format!("{{{}}}/{}/{{id}}", self.parent_field(), self.plural())
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifier of one managed resource instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceIdentifier {
    /// Parent ID (site or collection)
    pub parent: String,
    /// Resource kind
    pub kind: ResourceKind,
    /// Instance ID assigned by Webflow
    pub id: String,
}

impl ResourceIdentifier {
    /// Create an identifier.
    #[must_use]
    pub fn new(kind: ResourceKind, parent: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            parent: parent.into(),
            kind,
            id: id.into(),
        }
    }

    /// Parse an identifier that must belong to `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidIdentifier`] if the input is malformed
    /// or names a different kind.
    pub fn parse_for(kind: ResourceKind, value: &str) -> ProviderResult<Self> {
        let invalid = || ProviderError::InvalidIdentifier {
            value: value.to_string(),
            expected: kind.format(),
        };
        let parsed: Self = value.parse().map_err(|_| invalid())?;
        if parsed.kind == kind {
            Ok(parsed)
        } else {
            Err(invalid())
        }
    }
}

impl fmt::Display for ResourceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.parent, self.kind.plural(), self.id)
    }
}

impl FromStr for ResourceIdentifier {
    type Err = ProviderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ProviderError::InvalidIdentifier {
            value: value.to_string(),
            expected: "{parentId}/{redirects|webhooks|items}/{id}".to_string(),
        };

        let parts: Vec<&str> = value.split('/').collect();
        let [parent, plural, id] = parts.as_slice() else {
            return Err(invalid());
        };
        if parent.is_empty() || id.is_empty() {
            return Err(invalid());
        }
        let kind = ResourceKind::from_plural(plural).ok_or_else(invalid)?;

        Ok(Self::new(kind, *parent, *id))
    }
}
