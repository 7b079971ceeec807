//! CMS collection items.
//!
//! `fieldData` is compared over the keys the caller set; the server adds its
//! own. `isArchived`, `isDraft` and `cmsLocaleId` are filled in by the server
//! when omitted and are only compared when set.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, instrument, warn};
use webflow_client::{CollectionItem, ItemPayload, WebflowClient};

use crate::controller::{Created, OperationContext, ResourceController, now_rfc3339, preview_id};
use crate::diff::{ChangeDecision, DiffBuilder, strip_unchanged};
use crate::error::{ProviderError, ProviderResult, ValidationError};
use crate::identifier::{ResourceIdentifier, ResourceKind};
use crate::resources::found;
use crate::validation::{validate_collection_id, validate_field_data};

/// Field data keys dropped from patches when unchanged.
const CONFLICTING_UNCHANGED: &[&str] = &["slug"];

/// Desired collection item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionItemArgs {
    /// Owning collection
    pub collection_id: String,
    /// Field values keyed by field slug
    pub field_data: Map<String, Value>,
    /// Archived flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
    /// Draft flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_draft: Option<bool>,
    /// Locale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cms_locale_id: Option<String>,
    /// Publish to the live site after create and update
    #[serde(default)]
    pub publish: bool,
}

/// Observed collection item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionItemState {
    /// Desired fields as last observed
    #[serde(flatten)]
    pub args: CollectionItemArgs,
    /// Last publish time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_published: Option<String>,
    /// Last update time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    /// Creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<String>,
}

impl CollectionItemState {
    fn observed(collection_id: &str, item: CollectionItem, publish: bool) -> Self {
        Self {
            args: CollectionItemArgs {
                collection_id: collection_id.to_string(),
                field_data: item.field_data,
                is_archived: Some(item.is_archived),
                is_draft: Some(item.is_draft),
                cms_locale_id: item.cms_locale_id,
                publish,
            },
            last_published: item.last_published,
            last_updated: item.last_updated,
            created_on: item.created_on,
        }
    }
}

fn payload(args: &CollectionItemArgs, field_data: Map<String, Value>) -> ItemPayload {
    ItemPayload {
        field_data,
        is_archived: args.is_archived,
        is_draft: args.is_draft,
        cms_locale_id: args.cms_locale_id.clone(),
    }
}

/// Collection item controller.
#[derive(Debug, Clone)]
pub struct CollectionItemController {
    client: WebflowClient,
}

impl CollectionItemController {
    /// Create a controller using `client`.
    #[must_use]
    pub const fn new(client: WebflowClient) -> Self {
        Self { client }
    }

    async fn publish(&self, ctx: &OperationContext, id: &ResourceIdentifier) -> webflow_client::ClientResult<()> {
        self.client
            .publish_collection_items(&ctx.cancel, &id.parent, &[id.id.clone()])
            .await
    }
}

#[async_trait]
impl ResourceController for CollectionItemController {
    type Args = CollectionItemArgs;
    type State = CollectionItemState;

    fn kind(&self) -> ResourceKind {
        ResourceKind::CollectionItem
    }

    fn validate(&self, args: &CollectionItemArgs) -> Result<(), ValidationError> {
        validate_collection_id(&args.collection_id)?;
        validate_field_data(&args.field_data)
    }

    fn diff(&self, desired: &CollectionItemArgs, observed: &CollectionItemState) -> ChangeDecision {
        let observed = &observed.args;
        DiffBuilder::new()
            .identity("collectionId", &desired.collection_id, &observed.collection_id)
            .entries("fieldData", &desired.field_data, &observed.field_data)
            .supplied("isArchived", desired.is_archived.as_ref(), observed.is_archived.as_ref())
            .supplied("isDraft", desired.is_draft.as_ref(), observed.is_draft.as_ref())
            .supplied(
                "cmsLocaleId",
                desired.cms_locale_id.as_deref(),
                observed.cms_locale_id.as_deref(),
            )
            .finish()
    }

    #[instrument(skip_all, fields(collection_id = %args.collection_id, dry_run = ctx.dry_run))]
    async fn create(
        &self,
        ctx: &OperationContext,
        args: &CollectionItemArgs,
    ) -> ProviderResult<Created<CollectionItemState>> {
        self.validate(args)?;

        if ctx.dry_run {
            let id = preview_id(self.kind(), args)?;
            return Ok(Created {
                id: ResourceIdentifier::new(self.kind(), &args.collection_id, id),
                state: CollectionItemState {
                    args: args.clone(),
                    last_published: None,
                    last_updated: None,
                    created_on: Some(now_rfc3339()),
                },
            });
        }

        let item = self
            .client
            .create_collection_item(&ctx.cancel, &args.collection_id, &payload(args, args.field_data.clone()))
            .await
            .map_err(|e| ProviderError::client("create collection item", &args.collection_id, e))?;
        if item.id.is_empty() {
            return Err(ProviderError::MissingId { kind: self.kind() });
        }

        let id = ResourceIdentifier::new(self.kind(), &args.collection_id, &item.id);
        info!(%id, "Created collection item");

        let mut state = CollectionItemState::observed(&args.collection_id, item, args.publish);
        state.args.field_data = args.field_data.clone();
        state.created_on.get_or_insert_with(now_rfc3339);

        if args.publish {
            if let Err(source) = self.publish(ctx, &id).await {
                warn!(%id, error = %source, "Collection item created but publishing failed");
                return Err(ProviderError::PartialCreate {
                    id: id.to_string(),
                    source,
                });
            }
        }

        Ok(Created { id, state })
    }

    #[instrument(skip_all, fields(%id))]
    async fn read(
        &self,
        ctx: &OperationContext,
        id: &ResourceIdentifier,
        prior: Option<&CollectionItemState>,
    ) -> ProviderResult<Option<CollectionItemState>> {
        let item = found(
            self.client
                .get_collection_item(&ctx.cancel, &id.parent, &id.id)
                .await,
        )
        .map_err(|e| ProviderError::client("read collection item", id.to_string(), e))?;

        let publish = prior.is_some_and(|p| p.args.publish);
        Ok(item.map(|item| CollectionItemState::observed(&id.parent, item, publish)))
    }

    #[instrument(skip_all, fields(%id, dry_run = ctx.dry_run))]
    async fn update(
        &self,
        ctx: &OperationContext,
        id: &ResourceIdentifier,
        args: &CollectionItemArgs,
        prior: &CollectionItemState,
    ) -> ProviderResult<CollectionItemState> {
        self.validate(args)?;

        if ctx.dry_run {
            return Ok(CollectionItemState {
                args: args.clone(),
                ..prior.clone()
            });
        }

        let field_data = strip_unchanged(&args.field_data, &prior.args.field_data, CONFLICTING_UNCHANGED);
        let item = self
            .client
            .update_collection_item(&ctx.cancel, &id.parent, &id.id, &payload(args, field_data))
            .await
            .map_err(|e| ProviderError::client("update collection item", id.to_string(), e))?;

        if args.publish {
            self.publish(ctx, id)
                .await
                .map_err(|e| ProviderError::client("publish collection item", id.to_string(), e))?;
        }

        let mut state = CollectionItemState::observed(&id.parent, item, args.publish);
        state.created_on = state.created_on.or_else(|| prior.created_on.clone());
        Ok(state)
    }

    #[instrument(skip_all, fields(%id, dry_run = ctx.dry_run))]
    async fn delete(&self, ctx: &OperationContext, id: &ResourceIdentifier) -> ProviderResult<()> {
        if ctx.dry_run {
            return Ok(());
        }
        self.client
            .delete_collection_item(&ctx.cancel, &id.parent, &id.id)
            .await
            .map_err(|e| ProviderError::client("delete collection item", id.to_string(), e))?;
        info!(%id, "Deleted collection item");
        Ok(())
    }
}
