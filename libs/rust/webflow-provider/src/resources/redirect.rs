//! Site redirect rules.
//!
//! Redirects can only be listed per site, and the list omits `statusCode`.
//! A patch carrying `fromUrl` conflicts with the rule itself, so changes to
//! the destination or status code are planned as replacements.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use webflow_client::{NewRedirect, RedirectPatch, WebflowClient};

use crate::controller::{Created, OperationContext, ResourceController, now_rfc3339, preview_id};
use crate::diff::{ChangeDecision, DiffBuilder};
use crate::error::{ProviderError, ProviderResult, ValidationError};
use crate::identifier::{ResourceIdentifier, ResourceKind};
use crate::resources::found;
use crate::validation::{
    validate_destination_path, validate_site_id, validate_source_path, validate_status_code,
};

/// Desired redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectArgs {
    /// Owning site
    pub site_id: String,
    /// Path to redirect from
    pub source_path: String,
    /// Path to redirect to
    pub destination_path: String,
    /// 301 or 302; `0` when the API did not report it
    pub status_code: u16,
}

/// Observed redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectState {
    /// Desired fields as last observed
    #[serde(flatten)]
    pub args: RedirectArgs,
    /// When the provider created the redirect
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<String>,
}

/// Redirect controller.
#[derive(Debug, Clone)]
pub struct RedirectController {
    client: WebflowClient,
}

impl RedirectController {
    /// Create a controller using `client`.
    #[must_use]
    pub const fn new(client: WebflowClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceController for RedirectController {
    type Args = RedirectArgs;
    type State = RedirectState;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Redirect
    }

    fn validate(&self, args: &RedirectArgs) -> Result<(), ValidationError> {
        validate_site_id(&args.site_id)?;
        validate_source_path(&args.source_path)?;
        validate_destination_path(&args.destination_path)?;
        validate_status_code(args.status_code)
    }

    fn diff(&self, desired: &RedirectArgs, observed: &RedirectState) -> ChangeDecision {
        let observed = &observed.args;
        DiffBuilder::without_update_endpoint()
            .identity("siteId", &desired.site_id, &observed.site_id)
            .identity("sourcePath", &desired.source_path, &observed.source_path)
            .field("destinationPath", &desired.destination_path, &observed.destination_path)
            .listed("statusCode", &desired.status_code, &observed.status_code)
            .finish()
    }

    #[instrument(skip(self, ctx, args), fields(site_id = %args.site_id, dry_run = ctx.dry_run))]
    async fn create(
        &self,
        ctx: &OperationContext,
        args: &RedirectArgs,
    ) -> ProviderResult<Created<RedirectState>> {
        self.validate(args)?;

        let id = if ctx.dry_run {
            preview_id(self.kind(), args)?
        } else {
            let request = NewRedirect {
                source_path: args.source_path.clone(),
                destination_path: args.destination_path.clone(),
                status_code: args.status_code,
            };
            let rule = self
                .client
                .create_redirect(&ctx.cancel, &args.site_id, &request)
                .await
                .map_err(|e| ProviderError::client("create redirect", &args.site_id, e))?;
            if rule.id.is_empty() {
                return Err(ProviderError::MissingId { kind: self.kind() });
            }
            rule.id
        };

        let id = ResourceIdentifier::new(self.kind(), &args.site_id, id);
        info!(%id, "Created redirect");
        Ok(Created {
            id,
            state: RedirectState {
                args: args.clone(),
                created_on: Some(now_rfc3339()),
            },
        })
    }

    #[instrument(skip_all, fields(%id))]
    async fn read(
        &self,
        ctx: &OperationContext,
        id: &ResourceIdentifier,
        prior: Option<&RedirectState>,
    ) -> ProviderResult<Option<RedirectState>> {
        let rules = found(self.client.list_redirects(&ctx.cancel, &id.parent).await)
            .map_err(|e| ProviderError::client("read redirect", id.to_string(), e))?
            .unwrap_or_default();

        Ok(rules.into_iter().find(|rule| rule.id == id.id).map(|rule| RedirectState {
            args: RedirectArgs {
                site_id: id.parent.clone(),
                source_path: rule.source_path,
                destination_path: rule.destination_path,
                status_code: rule.status_code,
            },
            created_on: prior.and_then(|p| p.created_on.clone()),
        }))
    }

    #[instrument(skip_all, fields(%id, dry_run = ctx.dry_run))]
    async fn update(
        &self,
        ctx: &OperationContext,
        id: &ResourceIdentifier,
        args: &RedirectArgs,
        prior: &RedirectState,
    ) -> ProviderResult<RedirectState> {
        self.validate(args)?;

        if !ctx.dry_run {
            let patch = RedirectPatch {
                destination_path: Some(args.destination_path.clone()),
                status_code: Some(args.status_code),
            };
            self.client
                .update_redirect(&ctx.cancel, &id.parent, &id.id, &patch)
                .await
                .map_err(|e| ProviderError::client("update redirect", id.to_string(), e))?;
        }

        Ok(RedirectState {
            args: args.clone(),
            created_on: prior.created_on.clone(),
        })
    }

    #[instrument(skip_all, fields(%id, dry_run = ctx.dry_run))]
    async fn delete(&self, ctx: &OperationContext, id: &ResourceIdentifier) -> ProviderResult<()> {
        if ctx.dry_run {
            return Ok(());
        }
        self.client
            .delete_redirect(&ctx.cancel, &id.parent, &id.id)
            .await
            .map_err(|e| ProviderError::client("delete redirect", id.to_string(), e))?;
        info!(%id, "Deleted redirect");
        Ok(())
    }
}
