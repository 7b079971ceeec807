//! Site webhooks.
//!
//! The API offers no update endpoint, so every change is a replacement and
//! `update` always fails.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, instrument};
use webflow_client::{NewWebhook, Webhook, WebflowClient};

use crate::controller::{Created, OperationContext, ResourceController, now_rfc3339, preview_id};
use crate::diff::{ChangeDecision, DiffBuilder};
use crate::error::{ProviderError, ProviderResult, ValidationError};
use crate::identifier::{ResourceIdentifier, ResourceKind};
use crate::resources::found;
use crate::validation::{validate_site_id, validate_trigger_type, validate_webhook_url};

/// Desired webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookArgs {
    /// Owning site
    pub site_id: String,
    /// Triggering event
    pub trigger_type: String,
    /// HTTPS destination
    pub url: String,
    /// Optional event filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Map<String, Value>>,
}

/// Observed webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookState {
    /// Desired fields as last observed
    #[serde(flatten)]
    pub args: WebhookArgs,
    /// Owning workspace
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    /// Last delivery time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_triggered: Option<String>,
    /// Creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<String>,
}

impl WebhookState {
    fn observed(site_id: &str, webhook: Webhook, prior: Option<&Self>) -> Self {
        Self {
            args: WebhookArgs {
                site_id: webhook.site_id.unwrap_or_else(|| site_id.to_string()),
                trigger_type: webhook.trigger_type,
                url: webhook.url,
                filter: webhook.filter,
            },
            workspace_id: webhook.workspace_id,
            last_triggered: webhook.last_triggered,
            created_on: webhook
                .created_on
                .or_else(|| prior.and_then(|p| p.created_on.clone())),
        }
    }
}

/// Webhook controller.
#[derive(Debug, Clone)]
pub struct WebhookController {
    client: WebflowClient,
}

impl WebhookController {
    /// Create a controller using `client`.
    #[must_use]
    pub const fn new(client: WebflowClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceController for WebhookController {
    type Args = WebhookArgs;
    type State = WebhookState;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Webhook
    }

    fn validate(&self, args: &WebhookArgs) -> Result<(), ValidationError> {
        validate_site_id(&args.site_id)?;
        validate_trigger_type(&args.trigger_type)?;
        validate_webhook_url(&args.url)
    }

    fn diff(&self, desired: &WebhookArgs, observed: &WebhookState) -> ChangeDecision {
        let observed = &observed.args;
        DiffBuilder::without_update_endpoint()
            .identity("siteId", &desired.site_id, &observed.site_id)
            .field("triggerType", &desired.trigger_type, &observed.trigger_type)
            .field("url", &desired.url, &observed.url)
            .field("filter", &desired.filter, &observed.filter)
            .finish()
    }

    #[instrument(skip_all, fields(site_id = %args.site_id, trigger_type = %args.trigger_type, dry_run = ctx.dry_run))]
    async fn create(
        &self,
        ctx: &OperationContext,
        args: &WebhookArgs,
    ) -> ProviderResult<Created<WebhookState>> {
        self.validate(args)?;

        if ctx.dry_run {
            let id = ResourceIdentifier::new(self.kind(), &args.site_id, preview_id(self.kind(), args)?);
            return Ok(Created {
                id,
                state: WebhookState {
                    args: args.clone(),
                    workspace_id: None,
                    last_triggered: None,
                    created_on: Some(now_rfc3339()),
                },
            });
        }

        let request = NewWebhook {
            trigger_type: args.trigger_type.clone(),
            url: args.url.clone(),
            filter: args.filter.clone(),
        };
        let webhook = self
            .client
            .create_webhook(&ctx.cancel, &args.site_id, &request)
            .await
            .map_err(|e| ProviderError::client("create webhook", &args.site_id, e))?;
        if webhook.id.is_empty() {
            return Err(ProviderError::MissingId { kind: self.kind() });
        }

        let id = ResourceIdentifier::new(self.kind(), &args.site_id, &webhook.id);
        info!(%id, "Created webhook");

        let mut state = WebhookState::observed(&args.site_id, webhook, None);
        state.args = args.clone();
        state.created_on.get_or_insert_with(now_rfc3339);
        Ok(Created { id, state })
    }

    #[instrument(skip_all, fields(%id))]
    async fn read(
        &self,
        ctx: &OperationContext,
        id: &ResourceIdentifier,
        prior: Option<&WebhookState>,
    ) -> ProviderResult<Option<WebhookState>> {
        let webhook = found(self.client.get_webhook(&ctx.cancel, &id.id).await)
            .map_err(|e| ProviderError::client("read webhook", id.to_string(), e))?;
        Ok(webhook.map(|webhook| WebhookState::observed(&id.parent, webhook, prior)))
    }

    async fn update(
        &self,
        _ctx: &OperationContext,
        _id: &ResourceIdentifier,
        _args: &WebhookArgs,
        _prior: &WebhookState,
    ) -> ProviderResult<WebhookState> {
        Err(ProviderError::UpdateUnsupported { kind: self.kind() })
    }

    #[instrument(skip_all, fields(%id, dry_run = ctx.dry_run))]
    async fn delete(&self, ctx: &OperationContext, id: &ResourceIdentifier) -> ProviderResult<()> {
        if ctx.dry_run {
            return Ok(());
        }
        self.client
            .delete_webhook(&ctx.cancel, &id.id)
            .await
            .map_err(|e| ProviderError::client("delete webhook", id.to_string(), e))?;
        info!(%id, "Deleted webhook");
        Ok(())
    }
}
