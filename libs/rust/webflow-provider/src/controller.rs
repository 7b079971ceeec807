//! Per-kind reconciliation contract.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt::Debug;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::diff::ChangeDecision;
use crate::error::{ProviderResult, ValidationError};
use crate::identifier::{ResourceIdentifier, ResourceKind};
use crate::validation::PREVIEW_PREFIX;

/// Per-operation settings.
#[derive(Debug, Clone, Default)]
pub struct OperationContext {
    /// Cancels in-flight requests and retry backoff
    pub cancel: CancellationToken,
    /// Validate and project results without calling the API
    pub dry_run: bool,
}

impl OperationContext {
    /// Context performing real calls.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for a dry run.
    #[must_use]
    pub fn preview() -> Self {
        Self {
            cancel: CancellationToken::new(),
            dry_run: true,
        }
    }

    /// Use the given cancellation token.
    #[must_use]
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}

/// Result of a create.
#[derive(Debug, Clone, PartialEq)]
pub struct Created<S> {
    /// Identifier of the new instance
    pub id: ResourceIdentifier,
    /// State after creation
    pub state: S,
}

/// Create, read, update, delete and diff for one resource kind.
///
/// `State` embeds the desired-state `Args` and adds output-only fields.
#[async_trait]
pub trait ResourceController: Send + Sync {
    /// Desired state
    type Args: Clone + Debug + Serialize + Send + Sync;
    /// Observed state
    type State: Clone + Debug + Send + Sync;

    /// Kind handled by this controller.
    fn kind(&self) -> ResourceKind;

    /// Check the desired state locally.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field.
    fn validate(&self, args: &Self::Args) -> Result<(), ValidationError>;

    /// Decide between no-op, in-place update and replacement.
    fn diff(&self, desired: &Self::Args, observed: &Self::State) -> ChangeDecision;

    /// Create the instance.
    async fn create(
        &self,
        ctx: &OperationContext,
        args: &Self::Args,
    ) -> ProviderResult<Created<Self::State>>;

    /// Read the instance; `None` when it no longer exists.
    ///
    /// `prior` supplies output fields the API does not report back.
    async fn read(
        &self,
        ctx: &OperationContext,
        id: &ResourceIdentifier,
        prior: Option<&Self::State>,
    ) -> ProviderResult<Option<Self::State>>;

    /// Update the instance in place.
    async fn update(
        &self,
        ctx: &OperationContext,
        id: &ResourceIdentifier,
        args: &Self::Args,
        prior: &Self::State,
    ) -> ProviderResult<Self::State>;

    /// Delete the instance. Deleting an absent instance succeeds.
    async fn delete(&self, ctx: &OperationContext, id: &ResourceIdentifier) -> ProviderResult<()>;
}

/// Deterministic placeholder ID for a dry-run create.
///
/// # Errors
///
/// Returns an error if `args` cannot be serialized.
pub fn preview_id<A: Serialize>(kind: ResourceKind, args: &A) -> ProviderResult<String> {
    let mut name = kind.plural().as_bytes().to_vec();
    name.push(b':');
    name.extend(serde_json::to_vec(args)?);
    Ok(format!("{PREVIEW_PREFIX}{}", Uuid::new_v5(&Uuid::NAMESPACE_OID, &name)))
}

/// Current time as an RFC 3339 timestamp.
pub(crate) fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}
