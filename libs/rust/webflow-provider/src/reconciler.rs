//! Drives one resource instance through plan, apply and destroy.

use tracing::{debug, info, instrument};

use crate::controller::{OperationContext, ResourceController};
use crate::diff::ChangeDecision;
use crate::error::ProviderResult;
use crate::identifier::ResourceIdentifier;
use crate::lifecycle::LifecycleState;

/// Planned action.
#[derive(Debug, Clone, PartialEq)]
pub enum Action<S> {
    /// Create a new instance
    Create,
    /// Update the existing instance in place
    Update {
        /// Existing instance
        id: ResourceIdentifier,
        /// State observed while planning
        observed: S,
        /// Changed fields
        fields: Vec<String>,
    },
    /// Delete the existing instance, then create
    Replace {
        /// Existing instance
        id: ResourceIdentifier,
        /// Changed fields
        fields: Vec<String>,
    },
    /// Already converged
    NoOp {
        /// Existing instance
        id: ResourceIdentifier,
        /// State observed while planning
        observed: S,
    },
}

/// Result of planning.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan<S> {
    /// What apply will do
    pub action: Action<S>,
    /// Lifecycle state observed while planning
    pub state: LifecycleState,
}

/// Result of applying a plan.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied<S> {
    /// Instance identifier
    pub id: ResourceIdentifier,
    /// Resulting state
    pub state: S,
    /// `Planned` for dry runs, `Created` otherwise
    pub lifecycle: LifecycleState,
}

/// Reconciles instances of one kind.
#[derive(Debug, Clone)]
pub struct Reconciler<C> {
    controller: C,
}

impl<C: ResourceController> Reconciler<C> {
    /// Create a reconciler over `controller`.
    #[must_use]
    pub const fn new(controller: C) -> Self {
        Self { controller }
    }

    /// Underlying controller.
    #[must_use]
    pub const fn controller(&self) -> &C {
        &self.controller
    }

    /// Validate `desired`, read the current state and decide what to do.
    ///
    /// `id` is `None` for an instance never created. Reads always happen,
    /// dry run or not.
    ///
    /// # Errors
    ///
    /// Returns validation errors and read failures.
    #[instrument(skip_all, fields(kind = %self.controller.kind()))]
    pub async fn plan(
        &self,
        ctx: &OperationContext,
        id: Option<&ResourceIdentifier>,
        desired: &C::Args,
        prior: Option<&C::State>,
    ) -> ProviderResult<Plan<C::State>> {
        self.controller.validate(desired)?;

        let Some(id) = id else {
            return Ok(Plan {
                action: Action::Create,
                state: LifecycleState::Absent,
            });
        };

        let Some(observed) = self.controller.read(ctx, id, prior).await? else {
            debug!(%id, "Instance no longer exists, planning create");
            return Ok(Plan {
                action: Action::Create,
                state: LifecycleState::Absent,
            });
        };

        let plan = match self.controller.diff(desired, &observed) {
            ChangeDecision::NoChange => Plan {
                action: Action::NoOp {
                    id: id.clone(),
                    observed,
                },
                state: LifecycleState::Created,
            },
            ChangeDecision::UpdateInPlace(fields) => Plan {
                action: Action::Update {
                    id: id.clone(),
                    observed,
                    fields,
                },
                state: LifecycleState::Drifted,
            },
            ChangeDecision::ReplaceRequired(fields) => Plan {
                action: Action::Replace {
                    id: id.clone(),
                    fields,
                },
                state: LifecycleState::Drifted,
            },
        };
        debug!(%id, state = %plan.state, "Planned");
        Ok(plan)
    }

    /// Execute a plan.
    ///
    /// # Errors
    ///
    /// Returns the first failing controller call. A replacement whose delete
    /// succeeded but whose create failed leaves the instance absent.
    #[instrument(skip_all, fields(kind = %self.controller.kind(), dry_run = ctx.dry_run))]
    pub async fn apply(
        &self,
        ctx: &OperationContext,
        plan: Plan<C::State>,
        desired: &C::Args,
    ) -> ProviderResult<Applied<C::State>> {
        let (id, state) = match plan.action {
            Action::Create => {
                let created = self.controller.create(ctx, desired).await?;
                (created.id, created.state)
            }
            Action::Update {
                id,
                observed,
                fields,
            } => {
                info!(%id, ?fields, "Updating in place");
                let state = self.controller.update(ctx, &id, desired, &observed).await?;
                (id, state)
            }
            Action::Replace { id, fields } => {
                info!(%id, ?fields, "Replacing");
                self.controller.delete(ctx, &id).await?;
                let created = self.controller.create(ctx, desired).await?;
                (created.id, created.state)
            }
            Action::NoOp { id, observed } => (id, observed),
        };

        let lifecycle = if ctx.dry_run {
            LifecycleState::Planned
        } else {
            LifecycleState::Created
        };
        Ok(Applied {
            id,
            state,
            lifecycle,
        })
    }

    /// Plan, then apply.
    ///
    /// # Errors
    ///
    /// Returns planning or apply failures.
    pub async fn reconcile(
        &self,
        ctx: &OperationContext,
        id: Option<&ResourceIdentifier>,
        desired: &C::Args,
        prior: Option<&C::State>,
    ) -> ProviderResult<Applied<C::State>> {
        let plan = self.plan(ctx, id, desired, prior).await?;
        self.apply(ctx, plan, desired).await
    }

    /// Delete an instance. Absent instances are already deleted.
    ///
    /// # Errors
    ///
    /// Returns delete failures other than not-found.
    #[instrument(skip_all, fields(%id))]
    pub async fn destroy(
        &self,
        ctx: &OperationContext,
        id: &ResourceIdentifier,
    ) -> ProviderResult<LifecycleState> {
        self.controller.delete(ctx, id).await?;
        Ok(LifecycleState::Deleted)
    }
}
