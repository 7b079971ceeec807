//! Declarative reconciliation of Webflow resources.
//!
//! Each resource kind implements [`ResourceController`]; a [`Reconciler`]
//! drives one instance through plan, apply and destroy, deciding between
//! no-op, in-place update and delete-then-create replacement.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod controller;
pub mod diff;
pub mod error;
pub mod identifier;
pub mod lifecycle;
pub mod reconciler;
pub mod resources;
pub mod validation;

pub use config::ProviderConfig;
pub use controller::{Created, OperationContext, ResourceController, preview_id};
pub use diff::{ChangeDecision, DiffBuilder, strip_unchanged};
pub use error::{ConfigError, ProviderError, ProviderResult, ValidationError};
pub use identifier::{ResourceIdentifier, ResourceKind};
pub use lifecycle::LifecycleState;
pub use reconciler::{Action, Applied, Plan, Reconciler};
pub use resources::collection_item::{
    CollectionItemArgs, CollectionItemController, CollectionItemState,
};
pub use resources::redirect::{RedirectArgs, RedirectController, RedirectState};
pub use resources::webhook::{WebhookArgs, WebhookController, WebhookState};
