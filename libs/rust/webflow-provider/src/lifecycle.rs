//! Lifecycle of a managed resource instance.

use std::fmt;

/// Where one resource instance stands relative to its desired state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    /// Not present remotely
    Absent,
    /// Projected by a dry run, nothing created
    Planned,
    /// Present and matching the desired state
    Created,
    /// Present but differing from the desired state
    Drifted,
    /// Removed
    Deleted,
}

impl LifecycleState {
    /// Check whether the instance exists remotely.
    #[must_use]
    pub const fn exists(self) -> bool {
        matches!(self, Self::Created | Self::Drifted)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Absent => "absent",
            Self::Planned => "planned",
            Self::Created => "created",
            Self::Drifted => "drifted",
            Self::Deleted => "deleted",
        };
        f.write_str(name)
    }
}
