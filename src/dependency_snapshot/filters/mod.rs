//! Snapshot filter pipeline
//!
//! Filters adjudicate every addition and removal before it is committed to a
//! targeted snapshot. They run strictly in pipeline order and form a chain of
//! responsibility: the dependency accepted by one filter is the input of the
//! next, and a rejection ends the chain.

mod context;
mod duplicated_captions;
mod implicit_top_level;
mod orphaned_children;
mod pipeline;
mod sdk_and_packages;
mod unresolved;

pub use context::{AddDependencyContext, FilterContext, RemoveDependencyContext};
pub(crate) use context::FilterEnvironment;
pub use duplicated_captions::DuplicatedCaptionsFilter;
pub use implicit_top_level::ImplicitTopLevelFilter;
pub use orphaned_children::OrphanedChildrenFilter;
pub use pipeline::{FilterKind, FilterPipeline};
pub use sdk_and_packages::{SdkAndPackagesFilter, PACKAGE_PROVIDER_TYPE, SDK_PROVIDER_TYPE};
pub use unresolved::UnresolvedDependenciesFilter;

use crate::dependency_snapshot::domain::Dependency;
use std::fmt::Debug;

/// Outcome of a filter's add hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddDecision {
    /// Pass this (possibly rewritten) dependency to the next filter
    Accept(Dependency),
    /// Drop the addition; later filters never see it
    Reject,
}

/// Outcome of a filter's remove hook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveDecision {
    Accept,
    /// Keep the dependency in the world
    Reject,
}

/// One stage of the snapshot filter pipeline.
///
/// Both hooks default to pass-through, so a filter only implements the side
/// it cares about. Filters must not fail: anything they cannot make sense of
/// is passed through unchanged.
pub trait DependenciesSnapshotFilter: Debug + Send + Sync {
    /// Name used in trace output
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn before_add_or_update(
        &self,
        dependency: Dependency,
        _context: &mut AddDependencyContext<'_>,
    ) -> AddDecision {
        AddDecision::Accept(dependency)
    }

    fn before_remove(
        &self,
        _dependency: &Dependency,
        _context: &mut RemoveDependencyContext<'_>,
    ) -> RemoveDecision {
        RemoveDecision::Accept
    }
}
