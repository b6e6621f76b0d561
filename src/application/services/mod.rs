//! Hosting services that own snapshots for the lifetime of a loaded project
mod project_dependencies_service;
mod project_registry;
mod snapshot_update;

pub use project_dependencies_service::{ProjectDependenciesService, UpdateOutcome};
pub use project_registry::ProjectRegistry;
pub use snapshot_update::SnapshotUpdate;
