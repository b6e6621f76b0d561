pub mod catalogs;
pub mod change_set;
pub mod dependency;
pub mod project_item_specs;
pub mod provider_registry;
pub mod snapshot;
pub mod target_framework;
pub mod targeted_snapshot;
pub mod world;

pub use catalogs::Catalogs;
pub use change_set::DependencyChangeSet;
pub use dependency::{Dependency, DependencyModel};
pub use project_item_specs::ProjectItemSpecs;
pub use provider_registry::{ProviderRegistry, SubTreeProvider};
pub use snapshot::{DependenciesSnapshot, TargetedSnapshots};
pub use target_framework::TargetFramework;
pub use targeted_snapshot::TargetedDependenciesSnapshot;
pub use world::{DependencyWorld, TopLevelDependencies};
pub(crate) use world::WorldBuilder;
