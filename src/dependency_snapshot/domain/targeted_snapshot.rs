use super::{
    Catalogs, Dependency, DependencyChangeSet, DependencyWorld, ProjectItemSpecs,
    ProviderRegistry, TargetFramework, TopLevelDependencies, WorldBuilder,
};
use crate::dependency_snapshot::filters::{FilterEnvironment, FilterPipeline};
use crate::dependency_snapshot::services::DependencyTreeWalker;
use crate::shared::{Result, SnapshotError};
use std::sync::Arc;
use tracing::{debug, warn};

/// Immutable dependency tree of one target framework.
#[derive(Debug)]
pub struct TargetedDependenciesSnapshot {
    project_path: String,
    target_framework: TargetFramework,
    catalogs: Catalogs,
    world: DependencyWorld,
    top_level: Arc<TopLevelDependencies>,
    has_unresolved_dependency: bool,
    has_reachable_visible_unresolved_dependency: bool,
}

impl TargetedDependenciesSnapshot {
    pub fn create_empty(
        project_path: &str,
        target_framework: TargetFramework,
        catalogs: Catalogs,
    ) -> Result<Arc<Self>> {
        if project_path.is_empty() {
            return Err(SnapshotError::invalid_argument("project_path", "must not be empty").into());
        }
        Ok(Self::empty(project_path, target_framework, catalogs))
    }

    pub(crate) fn empty(
        project_path: &str,
        target_framework: TargetFramework,
        catalogs: Catalogs,
    ) -> Arc<Self> {
        Arc::new(Self {
            project_path: project_path.to_string(),
            target_framework,
            catalogs,
            world: DependencyWorld::new(),
            top_level: Arc::new(Vec::new()),
            has_unresolved_dependency: false,
            has_reachable_visible_unresolved_dependency: false,
        })
    }

    fn from_parts(
        project_path: &str,
        target_framework: TargetFramework,
        catalogs: Catalogs,
        world: DependencyWorld,
        top_level: Arc<TopLevelDependencies>,
    ) -> Self {
        let has_unresolved_dependency = world.values().any(|dependency| !dependency.is_resolved());
        let has_reachable_visible_unresolved_dependency = has_unresolved_dependency
            && DependencyTreeWalker::new(&world).any_reachable(
                top_level
                    .iter()
                    .filter(|dependency| dependency.is_visible())
                    .map(|dependency| dependency.id()),
                Dependency::is_visible,
                |dependency| dependency.is_visible() && !dependency.is_resolved(),
            );

        Self {
            project_path: project_path.to_string(),
            target_framework,
            catalogs,
            world,
            top_level,
            has_unresolved_dependency,
            has_reachable_visible_unresolved_dependency,
        }
    }

    /// Folds `changes` into `previous`.
    ///
    /// Removals run first, then additions; every change passes through the
    /// whole filter pipeline before it is committed. Returns `previous` itself
    /// when the world and the top-level list end up with the same content,
    /// even if a change set removed and re-added an identical dependency.
    pub fn from_changes(
        previous: &Arc<Self>,
        changes: &DependencyChangeSet,
        catalogs: &Catalogs,
        filters: &FilterPipeline,
        provider_registry: &ProviderRegistry,
        project_item_specs: Option<&ProjectItemSpecs>,
    ) -> Arc<Self> {
        let environment = FilterEnvironment {
            target_framework: &previous.target_framework,
            catalogs,
            provider_registry,
            project_item_specs,
        };
        let mut builder = WorldBuilder::new(previous.world.clone(), Arc::clone(&previous.top_level));

        for id in changes.removed() {
            filters.apply_remove(id, &mut builder, &environment);
        }

        for model in changes.added() {
            let dependency = Dependency::from_model(model.clone(), previous.target_framework.clone());
            filters.apply_add(dependency, &mut builder, &environment);
        }

        if !builder.is_changed() {
            return Arc::clone(previous);
        }

        let (world, top_level) = builder.into_parts();
        let snapshot = Self::from_parts(
            &previous.project_path,
            previous.target_framework.clone(),
            catalogs.clone(),
            world,
            top_level,
        );
        snapshot.warn_dangling_children();

        debug!(
            target_framework = %snapshot.target_framework,
            dependencies = snapshot.world.len(),
            top_level = snapshot.top_level.len(),
            unresolved = snapshot.has_unresolved_dependency,
            "targeted snapshot updated"
        );

        Arc::new(snapshot)
    }

    fn warn_dangling_children(&self) {
        for dependency in self.world.values() {
            for child_id in dependency.child_ids() {
                if !self.world.contains_key(child_id) {
                    warn!(
                        target_framework = %self.target_framework,
                        id = %dependency.id(),
                        child = %child_id,
                        "dependency references a child that is not in the world"
                    );
                }
            }
        }
    }

    pub fn project_path(&self) -> &str {
        &self.project_path
    }

    pub fn target_framework(&self) -> &TargetFramework {
        &self.target_framework
    }

    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    pub fn world(&self) -> &DependencyWorld {
        &self.world
    }

    pub fn top_level_dependencies(&self) -> &[Arc<Dependency>] {
        &self.top_level
    }

    pub fn get(&self, id: &str) -> Option<&Arc<Dependency>> {
        self.world.get(id)
    }

    pub fn is_empty(&self) -> bool {
        self.world.is_empty()
    }

    pub fn has_unresolved_dependency(&self) -> bool {
        self.has_unresolved_dependency
    }

    /// True when an unresolved, visible dependency can be reached from a
    /// visible top-level dependency through visible nodes only.
    pub fn has_reachable_visible_unresolved_dependency(&self) -> bool {
        self.has_reachable_visible_unresolved_dependency
    }

    /// True when any visible dependency, reachable or not, is unresolved.
    pub fn has_visible_unresolved_dependency(&self) -> bool {
        self.has_unresolved_dependency
            && self
                .world
                .values()
                .any(|dependency| dependency.is_visible() && !dependency.is_resolved())
    }

    pub fn check_for_unresolved_dependencies_of_provider(&self, provider_type: &str) -> bool {
        self.has_unresolved_dependency
            && self
                .world
                .values()
                .any(|dependency| dependency.provider_type() == provider_type && !dependency.is_resolved())
    }

    /// Children of `dependency`, in declaration order, resolved through the world.
    pub fn dependency_children<'a>(
        &'a self,
        dependency: &'a Dependency,
    ) -> impl Iterator<Item = &'a Arc<Dependency>> + 'a {
        dependency
            .child_ids()
            .iter()
            .filter_map(move |child_id| self.world.get(child_id))
    }
}
