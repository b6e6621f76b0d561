use crate::dependency_snapshot::domain::{
    Catalogs, Dependency, DependencyWorld, ProjectItemSpecs, ProviderRegistry, TargetFramework,
    WorldBuilder,
};
use std::collections::BTreeSet;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

/// Inputs shared by every filter invocation of one targeted update.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FilterEnvironment<'a> {
    pub(crate) target_framework: &'a TargetFramework,
    pub(crate) catalogs: &'a Catalogs,
    pub(crate) provider_registry: &'a ProviderRegistry,
    pub(crate) project_item_specs: Option<&'a ProjectItemSpecs>,
}

/// View of the in-progress world handed to filters.
///
/// Reads see every edit made so far in the current update, including edits
/// made by earlier filters for the same change. Those edits are staged: they
/// reach the snapshot only if every filter accepts the change.
pub struct FilterContext<'a> {
    builder: &'a mut WorldBuilder,
    environment: &'a FilterEnvironment<'a>,
}

impl<'a> FilterContext<'a> {
    fn new(builder: &'a mut WorldBuilder, environment: &'a FilterEnvironment<'a>) -> Self {
        Self {
            builder,
            environment,
        }
    }

    pub fn target_framework(&self) -> &TargetFramework {
        self.environment.target_framework
    }

    pub fn catalogs(&self) -> &Catalogs {
        self.environment.catalogs
    }

    pub fn provider_registry(&self) -> &ProviderRegistry {
        self.environment.provider_registry
    }

    /// Project item specs, when the host supplied them for this update
    pub fn project_item_specs(&self) -> Option<&ProjectItemSpecs> {
        self.environment.project_item_specs
    }

    pub fn get(&self, id: &str) -> Option<&Dependency> {
        self.builder.get(id).map(Arc::as_ref)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.builder.contains(id)
    }

    pub fn world(&self) -> &DependencyWorld {
        self.builder.world()
    }

    pub fn top_level_dependencies(&self) -> impl Iterator<Item = &Dependency> + '_ {
        self.builder.top_level().iter().map(Arc::as_ref)
    }

    /// Rewrites another entry of the world as a side effect of the current change.
    pub fn add_or_update(&mut self, dependency: Dependency) {
        self.builder.add_or_update(Arc::new(dependency));
    }
}

/// Context of a filter's add hook
pub struct AddDependencyContext<'a> {
    context: FilterContext<'a>,
}

impl<'a> AddDependencyContext<'a> {
    pub(crate) fn new(builder: &'a mut WorldBuilder, environment: &'a FilterEnvironment<'a>) -> Self {
        Self {
            context: FilterContext::new(builder, environment),
        }
    }
}

impl<'a> Deref for AddDependencyContext<'a> {
    type Target = FilterContext<'a>;

    fn deref(&self) -> &Self::Target {
        &self.context
    }
}

impl DerefMut for AddDependencyContext<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.context
    }
}

/// Context of a filter's remove hook.
///
/// Besides the shared view, it carries the cascade: ids that must leave the
/// world together with the dependency being removed.
pub struct RemoveDependencyContext<'a> {
    context: FilterContext<'a>,
    pending_removals: BTreeSet<String>,
}

impl<'a> RemoveDependencyContext<'a> {
    pub(crate) fn new(builder: &'a mut WorldBuilder, environment: &'a FilterEnvironment<'a>) -> Self {
        Self {
            context: FilterContext::new(builder, environment),
            pending_removals: BTreeSet::new(),
        }
    }

    /// Schedules another dependency for removal. Unknown ids are ignored.
    pub fn also_remove(&mut self, id: impl Into<String>) {
        let id = id.into();
        if self.context.contains(&id) {
            self.pending_removals.insert(id);
        }
    }

    /// Withdraws a cascade scheduled by an earlier filter.
    pub fn cancel_removal(&mut self, id: &str) -> bool {
        self.pending_removals.remove(id)
    }

    pub fn pending_removals(&self) -> impl Iterator<Item = &str> + '_ {
        self.pending_removals.iter().map(String::as_str)
    }

    pub(crate) fn into_pending_removals(self) -> BTreeSet<String> {
        self.pending_removals
    }
}

impl<'a> Deref for RemoveDependencyContext<'a> {
    type Target = FilterContext<'a>;

    fn deref(&self) -> &Self::Target {
        &self.context
    }
}

impl DerefMut for RemoveDependencyContext<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.context
    }
}
