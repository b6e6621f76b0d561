use super::{AddDecision, AddDependencyContext, DependenciesSnapshotFilter};
use crate::dependency_snapshot::domain::Dependency;

/// Marks resolved top-level dependencies that the project file does not
/// declare as implicit, and gives them the provider's implicit icon.
///
/// Does nothing unless the host supplied project item specs for the update,
/// and only for providers present in the registry.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImplicitTopLevelFilter;

impl ImplicitTopLevelFilter {
    pub fn new() -> Self {
        Self
    }
}

impl DependenciesSnapshotFilter for ImplicitTopLevelFilter {
    fn name(&self) -> &'static str {
        "ImplicitTopLevelFilter"
    }

    fn before_add_or_update(
        &self,
        dependency: Dependency,
        context: &mut AddDependencyContext<'_>,
    ) -> AddDecision {
        if !dependency.is_top_level() || !dependency.is_resolved() || dependency.is_implicit() {
            return AddDecision::Accept(dependency);
        }

        let Some(item_specs) = context.project_item_specs() else {
            return AddDecision::Accept(dependency);
        };
        if item_specs.contains(dependency.original_item_spec()) {
            return AddDecision::Accept(dependency);
        }

        let Some(provider) = context.provider_registry().get(dependency.provider_type()) else {
            return AddDecision::Accept(dependency);
        };
        let icon = provider
            .implicit_icon()
            .map(str::to_string)
            .or_else(|| dependency.icon().map(str::to_string));

        AddDecision::Accept(dependency.with_implicit(true).with_icon(icon))
    }
}
