use super::{AddDecision, AddDependencyContext, DependenciesSnapshotFilter};
use crate::dependency_snapshot::domain::Dependency;

/// Keeps evaluation-time (unresolved) data from overwriting build-time
/// (resolved) data for the same dependency.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnresolvedDependenciesFilter;

impl UnresolvedDependenciesFilter {
    pub fn new() -> Self {
        Self
    }
}

impl DependenciesSnapshotFilter for UnresolvedDependenciesFilter {
    fn name(&self) -> &'static str {
        "UnresolvedDependenciesFilter"
    }

    fn before_add_or_update(
        &self,
        dependency: Dependency,
        context: &mut AddDependencyContext<'_>,
    ) -> AddDecision {
        if !dependency.is_resolved() {
            if let Some(existing) = context.get(dependency.id()) {
                if existing.is_resolved() {
                    return AddDecision::Reject;
                }
            }
        }

        AddDecision::Accept(dependency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency_snapshot::domain::{
        Catalogs, DependencyChangeSet, DependencyModel, ProviderRegistry, TargetFramework,
        TargetedDependenciesSnapshot,
    };
    use crate::dependency_snapshot::filters::FilterPipeline;
    use std::sync::Arc;

    fn apply(
        previous: &Arc<TargetedDependenciesSnapshot>,
        changes: DependencyChangeSet,
    ) -> Arc<TargetedDependenciesSnapshot> {
        TargetedDependenciesSnapshot::from_changes(
            previous,
            &changes,
            &Catalogs::empty(),
            &FilterPipeline::new(vec![Arc::new(UnresolvedDependenciesFilter::new())]),
            &ProviderRegistry::new(),
            None,
        )
    }

    fn empty() -> Arc<TargetedDependenciesSnapshot> {
        TargetedDependenciesSnapshot::create_empty(
            "C:\\P\\P.csproj",
            TargetFramework::new("net6.0"),
            Catalogs::empty(),
        )
        .unwrap()
    }

    #[test]
    fn test_unresolved_does_not_overwrite_resolved() {
        let resolved = apply(
            &empty(),
            DependencyChangeSet::default().with_added(
                DependencyModel::new("A", "NuGetDependency")
                    .resolved(true)
                    .top_level(true)
                    .with_dependency_ids(["B"]),
            ),
        );
        let next = apply(
            &resolved,
            DependencyChangeSet::default()
                .with_added(DependencyModel::new("A", "NuGetDependency").top_level(true)),
        );

        assert!(Arc::ptr_eq(&resolved, &next));
        assert!(next.get("A").unwrap().is_resolved());
    }

    #[test]
    fn test_unresolved_replaces_unresolved() {
        let previous = apply(
            &empty(),
            DependencyChangeSet::default()
                .with_added(DependencyModel::new("A", "NuGetDependency").top_level(true)),
        );
        let next = apply(
            &previous,
            DependencyChangeSet::default().with_added(
                DependencyModel::new("A", "NuGetDependency")
                    .top_level(true)
                    .with_caption("A 2.0"),
            ),
        );

        assert_eq!(next.get("A").unwrap().caption(), "A 2.0");
    }

    #[test]
    fn test_resolved_replaces_unresolved() {
        let previous = apply(
            &empty(),
            DependencyChangeSet::default()
                .with_added(DependencyModel::new("A", "NuGetDependency").top_level(true)),
        );
        let next = apply(
            &previous,
            DependencyChangeSet::default().with_added(
                DependencyModel::new("A", "NuGetDependency")
                    .resolved(true)
                    .top_level(true),
            ),
        );

        assert!(next.get("A").unwrap().is_resolved());
        assert!(!next.has_unresolved_dependency());
    }

    #[test]
    fn test_new_unresolved_dependency_is_accepted() {
        let next = apply(
            &empty(),
            DependencyChangeSet::default()
                .with_added(DependencyModel::new("A", "NuGetDependency").top_level(true)),
        );

        assert!(!next.get("A").unwrap().is_resolved());
    }
}
