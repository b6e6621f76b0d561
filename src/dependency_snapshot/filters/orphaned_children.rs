use super::{DependenciesSnapshotFilter, RemoveDecision, RemoveDependencyContext};
use crate::dependency_snapshot::domain::Dependency;
use crate::dependency_snapshot::services::DependencyTreeWalker;
use std::collections::HashSet;

/// Cascades a removal to descendants that nothing else references any more.
///
/// A descendant stays when it is top-level or still listed as a child by a
/// dependency outside the removal set. Cycles made only of orphans are kept.
#[derive(Debug, Default, Clone, Copy)]
pub struct OrphanedChildrenFilter;

impl OrphanedChildrenFilter {
    pub fn new() -> Self {
        Self
    }
}

impl DependenciesSnapshotFilter for OrphanedChildrenFilter {
    fn name(&self) -> &'static str {
        "OrphanedChildrenFilter"
    }

    fn before_remove(
        &self,
        dependency: &Dependency,
        context: &mut RemoveDependencyContext<'_>,
    ) -> RemoveDecision {
        let orphans: Vec<String> = {
            let world = context.world();
            let candidates: Vec<&Dependency> = DependencyTreeWalker::new(world)
                .walk([dependency.id()], |_| true)
                .into_iter()
                .skip(1)
                .map(|candidate| &**candidate)
                .filter(|candidate| !candidate.is_top_level())
                .collect();

            let mut removing: HashSet<&str> = context.pending_removals().collect();
            removing.insert(dependency.id());

            loop {
                let mut grew = false;
                for candidate in &candidates {
                    if removing.contains(candidate.id()) {
                        continue;
                    }
                    let referenced = world.values().any(|parent| {
                        !removing.contains(parent.id())
                            && parent.child_ids().iter().any(|child| child == candidate.id())
                    });
                    if !referenced {
                        removing.insert(candidate.id());
                        grew = true;
                    }
                }
                if !grew {
                    break;
                }
            }

            candidates
                .iter()
                .filter(|candidate| removing.contains(candidate.id()))
                .map(|candidate| candidate.id().to_string())
                .collect()
        };

        for id in orphans {
            context.also_remove(id);
        }

        RemoveDecision::Accept
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

    fn node(id: &str, top_level: bool, children: &[&str]) -> DependencyModel {
        DependencyModel::new(id, "NuGetDependency")
            .resolved(true)
            .top_level(top_level)
            .with_dependency_ids(children.iter().copied())
    }

    fn remove_from(models: Vec<DependencyModel>, id: &str) -> Arc<TargetedDependenciesSnapshot> {
        let empty = TargetedDependenciesSnapshot::create_empty(
            "C:\\P\\P.csproj",
            TargetFramework::new("net6.0"),
            Catalogs::empty(),
        )
        .unwrap();
        let filters = FilterPipeline::new(vec![Arc::new(OrphanedChildrenFilter::new())]);
        let added = models
            .into_iter()
            .fold(DependencyChangeSet::default(), |changes, model| changes.with_added(model));
        let previous = TargetedDependenciesSnapshot::from_changes(
            &empty,
            &added,
            &Catalogs::empty(),
            &filters,
            &ProviderRegistry::new(),
            None,
        );

        TargetedDependenciesSnapshot::from_changes(
            &previous,
            &DependencyChangeSet::default().with_removed(id),
            &Catalogs::empty(),
            &filters,
            &ProviderRegistry::new(),
            None,
        )
    }

    fn ids(snapshot: &TargetedDependenciesSnapshot) -> Vec<&str> {
        snapshot.world().keys().map(String::as_str).collect()
    }

    #[test]
    fn test_removal_cascades_to_descendants() {
        let snapshot = remove_from(
            vec![
                node("A", true, &["B"]),
                node("B", false, &["C"]),
                node("C", false, &[]),
                node("X", true, &[]),
            ],
            "A",
        );

        assert_eq!(ids(&snapshot), vec!["X"]);
    }

    #[test]
    fn test_child_with_other_parent_is_kept() {
        let snapshot = remove_from(
            vec![
                node("A", true, &["B", "C"]),
                node("B", false, &[]),
                node("C", false, &[]),
                node("X", true, &["B"]),
            ],
            "A",
        );

        assert_eq!(ids(&snapshot), vec!["B", "X"]);
    }

    #[test]
    fn test_top_level_descendant_is_kept() {
        let snapshot = remove_from(
            vec![node("A", true, &["B"]), node("B", true, &["C"]), node("C", false, &[])],
            "A",
        );

        assert_eq!(ids(&snapshot), vec!["B", "C"]);
    }

    #[test]
    fn test_cycle_of_orphans_is_kept() {
        let snapshot = remove_from(
            vec![
                node("A", true, &["B"]),
                node("B", false, &["C"]),
                node("C", false, &["B"]),
            ],
            "A",
        );

        assert_eq!(ids(&snapshot), vec!["B", "C"]);
    }
}
