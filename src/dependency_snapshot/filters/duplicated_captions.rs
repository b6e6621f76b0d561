use super::{AddDecision, AddDependencyContext, DependenciesSnapshotFilter};
use crate::dependency_snapshot::domain::Dependency;

/// Disambiguates top-level dependencies that would display the same caption.
///
/// Both sides of a clash are renamed to `Caption (OriginalItemSpec)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DuplicatedCaptionsFilter;

impl DuplicatedCaptionsFilter {
    pub fn new() -> Self {
        Self
    }

    fn alias(caption: &str, original_item_spec: &str) -> String {
        format!("{} ({})", caption, original_item_spec)
    }
}

impl DependenciesSnapshotFilter for DuplicatedCaptionsFilter {
    fn name(&self) -> &'static str {
        "DuplicatedCaptionsFilter"
    }

    fn before_add_or_update(
        &self,
        dependency: Dependency,
        context: &mut AddDependencyContext<'_>,
    ) -> AddDecision {
        if !dependency.is_top_level() {
            return AddDecision::Accept(dependency);
        }

        let caption = dependency.caption();
        let clashes: Vec<Dependency> = context
            .top_level_dependencies()
            .filter(|other| other.id() != dependency.id())
            .filter(|other| {
                other.caption().eq_ignore_ascii_case(caption)
                    || other
                        .caption()
                        .eq_ignore_ascii_case(&Self::alias(caption, other.original_item_spec()))
            })
            .cloned()
            .collect();

        if clashes.is_empty() {
            return AddDecision::Accept(dependency);
        }

        for other in clashes {
            if other.caption().eq_ignore_ascii_case(caption) {
                let alias = Self::alias(other.caption(), other.original_item_spec());
                context.add_or_update(other.with_caption(alias));
            }
        }

        let alias = Self::alias(dependency.caption(), dependency.original_item_spec());
        AddDecision::Accept(dependency.with_caption(alias))
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

    #[derive(Debug)]
    struct RejectId(&'static str);

    impl DependenciesSnapshotFilter for RejectId {
        fn before_add_or_update(
            &self,
            dependency: Dependency,
            _context: &mut AddDependencyContext<'_>,
        ) -> AddDecision {
            if dependency.id() == self.0 {
                AddDecision::Reject
            } else {
                AddDecision::Accept(dependency)
            }
        }
    }

    fn filters() -> FilterPipeline {
        FilterPipeline::new(vec![Arc::new(DuplicatedCaptionsFilter::new())])
    }

    fn apply(
        previous: &Arc<TargetedDependenciesSnapshot>,
        changes: DependencyChangeSet,
        filters: &FilterPipeline,
    ) -> Arc<TargetedDependenciesSnapshot> {
        TargetedDependenciesSnapshot::from_changes(
            previous,
            &changes,
            &Catalogs::empty(),
            filters,
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

    fn logging(id: &str) -> DependencyModel {
        DependencyModel::new(id, "NuGetDependency")
            .resolved(true)
            .top_level(true)
            .with_caption("Logging")
            .with_original_item_spec(id)
    }

    #[test]
    fn test_clashing_captions_are_both_renamed() {
        let snapshot = apply(
            &empty(),
            DependencyChangeSet::default()
                .with_added(logging("Vendor.Logging"))
                .with_added(logging("Other.Logging")),
            &filters(),
        );

        assert_eq!(snapshot.get("Vendor.Logging").unwrap().caption(), "Logging (Vendor.Logging)");
        assert_eq!(snapshot.get("Other.Logging").unwrap().caption(), "Logging (Other.Logging)");
    }

    #[test]
    fn test_distinct_and_nested_captions_are_kept() {
        let snapshot = apply(
            &empty(),
            DependencyChangeSet::default()
                .with_added(logging("Vendor.Logging"))
                .with_added(logging("Nested.Logging").top_level(false))
                .with_added(
                    DependencyModel::new("Json", "NuGetDependency")
                        .resolved(true)
                        .top_level(true),
                ),
            &filters(),
        );

        assert_eq!(snapshot.get("Vendor.Logging").unwrap().caption(), "Logging");
        assert_eq!(snapshot.get("Nested.Logging").unwrap().caption(), "Logging");
        assert_eq!(snapshot.get("Json").unwrap().caption(), "Json");
    }

    #[test]
    fn test_re_adding_disambiguated_dependency_is_noop() {
        let previous = apply(
            &empty(),
            DependencyChangeSet::default()
                .with_added(logging("Vendor.Logging"))
                .with_added(logging("Other.Logging")),
            &filters(),
        );

        let next = apply(
            &previous,
            DependencyChangeSet::default().with_added(logging("Other.Logging")),
            &filters(),
        );

        assert!(Arc::ptr_eq(&previous, &next));
        assert_eq!(next.get("Vendor.Logging").unwrap().caption(), "Logging (Vendor.Logging)");
    }

    #[test]
    fn test_rejected_addition_leaves_other_caption_alone() {
        let previous = apply(
            &empty(),
            DependencyChangeSet::default().with_added(logging("Vendor.Logging")),
            &filters(),
        );
        let filters = filters().with_filter(Arc::new(RejectId("Other.Logging")));

        let next = apply(
            &previous,
            DependencyChangeSet::default().with_added(logging("Other.Logging")),
            &filters,
        );

        assert!(Arc::ptr_eq(&previous, &next));
        assert_eq!(next.get("Vendor.Logging").unwrap().caption(), "Logging");
        assert!(next.get("Other.Logging").is_none());
    }
}
