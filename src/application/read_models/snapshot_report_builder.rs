//! Builder for constructing SnapshotReport from a dependency snapshot

use super::snapshot_report::{ReportMetadataView, ReportSummaryView, SnapshotReport};
use super::target_view::{DependencyNodeView, TargetView};
use crate::application::dto::ReplayStatistics;
use crate::dependency_snapshot::domain::{
    DependenciesSnapshot, Dependency, TargetedDependenciesSnapshot,
};
use crate::dependency_snapshot::services::DependencyTreeWalker;
use chrono::Utc;
use std::collections::HashSet;

const TOOL_NAME: &str = "depsnap";

/// Builds the read model the formatters render.
pub struct SnapshotReportBuilder;

impl SnapshotReportBuilder {
    pub fn build(snapshot: &DependenciesSnapshot, statistics: &ReplayStatistics) -> SnapshotReport {
        Self::build_with_timestamp(snapshot, statistics, Utc::now().to_rfc3339())
    }

    pub fn build_with_timestamp(
        snapshot: &DependenciesSnapshot,
        statistics: &ReplayStatistics,
        timestamp: String,
    ) -> SnapshotReport {
        SnapshotReport {
            metadata: Self::build_metadata(snapshot, timestamp),
            summary: Self::build_summary(snapshot, statistics),
            targets: snapshot
                .dependencies_by_target_framework()
                .values()
                .map(|targeted| {
                    let is_active = targeted.target_framework() == snapshot.active_target_framework();
                    Self::build_target(targeted, is_active)
                })
                .collect(),
        }
    }

    fn build_metadata(snapshot: &DependenciesSnapshot, timestamp: String) -> ReportMetadataView {
        ReportMetadataView {
            timestamp,
            tool_name: TOOL_NAME.to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            project_path: snapshot.project_path().to_string(),
            active_target_framework: snapshot.active_target_framework().moniker().to_string(),
        }
    }

    fn build_summary(snapshot: &DependenciesSnapshot, statistics: &ReplayStatistics) -> ReportSummaryView {
        ReportSummaryView {
            target_frameworks: snapshot.dependencies_by_target_framework().len(),
            dependencies: snapshot.dependency_count(),
            has_unresolved_dependency: snapshot.has_unresolved_dependency(),
            has_visible_unresolved_dependency: snapshot.has_visible_unresolved_dependency(),
            batches: statistics.batches,
            published_snapshots: statistics.published,
            unchanged_batches: statistics.unchanged,
        }
    }

    fn build_target(targeted: &TargetedDependenciesSnapshot, is_active: bool) -> TargetView {
        let mut expansion = Expansion::default();
        let dependencies = targeted
            .top_level_dependencies()
            .iter()
            .map(|dependency| Self::build_node(targeted, dependency, &mut expansion, 0))
            .collect();

        TargetView {
            target_framework: targeted.target_framework().moniker().to_string(),
            is_active,
            dependency_count: targeted.world().len(),
            has_unresolved_dependency: targeted.has_unresolved_dependency(),
            has_reachable_visible_unresolved_dependency: targeted
                .has_reachable_visible_unresolved_dependency(),
            dependencies,
        }
    }

    /// Expands a dependency depth-first.
    ///
    /// Each subtree is expanded once per target: later occurrences of a node
    /// with children are marked as shared and left collapsed, and a node that
    /// is its own ancestor is marked as a cycle.
    fn build_node<'a>(
        targeted: &'a TargetedDependenciesSnapshot,
        dependency: &'a Dependency,
        expansion: &mut Expansion<'a>,
        depth: usize,
    ) -> DependencyNodeView {
        let cycle = expansion.ancestors.contains(dependency.id());
        let shared = !cycle
            && expansion.expanded.contains(dependency.id())
            && targeted.dependency_children(dependency).next().is_some();
        let mut children = Vec::new();

        if !cycle && !shared && depth < DependencyTreeWalker::MAX_DEPTH {
            expansion.expanded.insert(dependency.id());
            expansion.ancestors.insert(dependency.id());
            children = targeted
                .dependency_children(dependency)
                .map(|child| Self::build_node(targeted, child, expansion, depth + 1))
                .collect();
            expansion.ancestors.remove(dependency.id());
        }

        DependencyNodeView {
            id: dependency.id().to_string(),
            caption: dependency.caption().to_string(),
            provider_type: dependency.provider_type().to_string(),
            resolved: dependency.is_resolved(),
            implicit: dependency.is_implicit(),
            visible: dependency.is_visible(),
            icon: dependency.icon().map(str::to_string),
            cycle,
            shared,
            children,
        }
    }
}

/// Traversal state of one target's tree
#[derive(Default)]
struct Expansion<'a> {
    ancestors: HashSet<&'a str>,
    expanded: HashSet<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency_snapshot::domain::{
        Catalogs, DependencyChangeSet, DependencyModel, ProviderRegistry, TargetFramework,
    };
    use crate::dependency_snapshot::filters::FilterPipeline;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn snapshot(change_sets: Vec<(&str, DependencyChangeSet)>, active: &str) -> Arc<DependenciesSnapshot> {
        let changes: BTreeMap<TargetFramework, DependencyChangeSet> = change_sets
            .into_iter()
            .map(|(moniker, change_set)| (TargetFramework::new(moniker), change_set))
            .collect();
        let empty = DependenciesSnapshot::create_empty("C:\\P\\P.csproj").unwrap();
        DependenciesSnapshot::from_changes(
            "C:\\P\\P.csproj",
            &empty,
            &changes,
            &Catalogs::empty(),
            Some(TargetFramework::new(active)),
            &FilterPipeline::empty(),
            &ProviderRegistry::new(),
            None,
        )
        .unwrap()
    }

    fn model(id: &str, children: &[&str]) -> DependencyModel {
        DependencyModel::new(id, "NuGetDependency")
            .resolved(true)
            .with_dependency_ids(children.iter().copied())
    }

    #[test]
    fn test_build_metadata_and_summary() {
        let snapshot = snapshot(
            vec![
                ("net6.0", DependencyChangeSet::default().with_added(model("A", &[]).top_level(true))),
                ("net472", DependencyChangeSet::default().with_added(model("B", &[]).top_level(true).resolved(false))),
            ],
            "net6.0",
        );
        let statistics = ReplayStatistics {
            batches: 2,
            published: 1,
            unchanged: 1,
        };

        let report = SnapshotReportBuilder::build_with_timestamp(&snapshot, &statistics, "2024-01-01T00:00:00Z".to_string());

        assert_eq!(report.metadata.tool_name, "depsnap");
        assert_eq!(report.metadata.timestamp, "2024-01-01T00:00:00Z");
        assert_eq!(report.metadata.active_target_framework, "net6.0");
        assert_eq!(report.summary.target_frameworks, 2);
        assert_eq!(report.summary.dependencies, 2);
        assert!(report.summary.has_unresolved_dependency);
        assert_eq!(report.summary.published_snapshots, 1);

        let monikers: Vec<&str> = report.targets.iter().map(|t| t.target_framework.as_str()).collect();
        assert_eq!(monikers, vec!["net472", "net6.0"]);
        assert!(report.targets[1].is_active);
        assert!(!report.targets[0].is_active);
    }

    #[test]
    fn test_build_expands_diamonds_once() {
        let snapshot = snapshot(
            vec![(
                "net6.0",
                DependencyChangeSet::default()
                    .with_added(model("A", &["B", "C"]).top_level(true))
                    .with_added(model("B", &["D"]))
                    .with_added(model("C", &["D"]))
                    .with_added(model("D", &["E"]))
                    .with_added(model("E", &[])),
            )],
            "net6.0",
        );

        let report = SnapshotReportBuilder::build(&snapshot, &ReplayStatistics::default());
        let root = &report.targets[0].dependencies[0];

        assert_eq!(root.id, "A");
        assert_eq!(root.children.len(), 2);
        let first = &root.children[0].children[0];
        assert_eq!(first.id, "D");
        assert!(!first.shared);
        assert_eq!(first.children[0].id, "E");

        let second = &root.children[1].children[0];
        assert_eq!(second.id, "D");
        assert!(second.shared);
        assert!(!second.cycle);
        assert!(second.children.is_empty());
    }

    #[test]
    fn test_build_leaf_repeats_are_not_shared() {
        let snapshot = snapshot(
            vec![(
                "net6.0",
                DependencyChangeSet::default()
                    .with_added(model("A", &["C"]).top_level(true))
                    .with_added(model("B", &["C"]).top_level(true))
                    .with_added(model("C", &[])),
            )],
            "net6.0",
        );

        let report = SnapshotReportBuilder::build(&snapshot, &ReplayStatistics::default());
        let dependencies = &report.targets[0].dependencies;

        assert!(!dependencies[0].children[0].shared);
        assert!(!dependencies[1].children[0].shared);
    }

    #[test]
    fn test_build_layered_diamonds_stay_linear() {
        // Every layer has two nodes that both point at both nodes of the next
        // layer, which doubles the number of root-to-leaf paths per layer.
        const LAYERS: usize = 40;
        let mut change_set = DependencyChangeSet::default()
            .with_added(model("Root", &["L0a", "L0b"]).top_level(true));
        for layer in 0..LAYERS {
            let next: Vec<String> = if layer + 1 < LAYERS {
                vec![format!("L{}a", layer + 1), format!("L{}b", layer + 1)]
            } else {
                Vec::new()
            };
            for side in ["a", "b"] {
                change_set = change_set.with_added(
                    DependencyModel::new(format!("L{}{}", layer, side), "NuGetDependency")
                        .resolved(true)
                        .with_dependency_ids(next.iter().cloned()),
                );
            }
        }
        let snapshot = snapshot(vec![("net6.0", change_set)], "net6.0");

        let report = SnapshotReportBuilder::build(&snapshot, &ReplayStatistics::default());

        fn count(node: &DependencyNodeView) -> usize {
            1 + node.children.iter().map(count).sum::<usize>()
        }
        let nodes = count(&report.targets[0].dependencies[0]);
        assert!(nodes <= 1 + 4 * LAYERS, "expanded {} nodes", nodes);
    }

    #[test]
    fn test_build_marks_cycles() {
        let snapshot = snapshot(
            vec![(
                "net6.0",
                DependencyChangeSet::default()
                    .with_added(model("A", &["B"]).top_level(true))
                    .with_added(model("B", &["A"])),
            )],
            "net6.0",
        );

        let report = SnapshotReportBuilder::build(&snapshot, &ReplayStatistics::default());
        let repeated = &report.targets[0].dependencies[0].children[0].children[0];

        assert_eq!(repeated.id, "A");
        assert!(repeated.cycle);
        assert!(repeated.children.is_empty());
    }
}
