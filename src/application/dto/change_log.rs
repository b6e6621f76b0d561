use crate::application::services::SnapshotUpdate;
use crate::dependency_snapshot::domain::{DependencyChangeSet, DependencyModel, ProjectItemSpecs};
use crate::dependency_snapshot::services::TargetFrameworkInterner;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

/// A recorded sequence of provider change batches for one project.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeLog {
    /// Project the batches belong to; the command line may override it
    #[serde(default, alias = "project_path")]
    pub project_path: Option<String>,
    #[serde(default)]
    pub batches: Vec<ChangeBatch>,
}

/// One batch, applied as a single snapshot update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeBatch {
    #[serde(default, alias = "active_target_framework")]
    pub active_target_framework: Option<String>,
    #[serde(default, alias = "project_path")]
    pub project_path: Option<String>,
    #[serde(default, alias = "project_item_specs")]
    pub project_item_specs: Option<Vec<String>>,
    /// Change sets keyed by target framework moniker
    #[serde(default)]
    pub changes: BTreeMap<String, ChangeSetDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangeSetDto {
    #[serde(default)]
    pub added: Vec<DependencyModel>,
    #[serde(default)]
    pub removed: Vec<String>,
}

impl ChangeSetDto {
    pub fn into_domain(self) -> DependencyChangeSet {
        DependencyChangeSet::new(self.added, self.removed.into_iter().collect::<BTreeSet<_>>())
    }
}

impl ChangeBatch {
    /// Converts the batch into an update, interning every moniker.
    ///
    /// Monikers that only differ in case or surrounding whitespace name the
    /// same target framework; their change sets are merged.
    pub fn into_update(self, interner: &TargetFrameworkInterner) -> SnapshotUpdate {
        let mut update = self
            .changes
            .into_iter()
            .fold(SnapshotUpdate::default(), |update, (moniker, change_set)| {
                update.with_changes(interner.get_or_create(&moniker), change_set.into_domain())
            });

        if let Some(moniker) = self.active_target_framework {
            update = update.with_active_target_framework(interner.get_or_create(&moniker));
        }
        if let Some(specs) = self.project_item_specs {
            update = update.with_project_item_specs(ProjectItemSpecs::new(specs));
        }
        if let Some(project_path) = self.project_path {
            update = update.with_project_path(project_path);
        }
        update
    }
}
