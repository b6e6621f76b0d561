use crate::dependency_snapshot::domain::{
    Catalogs, DependencyChangeSet, ProjectItemSpecs, TargetFramework,
};
use std::collections::BTreeMap;

/// One batch of provider changes for a project, as queued on its update service.
#[derive(Debug, Clone, Default)]
pub struct SnapshotUpdate {
    pub changes: BTreeMap<TargetFramework, DependencyChangeSet>,
    pub catalogs: Catalogs,
    /// Keeps the previous active target framework when absent
    pub active_target_framework: Option<TargetFramework>,
    pub project_item_specs: Option<ProjectItemSpecs>,
    /// Renames the project when present
    pub project_path: Option<String>,
}

impl SnapshotUpdate {
    pub fn new(changes: BTreeMap<TargetFramework, DependencyChangeSet>) -> Self {
        Self {
            changes,
            ..Self::default()
        }
    }

    /// Adds a change set, merging it into any change set already queued for
    /// the same target framework.
    ///
    /// The merge behaves as if the queued set were applied first: a later
    /// removal cancels an earlier addition of the same id.
    pub fn with_changes(mut self, target_framework: TargetFramework, change_set: DependencyChangeSet) -> Self {
        match self.changes.remove(&target_framework) {
            Some(existing) => {
                let mut added: Vec<_> = existing
                    .added()
                    .iter()
                    .filter(|model| !change_set.removed().contains(&model.id))
                    .cloned()
                    .collect();
                added.extend_from_slice(change_set.added());
                let mut removed = existing.removed().clone();
                removed.extend(change_set.removed().iter().cloned());
                self.changes
                    .insert(target_framework, DependencyChangeSet::new(added, removed));
            }
            None => {
                self.changes.insert(target_framework, change_set);
            }
        }
        self
    }

    pub fn with_catalogs(mut self, catalogs: Catalogs) -> Self {
        self.catalogs = catalogs;
        self
    }

    pub fn with_active_target_framework(mut self, target_framework: TargetFramework) -> Self {
        self.active_target_framework = Some(target_framework);
        self
    }

    pub fn with_project_item_specs(mut self, specs: ProjectItemSpecs) -> Self {
        self.project_item_specs = Some(specs);
        self
    }

    pub fn with_project_path(mut self, project_path: impl Into<String>) -> Self {
        self.project_path = Some(project_path.into());
        self
    }
}
