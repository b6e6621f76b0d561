use super::DependencyModel;
use std::collections::BTreeSet;

/// Provider-reported delta for one target framework.
///
/// Consumed once by an update. Removals are applied before additions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyChangeSet {
    added: Vec<DependencyModel>,
    removed: BTreeSet<String>,
}

impl DependencyChangeSet {
    pub fn new(added: Vec<DependencyModel>, removed: BTreeSet<String>) -> Self {
        Self { added, removed }
    }

    pub fn with_added(mut self, model: DependencyModel) -> Self {
        self.added.push(model);
        self
    }

    pub fn with_removed(mut self, id: impl Into<String>) -> Self {
        self.removed.insert(id.into());
        self
    }

    pub fn added(&self) -> &[DependencyModel] {
        &self.added
    }

    pub fn removed(&self) -> &BTreeSet<String> {
        &self.removed
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}
