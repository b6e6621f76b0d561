use crate::dependency_snapshot::domain::DependenciesSnapshot;
use std::sync::Arc;

/// Counters collected while replaying a change log
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStatistics {
    pub batches: usize,
    /// Batches that produced a new snapshot
    pub published: usize,
    /// Batches that left the previous snapshot in place
    pub unchanged: usize,
}

impl ReplayStatistics {
    pub(crate) fn record(&mut self, changed: bool) {
        self.batches += 1;
        if changed {
            self.published += 1;
        } else {
            self.unchanged += 1;
        }
    }
}

/// ReplayResponse - Internal response DTO from the replay use case
#[derive(Debug, Clone)]
pub struct ReplayResponse {
    /// Snapshot after the last batch
    pub snapshot: Arc<DependenciesSnapshot>,
    pub statistics: ReplayStatistics,
}

impl ReplayResponse {
    pub fn new(snapshot: Arc<DependenciesSnapshot>, statistics: ReplayStatistics) -> Self {
        Self {
            snapshot,
            statistics,
        }
    }
}
