use crate::dependency_snapshot::domain::TargetFramework;
use dashmap::DashMap;
use std::sync::Arc;

/// Hands out one shared [`TargetFramework`] per distinct normalized moniker.
///
/// Safe to share across threads; clones share the same cache.
#[derive(Debug, Clone, Default)]
pub struct TargetFrameworkInterner {
    cache: Arc<DashMap<String, TargetFramework>>,
}

impl TargetFrameworkInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the interned instance for `moniker`, creating it on first use.
    /// Blank monikers map to [`TargetFramework::empty`].
    pub fn get_or_create(&self, moniker: &str) -> TargetFramework {
        let normalized = TargetFramework::normalize(moniker);
        if normalized.is_empty() {
            return TargetFramework::empty();
        }

        if let Some(existing) = self.cache.get(&normalized) {
            return existing.clone();
        }

        self.cache
            .entry(normalized)
            .or_insert_with(|| TargetFramework::new(moniker))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
