use super::Dependency;
use imbl::{OrdMap, OrdSet};
use std::sync::Arc;

/// Every dependency known for one target framework, keyed by id.
///
/// Persistent map: cloning is O(1) and an update copies only the path to the
/// changed entry, so snapshots share every untouched branch.
pub type DependencyWorld = OrdMap<String, Arc<Dependency>>;

/// Ordered direct dependencies of the project root.
pub type TopLevelDependencies = Vec<Arc<Dependency>>;

/// Mutable working copy used while folding one change set.
///
/// Keeps the containers it started from next to the edited ones and records
/// every id it wrote, so the result can be compared against the starting
/// point without scanning the whole world. Cloning is cheap, which lets the
/// filter pipeline stage a change on a copy and drop it on rejection.
#[derive(Debug, Clone)]
pub(crate) struct WorldBuilder {
    base_world: DependencyWorld,
    base_top_level: Arc<TopLevelDependencies>,
    world: DependencyWorld,
    top_level: Arc<TopLevelDependencies>,
    touched: OrdSet<String>,
}

impl WorldBuilder {
    pub(crate) fn new(world: DependencyWorld, top_level: Arc<TopLevelDependencies>) -> Self {
        Self {
            base_world: world.clone(),
            base_top_level: Arc::clone(&top_level),
            world,
            top_level,
            touched: OrdSet::new(),
        }
    }

    pub(crate) fn world(&self) -> &DependencyWorld {
        &self.world
    }

    pub(crate) fn top_level(&self) -> &[Arc<Dependency>] {
        &self.top_level
    }

    pub(crate) fn get(&self, id: &str) -> Option<&Arc<Dependency>> {
        self.world.get(id)
    }

    pub(crate) fn contains(&self, id: &str) -> bool {
        self.world.contains_key(id)
    }

    /// Inserts or replaces a dependency. Replacing with an equal value is not a change.
    pub(crate) fn add_or_update(&mut self, dependency: Arc<Dependency>) -> bool {
        if let Some(existing) = self.world.get(dependency.id()) {
            if existing.as_ref() == dependency.as_ref() {
                return false;
            }
        }

        let position = self
            .top_level
            .iter()
            .position(|entry| entry.id() == dependency.id());
        match (position, dependency.is_top_level()) {
            (Some(index), true) => Arc::make_mut(&mut self.top_level)[index] = Arc::clone(&dependency),
            (Some(index), false) => {
                Arc::make_mut(&mut self.top_level).remove(index);
            }
            (None, true) => Arc::make_mut(&mut self.top_level).push(Arc::clone(&dependency)),
            (None, false) => {}
        }

        self.touched.insert(dependency.id().to_string());
        self.world.insert(dependency.id().to_string(), dependency);
        true
    }

    /// Removes a dependency; absent ids are a no-op.
    pub(crate) fn remove(&mut self, id: &str) -> Option<Arc<Dependency>> {
        let removed = self.world.remove(id)?;
        if self.top_level.iter().any(|entry| entry.id() == id) {
            Arc::make_mut(&mut self.top_level).retain(|entry| entry.id() != id);
        }
        self.touched.insert(id.to_string());
        Some(removed)
    }

    /// True when the world or the top-level list differs in content from the
    /// containers the builder started with.
    pub(crate) fn is_changed(&self) -> bool {
        let world_changed = self
            .touched
            .iter()
            .any(|id| !same_entry(self.world.get(id), self.base_world.get(id)));

        world_changed
            || (!Arc::ptr_eq(&self.top_level, &self.base_top_level)
                && (self.top_level.len() != self.base_top_level.len()
                    || self
                        .top_level
                        .iter()
                        .zip(self.base_top_level.iter())
                        .any(|(current, base)| !same_entry(Some(current), Some(base)))))
    }

    /// Final containers. Hands back the starting containers when nothing changed.
    pub(crate) fn into_parts(self) -> (DependencyWorld, Arc<TopLevelDependencies>) {
        if self.is_changed() {
            (self.world, self.top_level)
        } else {
            (self.base_world, self.base_top_level)
        }
    }
}

fn same_entry(current: Option<&Arc<Dependency>>, base: Option<&Arc<Dependency>>) -> bool {
    match (current, base) {
        (Some(current), Some(base)) => Arc::ptr_eq(current, base) || current == base,
        (None, None) => true,
        _ => false,
    }
}
