use crate::dependency_snapshot::domain::{Dependency, DependencyWorld};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use tracing::warn;

/// Breadth-first traversal of a dependency world by child id.
///
/// Each dependency is visited at most once, so diamonds and cycles are safe.
/// Child ids missing from the world are skipped.
pub struct DependencyTreeWalker<'a> {
    world: &'a DependencyWorld,
    max_depth: usize,
}

impl<'a> DependencyTreeWalker<'a> {
    /// Maximum depth followed below a root, to bound work on malformed graphs
    pub const MAX_DEPTH: usize = 100;

    pub fn new(world: &'a DependencyWorld) -> Self {
        Self {
            world,
            max_depth: Self::MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Visits every dependency reachable from `roots`, roots first.
    ///
    /// `descend` decides whether the children of a visited dependency are
    /// followed; the dependency itself is always part of the result.
    pub fn walk<'r, I, F>(&self, roots: I, mut descend: F) -> Vec<&'a Arc<Dependency>>
    where
        I: IntoIterator<Item = &'r str>,
        F: FnMut(&Dependency) -> bool,
    {
        let mut visited: HashSet<&'a str> = HashSet::new();
        let mut queue: VecDeque<(&'a Arc<Dependency>, usize)> = VecDeque::new();
        let mut order = Vec::new();

        for root in roots {
            if let Some((key, dependency)) = self.world.get_key_value(root) {
                if visited.insert(key.as_str()) {
                    queue.push_back((dependency, 0));
                }
            }
        }

        while let Some((dependency, depth)) = queue.pop_front() {
            order.push(dependency);
            if !descend(&**dependency) {
                continue;
            }
            if depth >= self.max_depth {
                warn!(
                    id = %dependency.id(),
                    max_depth = self.max_depth,
                    "maximum dependency depth reached; children not visited"
                );
                continue;
            }

            for child_id in dependency.child_ids() {
                if let Some((key, child)) = self.world.get_key_value(child_id.as_str()) {
                    if visited.insert(key.as_str()) {
                        queue.push_back((child, depth + 1));
                    }
                }
            }
        }

        order
    }

    /// True when a visited dependency satisfies `predicate`.
    pub fn any_reachable<'r, I, F, P>(&self, roots: I, descend: F, mut predicate: P) -> bool
    where
        I: IntoIterator<Item = &'r str>,
        F: FnMut(&Dependency) -> bool,
        P: FnMut(&Dependency) -> bool,
    {
        self.walk(roots, descend)
            .into_iter()
            .any(|dependency| predicate(&**dependency))
    }
}
