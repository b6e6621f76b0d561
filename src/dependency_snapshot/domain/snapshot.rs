use super::{
    Catalogs, Dependency, DependencyChangeSet, ProjectItemSpecs, ProviderRegistry,
    TargetFramework, TargetedDependenciesSnapshot,
};
use crate::dependency_snapshot::filters::FilterPipeline;
use crate::shared::{Result, SnapshotError};
use imbl::OrdMap;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::debug;

/// Targeted snapshots keyed by target framework, in moniker order.
///
/// Persistent map, so a new project snapshot shares every targeted snapshot
/// an update did not touch.
pub type TargetedSnapshots = OrdMap<TargetFramework, Arc<TargetedDependenciesSnapshot>>;

/// Immutable dependency state of a whole project across its target frameworks.
///
/// A target framework is only present while its world holds at least one
/// dependency. Equality compares the project path only, ignoring ASCII case
/// the same way target framework monikers and item specs do: two snapshots
/// are equal when they describe the same project, whatever
/// their content.
#[derive(Debug)]
pub struct DependenciesSnapshot {
    project_path: String,
    path_key: String,
    active_target_framework: TargetFramework,
    dependencies_by_target_framework: TargetedSnapshots,
}

impl DependenciesSnapshot {
    pub fn create_empty(project_path: &str) -> Result<Arc<Self>> {
        ensure_project_path(project_path)?;
        Ok(Arc::new(Self::new(
            project_path,
            TargetFramework::empty(),
            TargetedSnapshots::new(),
        )))
    }

    fn new(
        project_path: &str,
        active_target_framework: TargetFramework,
        dependencies_by_target_framework: TargetedSnapshots,
    ) -> Self {
        Self {
            project_path: project_path.to_string(),
            path_key: project_path.to_ascii_lowercase(),
            active_target_framework,
            dependencies_by_target_framework,
        }
    }

    /// Folds per-target-framework change sets into `previous`.
    ///
    /// Returns `previous` itself when no targeted snapshot changed and neither
    /// the active target framework nor the project path differ. Otherwise the
    /// new snapshot shares every targeted snapshot the changes did not touch.
    #[allow(clippy::too_many_arguments)]
    pub fn from_changes(
        project_path: &str,
        previous: &Arc<Self>,
        changes: &BTreeMap<TargetFramework, DependencyChangeSet>,
        catalogs: &Catalogs,
        active_target_framework: Option<TargetFramework>,
        filters: &FilterPipeline,
        provider_registry: &ProviderRegistry,
        project_item_specs: Option<&ProjectItemSpecs>,
    ) -> Result<Arc<Self>> {
        ensure_project_path(project_path)?;

        let mut by_target_framework = previous.dependencies_by_target_framework.clone();
        let mut world_changed = false;

        for (target_framework, change_set) in changes {
            let targeted = by_target_framework
                .get(target_framework)
                .map(Arc::clone)
                .unwrap_or_else(|| {
                    TargetedDependenciesSnapshot::empty(
                        project_path,
                        target_framework.clone(),
                        catalogs.clone(),
                    )
                });

            let updated = TargetedDependenciesSnapshot::from_changes(
                &targeted,
                change_set,
                catalogs,
                filters,
                provider_registry,
                project_item_specs,
            );

            if !Arc::ptr_eq(&targeted, &updated) {
                by_target_framework.insert(target_framework.clone(), updated);
                world_changed = true;
            }
        }

        let drained: Vec<TargetFramework> = by_target_framework
            .iter()
            .filter(|(_, targeted)| targeted.is_empty())
            .map(|(target_framework, _)| target_framework.clone())
            .collect();
        for target_framework in drained {
            debug!(target_framework = %target_framework, "dropping drained target framework");
            by_target_framework.remove(&target_framework);
            world_changed = true;
        }

        let active_target_framework =
            active_target_framework.unwrap_or_else(|| previous.active_target_framework.clone());

        if world_changed {
            debug!(
                project = %project_path,
                target_frameworks = by_target_framework.len(),
                "dependencies changed"
            );
            return Ok(Arc::new(Self::new(
                project_path,
                active_target_framework,
                by_target_framework,
            )));
        }

        if active_target_framework != previous.active_target_framework {
            debug!(
                project = %project_path,
                active_target_framework = %active_target_framework,
                "active target framework changed"
            );
            return Ok(Arc::new(Self::new(
                project_path,
                active_target_framework,
                previous.dependencies_by_target_framework.clone(),
            )));
        }

        if project_path != previous.project_path {
            debug!(from = %previous.project_path, to = %project_path, "project path changed");
            return Ok(Arc::new(Self::new(
                project_path,
                active_target_framework,
                previous.dependencies_by_target_framework.clone(),
            )));
        }

        Ok(Arc::clone(previous))
    }

    /// Drops the given target frameworks. Returns `self` when none of them is present.
    pub fn remove_targets<'t, I>(self: &Arc<Self>, targets: I) -> Arc<Self>
    where
        I: IntoIterator<Item = &'t TargetFramework>,
    {
        let mut by_target_framework = self.dependencies_by_target_framework.clone();
        let mut removed = false;

        for target_framework in targets {
            if by_target_framework.remove(target_framework).is_some() {
                removed = true;
            }
        }

        if !removed {
            return Arc::clone(self);
        }

        Arc::new(Self::new(
            &self.project_path,
            self.active_target_framework.clone(),
            by_target_framework,
        ))
    }

    /// Looks a dependency up across every target framework.
    ///
    /// With `top_level`, the top-level lists are searched first using the
    /// top-level identity (id or path); the first hit wins outright. Otherwise,
    /// or when nothing matched, the first world holding `id` as a key wins.
    /// Target frameworks are visited in moniker order.
    pub fn find_dependency(&self, id: &str, top_level: bool) -> Option<&Arc<Dependency>> {
        if id.is_empty() {
            return None;
        }

        if top_level {
            let found = self
                .dependencies_by_target_framework
                .values()
                .flat_map(|targeted| targeted.top_level_dependencies())
                .find(|dependency| dependency.top_level_id_equals(id));
            if found.is_some() {
                return found;
            }
        }

        self.dependencies_by_target_framework
            .values()
            .find_map(|targeted| targeted.get(id))
    }

    pub fn project_path(&self) -> &str {
        &self.project_path
    }

    pub fn active_target_framework(&self) -> &TargetFramework {
        &self.active_target_framework
    }

    pub fn dependencies_by_target_framework(&self) -> &TargetedSnapshots {
        &self.dependencies_by_target_framework
    }

    pub fn get(&self, target_framework: &TargetFramework) -> Option<&Arc<TargetedDependenciesSnapshot>> {
        self.dependencies_by_target_framework.get(target_framework)
    }

    pub fn target_frameworks(&self) -> impl Iterator<Item = &TargetFramework> {
        self.dependencies_by_target_framework.keys()
    }

    pub fn has_unresolved_dependency(&self) -> bool {
        self.dependencies_by_target_framework
            .values()
            .any(|targeted| targeted.has_unresolved_dependency())
    }

    pub fn has_visible_unresolved_dependency(&self) -> bool {
        self.dependencies_by_target_framework
            .values()
            .any(|targeted| targeted.has_visible_unresolved_dependency())
    }

    /// Total number of dependencies over every world
    pub fn dependency_count(&self) -> usize {
        self.dependencies_by_target_framework
            .values()
            .map(|targeted| targeted.world().len())
            .sum()
    }
}

fn ensure_project_path(project_path: &str) -> Result<()> {
    if project_path.is_empty() {
        return Err(SnapshotError::invalid_argument("project_path", "must not be empty").into());
    }
    Ok(())
}

impl PartialEq for DependenciesSnapshot {
    fn eq(&self, other: &Self) -> bool {
        self.path_key == other.path_key
    }
}

impl Eq for DependenciesSnapshot {}

impl Hash for DependenciesSnapshot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path_key.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency_snapshot::domain::DependencyModel;

    const PROJECT: &str = "C:\\P\\P.csproj";

    fn tf(moniker: &str) -> TargetFramework {
        TargetFramework::new(moniker)
    }

    fn package(id: &str) -> DependencyModel {
        DependencyModel::new(id, "NuGetDependency").resolved(true).top_level(true)
    }

    fn update(
        previous: &Arc<DependenciesSnapshot>,
        changes: Vec<(TargetFramework, DependencyChangeSet)>,
        active: Option<TargetFramework>,
    ) -> Arc<DependenciesSnapshot> {
        DependenciesSnapshot::from_changes(
            previous.project_path(),
            previous,
            &changes.into_iter().collect(),
            &Catalogs::empty(),
            active,
            &FilterPipeline::empty(),
            &ProviderRegistry::new(),
            None,
        )
        .unwrap()
    }

    fn two_targets() -> Arc<DependenciesSnapshot> {
        update(
            &DependenciesSnapshot::create_empty(PROJECT).unwrap(),
            vec![
                (tf("net6.0"), DependencyChangeSet::default().with_added(package("A"))),
                (tf("net472"), DependencyChangeSet::default().with_added(package("B"))),
            ],
            None,
        )
    }

    #[test]
    fn test_create_empty() {
        let snapshot = DependenciesSnapshot::create_empty(PROJECT).unwrap();
        assert_eq!(snapshot.project_path(), PROJECT);
        assert!(snapshot.dependencies_by_target_framework().is_empty());
        assert!(snapshot.active_target_framework().is_empty());
        assert!(!snapshot.has_unresolved_dependency());
    }

    #[test]
    fn test_create_empty_rejects_empty_path() {
        let error = DependenciesSnapshot::create_empty("").unwrap_err();
        assert!(error.to_string().contains("project_path"));
    }

    #[test]
    fn test_from_changes_rejects_empty_path() {
        let previous = DependenciesSnapshot::create_empty(PROJECT).unwrap();
        let result = DependenciesSnapshot::from_changes(
            "",
            &previous,
            &BTreeMap::new(),
            &Catalogs::empty(),
            None,
            &FilterPipeline::empty(),
            &ProviderRegistry::new(),
            None,
        );
        assert!(matches!(
            result.unwrap_err().downcast_ref::<SnapshotError>(),
            Some(SnapshotError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_add_creates_target_framework() {
        let empty = DependenciesSnapshot::create_empty(PROJECT).unwrap();
        let snapshot = update(
            &empty,
            vec![(tf("net6.0"), DependencyChangeSet::default().with_added(package("PackageX")))],
            None,
        );

        assert!(!Arc::ptr_eq(&empty, &snapshot));
        let targeted = snapshot.get(&tf("net6.0")).unwrap();
        assert_eq!(targeted.world().len(), 1);
        assert_eq!(targeted.top_level_dependencies()[0].id(), "PackageX");
        assert!(!snapshot.has_unresolved_dependency());
    }

    #[test]
    fn test_empty_changes_return_previous() {
        let previous = two_targets();
        let next = update(&previous, vec![], None);
        assert!(Arc::ptr_eq(&previous, &next));
    }

    #[test]
    fn test_no_op_change_on_unknown_target_framework_returns_previous() {
        let previous = two_targets();
        let next = update(
            &previous,
            vec![(tf("net8.0"), DependencyChangeSet::default().with_removed("Missing"))],
            None,
        );
        assert!(Arc::ptr_eq(&previous, &next));
        assert!(next.get(&tf("net8.0")).is_none());
    }

    #[test]
    fn test_drained_target_framework_is_removed() {
        let previous = two_targets();
        let next = update(
            &previous,
            vec![(tf("net6.0"), DependencyChangeSet::default().with_removed("A"))],
            None,
        );
        assert!(next.get(&tf("net6.0")).is_none());
        assert_eq!(next.target_frameworks().count(), 1);
    }

    #[test]
    fn test_untouched_target_framework_is_shared() {
        let previous = two_targets();
        let next = update(
            &previous,
            vec![(tf("net6.0"), DependencyChangeSet::default().with_added(package("C")))],
            None,
        );
        assert!(Arc::ptr_eq(
            previous.get(&tf("net472")).unwrap(),
            next.get(&tf("net472")).unwrap()
        ));
        assert!(!Arc::ptr_eq(
            previous.get(&tf("net6.0")).unwrap(),
            next.get(&tf("net6.0")).unwrap()
        ));
    }

    #[test]
    fn test_active_target_framework_change_shares_mapping() {
        let previous = two_targets();
        let next = update(&previous, vec![], Some(tf("net472")));

        assert!(!Arc::ptr_eq(&previous, &next));
        assert_eq!(next.active_target_framework(), &tf("net472"));
        assert!(previous
            .dependencies_by_target_framework
            .ptr_eq(&next.dependencies_by_target_framework));
    }

    #[test]
    fn test_same_active_target_framework_returns_previous() {
        let previous = update(&two_targets(), vec![], Some(tf("net6.0")));
        let next = update(&previous, vec![], Some(tf("NET6.0")));
        assert!(Arc::ptr_eq(&previous, &next));
    }

    #[test]
    fn test_project_path_change_is_case_sensitive() {
        let previous = two_targets();
        let next = DependenciesSnapshot::from_changes(
            "c:\\p\\p.csproj",
            &previous,
            &BTreeMap::new(),
            &Catalogs::empty(),
            None,
            &FilterPipeline::empty(),
            &ProviderRegistry::new(),
            None,
        )
        .unwrap();

        assert!(!Arc::ptr_eq(&previous, &next));
        assert_eq!(next.project_path(), "c:\\p\\p.csproj");
        assert!(previous
            .dependencies_by_target_framework
            .ptr_eq(&next.dependencies_by_target_framework));
        assert_eq!(*previous, *next);
    }

    #[test]
    fn test_remove_targets() {
        let previous = two_targets();
        let same = previous.remove_targets([&tf("net8.0")]);
        assert!(Arc::ptr_eq(&previous, &same));

        let next = previous.remove_targets([&tf("net8.0"), &tf("net472")]);
        assert!(!Arc::ptr_eq(&previous, &next));
        assert!(next.get(&tf("net472")).is_none());
        assert!(Arc::ptr_eq(
            previous.get(&tf("net6.0")).unwrap(),
            next.get(&tf("net6.0")).unwrap()
        ));
    }

    #[test]
    fn test_find_dependency_prefers_top_level() {
        let empty = DependenciesSnapshot::create_empty(PROJECT).unwrap();
        let snapshot = update(
            &empty,
            vec![
                (
                    tf("net472"),
                    DependencyChangeSet::default()
                        .with_added(DependencyModel::new("X", "NuGetDependency").resolved(true)),
                ),
                (
                    tf("net6.0"),
                    DependencyChangeSet::default().with_added(package("X")),
                ),
            ],
            None,
        );

        let top_level = snapshot.find_dependency("X", true).unwrap();
        assert_eq!(top_level.target_framework(), &tf("net6.0"));

        let any = snapshot.find_dependency("X", false).unwrap();
        assert_eq!(any.target_framework(), &tf("net472"));

        assert!(snapshot.find_dependency("", true).is_none());
        assert!(snapshot.find_dependency("Y", true).is_none());
    }

    #[test]
    fn test_find_dependency_by_path() {
        let empty = DependenciesSnapshot::create_empty(PROJECT).unwrap();
        let snapshot = update(
            &empty,
            vec![(
                tf("net6.0"),
                DependencyChangeSet::default()
                    .with_added(package("Lib").with_path("C:\\P\\Lib\\Lib.csproj")),
            )],
            None,
        );

        let found = snapshot.find_dependency("c:\\p\\lib\\lib.csproj", true).unwrap();
        assert_eq!(found.id(), "Lib");
        assert!(snapshot.find_dependency("c:\\p\\lib\\lib.csproj", false).is_none());
    }

    #[test]
    fn test_equality_is_project_identity() {
        let a = DependenciesSnapshot::create_empty("C:\\P\\P.csproj").unwrap();
        let b = two_targets();
        let c = DependenciesSnapshot::create_empty("c:\\p\\p.CSPROJ").unwrap();
        let d = DependenciesSnapshot::create_empty("C:\\Q\\Q.csproj").unwrap();

        assert_eq!(*a, *b);
        assert_eq!(*a, *c);
        assert_ne!(*a, *d);

        let set: std::collections::HashSet<&DependenciesSnapshot> = [&*a, &*b, &*c, &*d].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_equality_folds_ascii_case_only() {
        let upper = DependenciesSnapshot::create_empty("C:\\Été\\P.csproj").unwrap();
        let ascii_lower = DependenciesSnapshot::create_empty("c:\\Été\\p.csproj").unwrap();
        let unicode_lower = DependenciesSnapshot::create_empty("C:\\été\\P.csproj").unwrap();

        assert_eq!(*upper, *ascii_lower);
        assert_ne!(*upper, *unicode_lower);
    }
}
