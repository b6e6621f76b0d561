use super::{
    AddDecision, AddDependencyContext, DependenciesSnapshotFilter, DuplicatedCaptionsFilter,
    FilterEnvironment, ImplicitTopLevelFilter, OrphanedChildrenFilter, RemoveDecision,
    RemoveDependencyContext, SdkAndPackagesFilter, UnresolvedDependenciesFilter,
};
use crate::dependency_snapshot::domain::{Dependency, WorldBuilder};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::trace;

/// Built-in filter kinds, addressable by name from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterKind {
    Unresolved,
    SdkAndPackages,
    ImplicitTopLevel,
    DuplicatedCaptions,
    OrphanedChildren,
}

impl FilterKind {
    /// Order of the standard pipeline
    pub const STANDARD: [FilterKind; 5] = [
        FilterKind::Unresolved,
        FilterKind::SdkAndPackages,
        FilterKind::ImplicitTopLevel,
        FilterKind::DuplicatedCaptions,
        FilterKind::OrphanedChildren,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::Unresolved => "unresolved",
            FilterKind::SdkAndPackages => "sdk-and-packages",
            FilterKind::ImplicitTopLevel => "implicit-top-level",
            FilterKind::DuplicatedCaptions => "duplicated-captions",
            FilterKind::OrphanedChildren => "orphaned-children",
        }
    }

    /// Creates the filter instance for this kind
    pub fn create(&self) -> Arc<dyn DependenciesSnapshotFilter> {
        match self {
            FilterKind::Unresolved => Arc::new(UnresolvedDependenciesFilter::new()),
            FilterKind::SdkAndPackages => Arc::new(SdkAndPackagesFilter::new()),
            FilterKind::ImplicitTopLevel => Arc::new(ImplicitTopLevelFilter::new()),
            FilterKind::DuplicatedCaptions => Arc::new(DuplicatedCaptionsFilter::new()),
            FilterKind::OrphanedChildren => Arc::new(OrphanedChildrenFilter::new()),
        }
    }
}

impl FromStr for FilterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterKind::STANDARD
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "Unknown filter: {}. Expected one of: {}",
                    s,
                    FilterKind::STANDARD.map(|kind| kind.as_str()).join(", ")
                )
            })
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordered, explicitly constructed sequence of snapshot filters.
#[derive(Debug, Clone, Default)]
pub struct FilterPipeline {
    filters: Vec<Arc<dyn DependenciesSnapshotFilter>>,
}

impl FilterPipeline {
    pub fn new(filters: Vec<Arc<dyn DependenciesSnapshotFilter>>) -> Self {
        Self { filters }
    }

    /// A pipeline that commits every change as reported
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every built-in filter in [`FilterKind::STANDARD`] order
    pub fn standard() -> Self {
        Self::from_kinds(&FilterKind::STANDARD)
    }

    pub fn from_kinds(kinds: &[FilterKind]) -> Self {
        kinds.iter().map(FilterKind::create).collect()
    }

    /// Appends a filter at the end of the chain
    pub fn with_filter(mut self, filter: Arc<dyn DependenciesSnapshotFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|filter| filter.name()).collect()
    }

    /// Runs an addition through the chain and commits whatever survives it.
    ///
    /// The chain works on a staged copy of the builder, so side updates made
    /// by filters are committed together with the change or not at all.
    pub(crate) fn apply_add(
        &self,
        dependency: Dependency,
        builder: &mut WorldBuilder,
        environment: &FilterEnvironment<'_>,
    ) {
        let id = dependency.id().to_string();
        let mut staged = builder.clone();
        let mut context = AddDependencyContext::new(&mut staged, environment);
        let mut current = dependency;

        for filter in &self.filters {
            match filter.before_add_or_update(current, &mut context) {
                AddDecision::Accept(next) => current = next,
                AddDecision::Reject => {
                    trace!(filter = filter.name(), id = %id, "addition rejected");
                    return;
                }
            }
        }

        staged.add_or_update(Arc::new(current));
        *builder = staged;
    }

    /// Runs a removal through the chain; on acceptance removes the dependency
    /// and every id the filters scheduled along with it. A rejection discards
    /// every side update made along the way.
    pub(crate) fn apply_remove(
        &self,
        id: &str,
        builder: &mut WorldBuilder,
        environment: &FilterEnvironment<'_>,
    ) {
        let Some(dependency) = builder.get(id).cloned() else {
            trace!(id = %id, "removal of unknown dependency ignored");
            return;
        };

        let mut staged = builder.clone();
        let mut context = RemoveDependencyContext::new(&mut staged, environment);
        for filter in &self.filters {
            if filter.before_remove(&dependency, &mut context) == RemoveDecision::Reject {
                trace!(filter = filter.name(), id = %id, "removal rejected");
                return;
            }
        }

        let cascade = context.into_pending_removals();
        staged.remove(id);
        for cascaded in cascade {
            trace!(id = %cascaded, cause = %id, "cascading removal");
            staged.remove(&cascaded);
        }
        *builder = staged;
    }
}

impl FromIterator<Arc<dyn DependenciesSnapshotFilter>> for FilterPipeline {
    fn from_iter<T: IntoIterator<Item = Arc<dyn DependenciesSnapshotFilter>>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_kind_from_str() {
        assert_eq!(FilterKind::from_str("unresolved").unwrap(), FilterKind::Unresolved);
        assert_eq!(
            FilterKind::from_str("Orphaned-Children").unwrap(),
            FilterKind::OrphanedChildren
        );
    }

    #[test]
    fn test_filter_kind_from_str_invalid() {
        let error = FilterKind::from_str("dedupe").unwrap_err();
        assert!(error.contains("Unknown filter: dedupe"));
        assert!(error.contains("sdk-and-packages"));
    }

    #[test]
    fn test_filter_kind_deserializes_kebab_case() {
        let kinds: Vec<FilterKind> =
            serde_json::from_str(r#"["implicit-top-level", "duplicated-captions"]"#).unwrap();
        assert_eq!(
            kinds,
            vec![FilterKind::ImplicitTopLevel, FilterKind::DuplicatedCaptions]
        );
    }

    #[test]
    fn test_standard_pipeline_order() {
        let pipeline = FilterPipeline::standard();
        assert_eq!(pipeline.len(), 5);
        let names = pipeline.names();
        assert!(names[0].ends_with("UnresolvedDependenciesFilter"));
        assert!(names[4].ends_with("OrphanedChildrenFilter"));
    }

    #[test]
    fn test_empty_pipeline() {
        assert!(FilterPipeline::empty().is_empty());
    }
}
