use super::{
    AddDecision, AddDependencyContext, DependenciesSnapshotFilter, FilterContext, RemoveDecision,
    RemoveDependencyContext,
};
use crate::dependency_snapshot::domain::Dependency;

/// Provider-type tag of SDK references
pub const SDK_PROVIDER_TYPE: &str = "SdkDependency";

/// Provider-type tag of package references
pub const PACKAGE_PROVIDER_TYPE: &str = "NuGetDependency";

/// Ties an SDK reference to the package that implements it.
///
/// An SDK names its package through its original item spec. The SDK is
/// resolved, and shows the package's children, exactly while that package is
/// resolved in the same world.
#[derive(Debug, Default, Clone, Copy)]
pub struct SdkAndPackagesFilter;

impl SdkAndPackagesFilter {
    pub fn new() -> Self {
        Self
    }

    fn sdks_for_package(context: &FilterContext<'_>, package_id: &str) -> Vec<Dependency> {
        context
            .world()
            .values()
            .filter(|candidate| {
                candidate.provider_type() == SDK_PROVIDER_TYPE
                    && candidate.original_item_spec().eq_ignore_ascii_case(package_id)
            })
            .map(|sdk| sdk.as_ref().clone())
            .collect()
    }
}

impl DependenciesSnapshotFilter for SdkAndPackagesFilter {
    fn name(&self) -> &'static str {
        "SdkAndPackagesFilter"
    }

    fn before_add_or_update(
        &self,
        dependency: Dependency,
        context: &mut AddDependencyContext<'_>,
    ) -> AddDecision {
        match dependency.provider_type() {
            SDK_PROVIDER_TYPE => {
                let package = context
                    .get(dependency.original_item_spec())
                    .filter(|package| {
                        package.provider_type() == PACKAGE_PROVIDER_TYPE && package.is_resolved()
                    })
                    .map(|package| package.child_ids().to_vec());

                match package {
                    Some(child_ids) => {
                        AddDecision::Accept(dependency.with_resolved(true).with_child_ids(child_ids))
                    }
                    None => AddDecision::Accept(dependency),
                }
            }
            PACKAGE_PROVIDER_TYPE if dependency.is_resolved() => {
                for sdk in Self::sdks_for_package(context, dependency.id()) {
                    context.add_or_update(
                        sdk.with_resolved(true)
                            .with_child_ids(dependency.child_ids().to_vec()),
                    );
                }
                AddDecision::Accept(dependency)
            }
            _ => AddDecision::Accept(dependency),
        }
    }

    fn before_remove(
        &self,
        dependency: &Dependency,
        context: &mut RemoveDependencyContext<'_>,
    ) -> RemoveDecision {
        if dependency.provider_type() == PACKAGE_PROVIDER_TYPE {
            for sdk in Self::sdks_for_package(context, dependency.id()) {
                context.add_or_update(sdk.with_resolved(false).with_child_ids(Vec::new()));
            }
        }

        RemoveDecision::Accept
    }
}
