//! Per-target-framework views of a snapshot

use serde::Serialize;

/// Dependency tree of one target framework
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetView {
    pub target_framework: String,
    pub is_active: bool,
    pub dependency_count: usize,
    pub has_unresolved_dependency: bool,
    pub has_reachable_visible_unresolved_dependency: bool,
    /// Top-level dependencies with their expanded children
    pub dependencies: Vec<DependencyNodeView>,
}

/// One node of the expanded dependency tree
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyNodeView {
    pub id: String,
    pub caption: String,
    pub provider_type: String,
    pub resolved: bool,
    pub implicit: bool,
    pub visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Set when the node already appears among its own ancestors; its
    /// children are not expanded again
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub cycle: bool,
    /// Set when the node's subtree was already expanded elsewhere in this
    /// target; its children are listed only at the first occurrence
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub shared: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DependencyNodeView>,
}
