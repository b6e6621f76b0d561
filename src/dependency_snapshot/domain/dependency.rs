use super::TargetFramework;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn default_visible() -> bool {
    true
}

/// Raw dependency descriptor reported by a provider, before filtering.
///
/// Deserializable so change logs can be replayed from JSON, YAML or TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyModel {
    pub id: String,
    #[serde(alias = "provider_type")]
    pub provider_type: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default, alias = "original_item_spec")]
    pub original_item_spec: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub resolved: bool,
    #[serde(default, alias = "top_level")]
    pub top_level: bool,
    #[serde(default)]
    pub implicit: bool,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default, alias = "dependency_ids")]
    pub dependency_ids: Vec<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    #[serde(default)]
    pub icon: Option<String>,
}

impl DependencyModel {
    pub fn new(id: impl Into<String>, provider_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            provider_type: provider_type.into(),
            caption: String::new(),
            original_item_spec: String::new(),
            path: String::new(),
            resolved: false,
            top_level: false,
            implicit: false,
            visible: true,
            dependency_ids: Vec::new(),
            properties: BTreeMap::new(),
            icon: None,
        }
    }

    pub fn resolved(mut self, resolved: bool) -> Self {
        self.resolved = resolved;
        self
    }

    pub fn top_level(mut self, top_level: bool) -> Self {
        self.top_level = top_level;
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn implicit(mut self, implicit: bool) -> Self {
        self.implicit = implicit;
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }

    pub fn with_original_item_spec(mut self, spec: impl Into<String>) -> Self {
        self.original_item_spec = spec.into();
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_dependency_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependency_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// Immutable node of one target framework's dependency world.
///
/// Children are referenced by id and resolved through the owning
/// [`TargetedDependenciesSnapshot`](super::TargetedDependenciesSnapshot), never
/// by pointer, so shared sub-dependencies (diamonds) need no shared ownership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    id: String,
    target_framework: TargetFramework,
    provider_type: String,
    caption: String,
    original_item_spec: String,
    path: String,
    resolved: bool,
    top_level: bool,
    implicit: bool,
    visible: bool,
    child_ids: Vec<String>,
    properties: BTreeMap<String, String>,
    icon: Option<String>,
}

impl Dependency {
    /// Builds a node from a provider model. Empty captions and item specs
    /// fall back to the id.
    pub fn from_model(model: DependencyModel, target_framework: TargetFramework) -> Self {
        let caption = if model.caption.is_empty() {
            model.id.clone()
        } else {
            model.caption
        };
        let original_item_spec = if model.original_item_spec.is_empty() {
            model.id.clone()
        } else {
            model.original_item_spec
        };

        Self {
            id: model.id,
            target_framework,
            provider_type: model.provider_type,
            caption,
            original_item_spec,
            path: model.path,
            resolved: model.resolved,
            top_level: model.top_level,
            implicit: model.implicit,
            visible: model.visible,
            child_ids: model.dependency_ids,
            properties: model.properties,
            icon: model.icon,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn target_framework(&self) -> &TargetFramework {
        &self.target_framework
    }

    pub fn provider_type(&self) -> &str {
        &self.provider_type
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn original_item_spec(&self) -> &str {
        &self.original_item_spec
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    pub fn is_top_level(&self) -> bool {
        self.top_level
    }

    pub fn is_implicit(&self) -> bool {
        self.implicit
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn child_ids(&self) -> &[String] {
        &self.child_ids
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Top-level identity: matches the id, or the full path when one is set,
    /// ignoring case.
    pub fn top_level_id_equals(&self, id: &str) -> bool {
        self.id.eq_ignore_ascii_case(id) || (!self.path.is_empty() && self.path.eq_ignore_ascii_case(id))
    }

    pub fn with_resolved(mut self, resolved: bool) -> Self {
        self.resolved = resolved;
        self
    }

    pub fn with_implicit(mut self, implicit: bool) -> Self {
        self.implicit = implicit;
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }

    pub fn with_icon(mut self, icon: Option<String>) -> Self {
        self.icon = icon;
        self
    }

    pub fn with_child_ids(mut self, child_ids: Vec<String>) -> Self {
        self.child_ids = child_ids;
        self
    }
}
