//! Configuration file support for depsnap.
//!
//! Provides YAML-based configuration through `depsnap.config.yml` files:
//! the filter pipeline, the known providers and replay defaults.

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

use crate::adapters::outbound::providers::ConfiguredSubTreeProvider;
use crate::dependency_snapshot::domain::ProviderRegistry;
use crate::dependency_snapshot::filters::{FilterKind, FilterPipeline};
use crate::shared::{Result, SnapshotError};

pub const CONFIG_FILENAME: &str = "depsnap.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub active_target_framework: Option<String>,
    /// Filter names in pipeline order; the standard pipeline when absent
    pub filters: Option<Vec<String>>,
    pub project_item_specs: Option<Vec<String>>,
    pub providers: Option<Vec<ProviderConfig>>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// A dependency provider known to the host.
#[derive(Debug, Deserialize)]
pub struct ProviderConfig {
    pub provider_type: String,
    pub display_name: Option<String>,
    pub implicit_icon: Option<String>,
}

impl ConfigFile {
    /// Builds the filter pipeline named by `filters`.
    pub fn filter_pipeline(&self) -> Result<FilterPipeline> {
        match &self.filters {
            None => Ok(FilterPipeline::standard()),
            Some(names) => {
                let kinds = names
                    .iter()
                    .map(|name| {
                        name.parse::<FilterKind>()
                            .map_err(|message| SnapshotError::InvalidConfig { message })
                    })
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(FilterPipeline::from_kinds(&kinds))
            }
        }
    }

    pub fn provider_registry(&self) -> ProviderRegistry {
        self.providers
            .iter()
            .flatten()
            .fold(ProviderRegistry::new(), |registry, config| {
                let mut provider = ConfiguredSubTreeProvider::new(config.provider_type.trim());
                if let Some(display_name) = &config.display_name {
                    provider = provider.with_display_name(display_name);
                }
                if let Some(icon) = &config.implicit_icon {
                    provider = provider.with_implicit_icon(icon);
                }
                registry.with_provider(Arc::new(provider))
            })
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.is_file() {
        return Ok(None);
    }

    load_config_from_path(&config_path).map(Some)
}

fn validate_config(config: &ConfigFile) -> Result<()> {
    config.filter_pipeline()?;

    for (i, provider) in config.providers.iter().flatten().enumerate() {
        if provider.provider_type.trim().is_empty() {
            return Err(SnapshotError::InvalidConfig {
                message: format!(
                    "providers[{}].provider_type must not be empty.\n\n\
                     💡 Hint: Each provider entry needs the type tag its dependencies carry (e.g., \"NuGetDependency\").",
                    i
                ),
            }
            .into());
        }
    }
    Ok(())
}

fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        warn!(field = %key, "unknown config field will be ignored");
    }
}
