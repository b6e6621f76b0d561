use super::ProjectDependenciesService;
use crate::dependency_snapshot::domain::ProviderRegistry;
use crate::dependency_snapshot::filters::FilterPipeline;
use crate::shared::Result;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::info;

/// Loaded projects and their update services.
///
/// A project's snapshot lives exactly as long as the project is loaded:
/// loading creates the empty snapshot and its single writer, unloading stops
/// the writer and drops the snapshot. Project paths are matched ignoring
/// ASCII case, like snapshot equality.
#[derive(Debug)]
pub struct ProjectRegistry {
    projects: DashMap<String, Arc<ProjectDependenciesService>>,
    filters: FilterPipeline,
    provider_registry: ProviderRegistry,
}

impl ProjectRegistry {
    pub fn new(filters: FilterPipeline, provider_registry: ProviderRegistry) -> Self {
        Self {
            projects: DashMap::new(),
            filters,
            provider_registry,
        }
    }

    /// Returns the service of a loaded project, loading it first if needed.
    pub fn load(&self, project_path: &str) -> Result<Arc<ProjectDependenciesService>> {
        let key = project_path.to_ascii_lowercase();
        if let Some(existing) = self.projects.get(&key) {
            return Ok(Arc::clone(existing.value()));
        }

        match self.projects.entry(key) {
            dashmap::mapref::entry::Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                let service = Arc::new(ProjectDependenciesService::load(
                    project_path,
                    self.filters.clone(),
                    self.provider_registry.clone(),
                )?);
                info!(project = %project_path, "project loaded");
                Ok(Arc::clone(entry.insert(service).value()))
            }
        }
    }

    pub fn get(&self, project_path: &str) -> Option<Arc<ProjectDependenciesService>> {
        self.projects
            .get(&project_path.to_ascii_lowercase())
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Stops and forgets a project. Returns false when it was not loaded.
    pub async fn unload(&self, project_path: &str) -> bool {
        let Some((_, service)) = self.projects.remove(&project_path.to_ascii_lowercase()) else {
            return false;
        };
        service.shutdown().await;
        info!(project = %project_path, "project unloaded");
        true
    }

    pub fn project_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self
            .projects
            .iter()
            .map(|entry| entry.value().project_path().to_string())
            .collect();
        paths.sort();
        paths
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}
