use std::path::PathBuf;

/// ReplayRequest - Internal request DTO for the change log replay use case
#[derive(Debug, Clone)]
pub struct ReplayRequest {
    /// Path to the change log file
    pub change_log_path: PathBuf,
    /// Project path overriding the one recorded in the change log
    pub project_path: Option<String>,
    /// Active target framework applied after the last batch
    pub active_target_framework: Option<String>,
    /// Project item specs used by batches that carry none
    pub project_item_specs: Option<Vec<String>>,
}

impl ReplayRequest {
    pub fn new(change_log_path: PathBuf) -> Self {
        Self {
            change_log_path,
            project_path: None,
            active_target_framework: None,
            project_item_specs: None,
        }
    }

    pub fn with_project_path(mut self, project_path: Option<String>) -> Self {
        self.project_path = project_path;
        self
    }

    pub fn with_active_target_framework(mut self, moniker: Option<String>) -> Self {
        self.active_target_framework = moniker;
        self
    }

    pub fn with_project_item_specs(mut self, specs: Option<Vec<String>>) -> Self {
        self.project_item_specs = specs;
        self
    }
}
