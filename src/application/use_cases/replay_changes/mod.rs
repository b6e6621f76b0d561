use crate::application::dto::{ChangeLog, ReplayRequest, ReplayResponse, ReplayStatistics};
use crate::application::services::{ProjectDependenciesService, SnapshotUpdate};
use crate::dependency_snapshot::domain::{ProjectItemSpecs, ProviderRegistry};
use crate::dependency_snapshot::filters::FilterPipeline;
use crate::dependency_snapshot::services::TargetFrameworkInterner;
use crate::ports::inbound::SnapshotReplayPort;
use crate::ports::outbound::{ChangeLogReader, ProgressReporter};
use crate::shared::{Result, SnapshotError};
use anyhow::Context;
use std::future::Future;
use std::path::Path;
use tracing::debug;

/// ReplayChangesUseCase - Folds a recorded change log into a project snapshot
///
/// Batches go through a [`ProjectDependenciesService`], the same single
/// writer a live host would use, so the replay observes exactly the
/// snapshots a live session would publish.
///
/// # Type Parameters
/// * `CLR` - ChangeLogReader implementation
/// * `PR` - ProgressReporter implementation
pub struct ReplayChangesUseCase<CLR, PR> {
    change_log_reader: CLR,
    progress_reporter: PR,
    filters: FilterPipeline,
    provider_registry: ProviderRegistry,
    interner: TargetFrameworkInterner,
}

impl<CLR, PR> ReplayChangesUseCase<CLR, PR>
where
    CLR: ChangeLogReader,
    PR: ProgressReporter,
{
    pub fn new(
        change_log_reader: CLR,
        progress_reporter: PR,
        filters: FilterPipeline,
        provider_registry: ProviderRegistry,
    ) -> Self {
        Self {
            change_log_reader,
            progress_reporter,
            filters,
            provider_registry,
            interner: TargetFrameworkInterner::new(),
        }
    }

    /// Shares an interner with other components
    pub fn with_interner(mut self, interner: TargetFrameworkInterner) -> Self {
        self.interner = interner;
        self
    }

    /// Executes the replay
    pub async fn execute(&self, request: ReplayRequest) -> Result<ReplayResponse> {
        // Step 1: Read the change log
        let change_log = self.read_and_report_change_log(&request)?;

        // Step 2: Start the single writer for the project
        let project_path = Self::resolve_project_path(&request, &change_log);
        let service = ProjectDependenciesService::load(
            &project_path,
            self.filters.clone(),
            self.provider_registry.clone(),
        )?;

        // Step 3: Fold every batch in order
        let result = self.fold_batches(&service, &request, change_log).await;
        service.shutdown().await;
        let statistics = result?;

        self.progress_reporter.report_completion(&format!(
            "✅ Replayed {} batch(es): {} snapshot(s) published, {} unchanged",
            statistics.batches, statistics.published, statistics.unchanged
        ));

        Ok(ReplayResponse::new(service.current(), statistics))
    }

    fn read_and_report_change_log(&self, request: &ReplayRequest) -> Result<ChangeLog> {
        self.progress_reporter.report(&format!(
            "📖 Loading change log from: {}",
            request.change_log_path.display()
        ));

        let change_log = self
            .change_log_reader
            .read_change_log(&request.change_log_path)?;

        self.progress_reporter
            .report(&format!("✅ Detected {} batch(es)", change_log.batches.len()));

        Ok(change_log)
    }

    /// Command line first, then the change log, then the change log's file stem.
    fn resolve_project_path(request: &ReplayRequest, change_log: &ChangeLog) -> String {
        request
            .project_path
            .clone()
            .or_else(|| change_log.project_path.clone())
            .unwrap_or_else(|| {
                request
                    .change_log_path
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_default()
            })
    }

    async fn fold_batches(
        &self,
        service: &ProjectDependenciesService,
        request: &ReplayRequest,
        change_log: ChangeLog,
    ) -> Result<ReplayStatistics> {
        let mut statistics = ReplayStatistics::default();
        let total = change_log.batches.len();
        let default_item_specs = request.project_item_specs.as_ref().map(ProjectItemSpecs::new);

        for (index, batch) in change_log.batches.into_iter().enumerate() {
            let mut update = batch.into_update(&self.interner);
            if update.project_item_specs.is_none() {
                update.project_item_specs = default_item_specs.clone();
            }

            let outcome = service
                .apply(update)
                .await
                .with_context(|| format!("Failed to apply batch {}", index + 1))?;
            statistics.record(outcome.changed);
            debug!(batch = index + 1, changed = outcome.changed, "batch applied");

            self.progress_reporter
                .report_progress(index + 1, total, Some("Applying change batches..."));
        }

        if let Some(moniker) = &request.active_target_framework {
            let update = SnapshotUpdate::default()
                .with_active_target_framework(self.interner.get_or_create(moniker));
            service.apply(update).await?;
        }

        Ok(statistics)
    }
}

impl<CLR, PR> SnapshotReplayPort for ReplayChangesUseCase<CLR, PR>
where
    CLR: ChangeLogReader,
    PR: ProgressReporter,
{
    fn replay(&self, request: ReplayRequest) -> impl Future<Output = Result<ReplayResponse>> {
        self.execute(request)
    }

    fn validate_change_log_path(&self, path: &Path) -> Result<()> {
        if !path.is_file() {
            return Err(SnapshotError::ChangeLogNotFound {
                path: path.to_path_buf(),
                suggestion: "Pass the path of a JSON, YAML or TOML change log".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
