use super::SnapshotUpdate;
use crate::dependency_snapshot::domain::{DependenciesSnapshot, ProviderRegistry};
use crate::dependency_snapshot::filters::FilterPipeline;
use crate::shared::Result;
use anyhow::anyhow;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, warn};

/// Maximum number of batches waiting for the update loop
const UPDATE_QUEUE_CAPACITY: usize = 64;

/// Result of one applied batch
#[derive(Debug, Clone)]
pub struct UpdateOutcome {
    pub snapshot: Arc<DependenciesSnapshot>,
    /// False when the batch left the previous snapshot in place
    pub changed: bool,
}

enum Command {
    Apply {
        update: SnapshotUpdate,
        reply: oneshot::Sender<Result<UpdateOutcome>>,
    },
    Shutdown {
        reply: oneshot::Sender<()>,
    },
}

/// Single writer for one project's dependency snapshot.
///
/// Batches are queued on a channel and folded one at a time by a background
/// task, so every update starts from the snapshot produced by the previous
/// one. Readers never wait on the writer: they take the latest published
/// snapshot, or subscribe to be notified when a new one is published.
/// Batches that leave the snapshot unchanged publish nothing.
///
/// Must be created inside a tokio runtime.
#[derive(Debug)]
pub struct ProjectDependenciesService {
    project_path: String,
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<Arc<DependenciesSnapshot>>,
}

impl ProjectDependenciesService {
    /// Starts a service for a freshly loaded project.
    pub fn load(
        project_path: &str,
        filters: FilterPipeline,
        provider_registry: ProviderRegistry,
    ) -> Result<Self> {
        let snapshot = DependenciesSnapshot::create_empty(project_path)?;
        Ok(Self::spawn(snapshot, filters, provider_registry))
    }

    /// Starts a service that continues from an existing snapshot.
    pub fn spawn(
        initial: Arc<DependenciesSnapshot>,
        filters: FilterPipeline,
        provider_registry: ProviderRegistry,
    ) -> Self {
        let project_path = initial.project_path().to_string();
        let (commands, receiver) = mpsc::channel(UPDATE_QUEUE_CAPACITY);
        let (publisher, snapshots) = watch::channel(initial);

        tokio::spawn(run_update_loop(receiver, publisher, filters, provider_registry));
        debug!(project = %project_path, "update service started");

        Self {
            project_path,
            commands,
            snapshots,
        }
    }

    pub fn project_path(&self) -> &str {
        &self.project_path
    }

    /// Latest published snapshot
    pub fn current(&self) -> Arc<DependenciesSnapshot> {
        Arc::clone(&self.snapshots.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<DependenciesSnapshot>> {
        self.snapshots.clone()
    }

    /// Queues a batch and waits until it has been folded.
    pub async fn apply(&self, update: SnapshotUpdate) -> Result<UpdateOutcome> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Command::Apply { update, reply })
            .await
            .map_err(|_| self.stopped())?;
        response.await.map_err(|_| self.stopped())?
    }

    /// Stops the update loop after every batch queued before this call.
    ///
    /// Later calls to [`apply`](Self::apply) fail. Calling it twice is harmless.
    pub async fn shutdown(&self) {
        let (reply, done) = oneshot::channel();
        if self.commands.send(Command::Shutdown { reply }).await.is_ok() {
            let _ = done.await;
        }
        debug!(project = %self.project_path, "update service stopped");
    }

    pub fn is_running(&self) -> bool {
        !self.commands.is_closed()
    }

    fn stopped(&self) -> anyhow::Error {
        anyhow!("Update service for '{}' has stopped", self.project_path)
    }
}

async fn run_update_loop(
    mut commands: mpsc::Receiver<Command>,
    publisher: watch::Sender<Arc<DependenciesSnapshot>>,
    filters: FilterPipeline,
    provider_registry: ProviderRegistry,
) {
    while let Some(command) = commands.recv().await {
        match command {
            Command::Apply { update, reply } => {
                let outcome = fold(&publisher, update, &filters, &provider_registry);
                if reply.send(outcome).is_err() {
                    warn!("update applied but the caller went away before the reply");
                }
            }
            Command::Shutdown { reply } => {
                commands.close();
                let _ = reply.send(());
                break;
            }
        }
    }
}

fn fold(
    publisher: &watch::Sender<Arc<DependenciesSnapshot>>,
    update: SnapshotUpdate,
    filters: &FilterPipeline,
    provider_registry: &ProviderRegistry,
) -> Result<UpdateOutcome> {
    let previous = Arc::clone(&publisher.borrow());
    let project_path = update
        .project_path
        .as_deref()
        .unwrap_or_else(|| previous.project_path());

    let snapshot = DependenciesSnapshot::from_changes(
        project_path,
        &previous,
        &update.changes,
        &update.catalogs,
        update.active_target_framework.clone(),
        filters,
        provider_registry,
        update.project_item_specs.as_ref(),
    )?;

    let changed = !Arc::ptr_eq(&previous, &snapshot);
    if changed {
        publisher.send_replace(Arc::clone(&snapshot));
    }

    Ok(UpdateOutcome { snapshot, changed })
}
