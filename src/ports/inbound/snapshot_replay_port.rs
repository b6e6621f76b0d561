use crate::application::dto::{ReplayRequest, ReplayResponse};
use crate::shared::Result;
use std::future::Future;
use std::path::Path;

/// SnapshotReplayPort - Inbound port for replaying recorded change logs
///
/// This is the interface the CLI drives: fold every batch of a change log
/// into a project snapshot and hand back the final snapshot.
pub trait SnapshotReplayPort {
    /// Replays every batch of the requested change log, in order
    ///
    /// # Errors
    /// Returns an error if:
    /// - The change log cannot be read or parsed
    /// - The resolved project path is empty
    fn replay(&self, request: ReplayRequest) -> impl Future<Output = Result<ReplayResponse>>;

    /// Checks that a change log path points at an existing file
    fn validate_change_log_path(&self, path: &Path) -> Result<()>;
}
