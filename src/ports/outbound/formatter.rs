use crate::application::read_models::SnapshotReport;
use crate::shared::Result;

/// SnapshotFormatter port for rendering snapshot reports
///
/// This port abstracts the output representation (tree text, JSON, etc.).
pub trait SnapshotFormatter {
    /// Formats a snapshot report
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, report: &SnapshotReport) -> Result<String>;
}
