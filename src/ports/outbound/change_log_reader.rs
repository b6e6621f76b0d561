use crate::application::dto::ChangeLog;
use crate::shared::Result;
use std::path::Path;

/// ChangeLogReader port for loading recorded provider change batches
///
/// This port abstracts where change logs come from and which document
/// format they use.
pub trait ChangeLogReader {
    /// Reads and parses the change log at `path`
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file does not exist or is not a regular file
    /// - The file cannot be read due to permissions or I/O errors
    /// - The content is not a valid change log document
    fn read_change_log(&self, path: &Path) -> Result<ChangeLog>;
}
