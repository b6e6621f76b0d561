use crate::application::dto::ChangeLog;
use crate::ports::outbound::ChangeLogReader;
use crate::shared::error::SnapshotError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum file size for security (100 MB)
const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Document formats a change log may be written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentFormat {
    Json,
    Yaml,
    Toml,
}

impl DocumentFormat {
    /// Picks the format from the file extension; JSON when unknown
    fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|extension| extension.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml") | Some("yml") => DocumentFormat::Yaml,
            Some("toml") => DocumentFormat::Toml,
            _ => DocumentFormat::Json,
        }
    }
}

/// FileSystemReader adapter for reading change logs from the file system
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystemReader {
    /// Safely read a file with security checks:
    /// - Reject symbolic links
    /// - Check file size limits
    /// - Validate file is a regular file
    fn safe_read_file(&self, path: &Path) -> Result<String> {
        let metadata = fs::symlink_metadata(path)
            .map_err(|e| anyhow::anyhow!("Failed to read change log metadata: {}", e))?;

        if metadata.is_symlink() {
            anyhow::bail!(
                "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
                path.display()
            );
        }

        if !metadata.is_file() {
            anyhow::bail!("{} is not a regular file", path.display());
        }

        let file_size = metadata.len();
        if file_size > MAX_FILE_SIZE {
            anyhow::bail!(
                "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
                path.display(),
                file_size,
                MAX_FILE_SIZE
            );
        }

        fs::read_to_string(path).map_err(|e| anyhow::anyhow!("Failed to read change log: {}", e))
    }

    fn parse(content: &str, format: DocumentFormat) -> std::result::Result<ChangeLog, String> {
        match format {
            DocumentFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            DocumentFormat::Yaml => serde_yaml_ng::from_str(content).map_err(|e| e.to_string()),
            DocumentFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        }
    }
}

impl ChangeLogReader for FileSystemReader {
    fn read_change_log(&self, path: &Path) -> Result<ChangeLog> {
        if !path.exists() {
            return Err(SnapshotError::ChangeLogNotFound {
                path: path.to_path_buf(),
                suggestion: format!(
                    "Change log \"{}\" does not exist.\n   \
                     Please check the path, or record a change log with a top-level 'batches' list.",
                    path.display()
                ),
            }
            .into());
        }

        let content = self
            .safe_read_file(path)
            .map_err(|e| SnapshotError::ChangeLogParseError {
                path: path.to_path_buf(),
                details: e.to_string(),
            })?;

        Self::parse(&content, DocumentFormat::from_path(path)).map_err(|details| {
            SnapshotError::ChangeLogParseError {
                path: path.to_path_buf(),
                details,
            }
            .into()
        })
    }
}
