use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow scripts to distinguish between usage mistakes
/// and failures while replaying a change log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the change log was replayed and the snapshot presented
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (missing file, parse error, invalid configuration, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Errors surfaced by the snapshot engine and its host.
///
/// `InvalidArgument` is the only category the snapshot core raises and always
/// signals a caller contract violation. The remaining variants belong to the
/// replay host (file access, parsing, configuration).
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error("Change log not found: {path}\n\n💡 Hint: {suggestion}")]
    ChangeLogNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to parse change log: {path}\nDetails: {details}\n\n💡 Hint: Change logs must be JSON, YAML or TOML documents with a top-level 'batches' list")]
    ChangeLogParseError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid config: {message}")]
    InvalidConfig { message: String },
}

impl SnapshotError {
    pub(crate) fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        SnapshotError::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}
