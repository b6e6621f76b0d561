use depsnap::prelude::*;
use std::path::Path;

/// Mock ChangeLogReader that parses a JSON document held in memory
pub struct MockChangeLogReader {
    content: String,
    should_fail: bool,
}

impl MockChangeLogReader {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            should_fail: false,
        }
    }

    pub fn with_failure() -> Self {
        Self {
            content: String::new(),
            should_fail: true,
        }
    }
}

impl ChangeLogReader for MockChangeLogReader {
    fn read_change_log(&self, path: &Path) -> Result<ChangeLog> {
        if self.should_fail {
            return Err(SnapshotError::ChangeLogNotFound {
                path: path.to_path_buf(),
                suggestion: "Mock failure".to_string(),
            }
            .into());
        }
        Ok(serde_json::from_str(&self.content)?)
    }
}
