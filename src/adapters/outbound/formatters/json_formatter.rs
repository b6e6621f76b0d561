use crate::application::read_models::SnapshotReport;
use crate::ports::outbound::SnapshotFormatter;
use crate::shared::Result;

/// JsonFormatter adapter rendering the report as pretty-printed JSON
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotFormatter for JsonFormatter {
    fn format(&self, report: &SnapshotReport) -> Result<String> {
        serde_json::to_string_pretty(report)
            .map_err(|e| anyhow::anyhow!("Failed to serialize snapshot report: {}", e))
    }
}
