//! Snapshot report read model
//!
//! The main read model: a denormalized, presentation-ready view of a
//! dependency snapshot plus the statistics of the replay that produced it.

use super::target_view::TargetView;
use serde::Serialize;

/// Read model rendered by the snapshot formatters
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotReport {
    pub metadata: ReportMetadataView,
    pub summary: ReportSummaryView,
    /// One entry per target framework, in moniker order
    pub targets: Vec<TargetView>,
}

/// View representation of report metadata
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadataView {
    /// RFC 3339 timestamp of report creation
    pub timestamp: String,
    pub tool_name: String,
    pub tool_version: String,
    pub project_path: String,
    pub active_target_framework: String,
}

/// Aggregate counters over the whole snapshot
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummaryView {
    pub target_frameworks: usize,
    pub dependencies: usize,
    pub has_unresolved_dependency: bool,
    pub has_visible_unresolved_dependency: bool,
    pub batches: usize,
    pub published_snapshots: usize,
    pub unchanged_batches: usize,
}
