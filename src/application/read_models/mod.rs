//! Read models for CQRS-lite pattern
//!
//! View-optimized structs that give formatters a denormalized
//! representation of a dependency snapshot.

pub mod snapshot_report;
pub mod snapshot_report_builder;
pub mod target_view;

pub use snapshot_report::{ReportMetadataView, ReportSummaryView, SnapshotReport};
pub use snapshot_report_builder::SnapshotReportBuilder;
pub use target_view::{DependencyNodeView, TargetView};
