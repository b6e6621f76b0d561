//! depsnap - incrementally updated dependency snapshots
//!
//! This library maintains immutable snapshots of a project's dependency tree,
//! one per target framework. Every batch of provider changes produces a new
//! snapshot that shares unchanged data with its predecessor, or hands back the
//! previous snapshot itself when nothing changed, so readers never observe a
//! half-applied update.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`dependency_snapshot`): snapshots, the filter pipeline and graph services
//! - **Application Layer** (`application`): the single-writer update service and the replay use case
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use depsnap::prelude::*;
//! use std::path::PathBuf;
//!
//! # async fn run() -> Result<()> {
//! let use_case = ReplayChangesUseCase::new(
//!     FileSystemReader::new(),
//!     StderrProgressReporter::new(),
//!     FilterPipeline::standard(),
//!     ProviderRegistry::new(),
//! );
//!
//! let response = use_case
//!     .execute(ReplayRequest::new(PathBuf::from("changes.json")))
//!     .await?;
//!
//! let report = SnapshotReportBuilder::build(&response.snapshot, &response.statistics);
//! println!("{}", TreeFormatter::new().format(&report)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod dependency_snapshot;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, TreeFormatter};
    pub use crate::adapters::outbound::providers::ConfiguredSubTreeProvider;
    pub use crate::application::dto::{
        ChangeBatch, ChangeLog, ChangeSetDto, OutputFormat, ReplayRequest, ReplayResponse,
        ReplayStatistics,
    };
    pub use crate::application::read_models::{SnapshotReport, SnapshotReportBuilder};
    pub use crate::application::services::{
        ProjectDependenciesService, ProjectRegistry, SnapshotUpdate, UpdateOutcome,
    };
    pub use crate::application::use_cases::ReplayChangesUseCase;
    pub use crate::dependency_snapshot::domain::{
        Catalogs, DependenciesSnapshot, Dependency, DependencyChangeSet, DependencyModel,
        ProjectItemSpecs, ProviderRegistry, SubTreeProvider, TargetFramework,
        TargetedDependenciesSnapshot, TargetedSnapshots,
    };
    pub use crate::dependency_snapshot::filters::{
        AddDecision, AddDependencyContext, DependenciesSnapshotFilter, FilterContext, FilterKind,
        FilterPipeline, RemoveDecision, RemoveDependencyContext,
    };
    pub use crate::dependency_snapshot::services::{
        DependencyTreeWalker, TargetFrameworkInterner,
    };
    pub use crate::ports::inbound::SnapshotReplayPort;
    pub use crate::ports::outbound::{
        ChangeLogReader, OutputPresenter, ProgressReporter, SnapshotFormatter,
    };
    pub use crate::shared::{Result, SnapshotError};
}
