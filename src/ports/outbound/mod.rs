/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, console, providers).
pub mod change_log_reader;
pub mod formatter;
pub mod output_presenter;
pub mod progress_reporter;

pub use crate::dependency_snapshot::domain::SubTreeProvider;
pub use change_log_reader::ChangeLogReader;
pub use formatter::SnapshotFormatter;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
