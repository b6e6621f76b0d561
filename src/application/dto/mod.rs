/// Data Transfer Objects for application layer
///
/// DTOs carry data between the application layer and adapters, keeping the
/// snapshot engine isolated from file formats and command-line options.
mod change_log;
mod output_format;
mod replay_request;
mod replay_response;

pub use change_log::{ChangeBatch, ChangeLog, ChangeSetDto};
pub use output_format::OutputFormat;
pub use replay_request::ReplayRequest;
pub use replay_response::{ReplayResponse, ReplayStatistics};
