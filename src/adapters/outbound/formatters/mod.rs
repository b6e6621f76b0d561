/// Formatter adapters for the snapshot report output formats
mod json_formatter;
mod tree_formatter;

pub use json_formatter::JsonFormatter;
pub use tree_formatter::TreeFormatter;
