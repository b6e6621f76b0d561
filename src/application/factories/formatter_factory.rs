use crate::adapters::outbound::formatters::{JsonFormatter, TreeFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::SnapshotFormatter;

/// Factory for creating snapshot formatters
///
/// Selects the formatter adapter for an output format. Lives in the
/// application layer because it wires infrastructure to application needs.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter for `format`; `colored` only affects the tree format
    pub fn create(format: OutputFormat, colored: bool) -> Box<dyn SnapshotFormatter> {
        match format {
            OutputFormat::Tree => Box::new(TreeFormatter::with_colors(colored)),
            OutputFormat::Json => Box::new(JsonFormatter::new()),
        }
    }

    /// Returns the progress message for the specified output format
    ///
    /// # Examples
    /// ```
    /// use depsnap::application::dto::OutputFormat;
    /// use depsnap::application::factories::FormatterFactory;
    ///
    /// let message = FormatterFactory::progress_message(OutputFormat::Json);
    /// assert_eq!(message, "📝 Generating JSON report...");
    /// ```
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Tree => "📝 Generating dependency tree...",
            OutputFormat::Json => "📝 Generating JSON report...",
        }
    }
}
