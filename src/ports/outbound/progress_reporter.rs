/// ProgressReporter port for reporting replay progress
///
/// Progress goes to a side channel (e.g. stderr) so it never mixes with
/// the presented report.
pub trait ProgressReporter {
    fn report(&self, message: &str);

    /// Reports progress through a known number of steps
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    fn report_completion(&self, message: &str);
}
