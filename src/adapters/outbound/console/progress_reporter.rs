use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::cell::RefCell;

const BAR_TEMPLATE: &str = "   {spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) - {msg}";

/// StderrProgressReporter adapter for reporting replay progress to stderr
///
/// Writes to stderr so progress never mixes with a report printed on stdout.
/// A quiet reporter swallows everything except errors.
pub struct StderrProgressReporter {
    progress_bar: RefCell<Option<ProgressBar>>,
    quiet: bool,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            progress_bar: RefCell::new(None),
            quiet: false,
        }
    }

    pub fn quiet() -> Self {
        Self {
            progress_bar: RefCell::new(None),
            quiet: true,
        }
    }

    fn get_or_create_progress_bar(&self, total: usize) -> ProgressBar {
        let mut slot = self.progress_bar.borrow_mut();
        if let Some(progress_bar) = slot.as_ref() {
            return progress_bar.clone();
        }

        let progress_bar = ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::stderr());
        if let Ok(style) = ProgressStyle::default_bar().template(BAR_TEMPLATE) {
            progress_bar.set_style(style.progress_chars("=>-"));
        }
        *slot = Some(progress_bar.clone());
        progress_bar
    }

    fn finish_progress_bar(&self) {
        if let Some(progress_bar) = self.progress_bar.borrow_mut().take() {
            progress_bar.finish_and_clear();
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        if !self.quiet {
            eprintln!("{}", message);
        }
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        if self.quiet {
            return;
        }
        let progress_bar = self.get_or_create_progress_bar(total);
        progress_bar.set_position(current as u64);
        if let Some(message) = message {
            progress_bar.set_message(message.to_string());
        }
    }

    fn report_error(&self, message: &str) {
        self.finish_progress_bar();
        eprintln!("{}", message);
    }

    fn report_completion(&self, message: &str) {
        self.finish_progress_bar();
        if !self.quiet {
            eprintln!("{}", message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_reporter_lifecycle() {
        let reporter = StderrProgressReporter::new();
        reporter.report("Test message");
        reporter.report_progress(1, 2, Some("test"));
        assert!(reporter.progress_bar.borrow().is_some());
        reporter.report_progress(2, 2, None);
        reporter.report_completion("Test completion");
        assert!(reporter.progress_bar.borrow().is_none());
    }

    #[test]
    fn test_quiet_reporter_creates_no_progress_bar() {
        let reporter = StderrProgressReporter::quiet();
        reporter.report_progress(1, 2, Some("test"));
        assert!(reporter.progress_bar.borrow().is_none());
        reporter.report_error("still shown");
    }
}
