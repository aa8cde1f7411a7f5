//! Progress bar implementation for CLI operations.

use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use zipvault_core::ProgressSink;

/// CLI progress bar wrapper implementing `ProgressSink`.
///
/// Displays an entry-count bar while an archive is being written and
/// cleans up after itself on drop.
pub struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    /// Creates a new CLI progress bar.
    ///
    /// The total entry count is learned from the first callback, so the
    /// bar starts out indeterminate.
    #[must_use]
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} entries")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        bar.set_message(message.to_string());
        Self { bar }
    }

    /// Checks if we should show progress (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stdout().is_term()
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressSink for CliProgress {
    fn on_entry_start(&mut self, _name: &str, _current: usize, total: usize) {
        if self.bar.length().unwrap_or(0) == 0 {
            self.bar.set_length(total as u64);
        }
    }

    fn on_entry_complete(&mut self, _name: &str) {
        self.bar.inc(1);
    }

    fn on_complete(&mut self) {
        self.bar.finish_and_clear();
    }
}
