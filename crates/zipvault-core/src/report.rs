//! Operation reporting and progress callbacks.

use std::time::Duration;

/// Report of an archive write operation.
#[derive(Debug, Clone, Default)]
pub struct WriteReport {
    /// Number of file entries written.
    pub files_added: usize,

    /// Number of directory markers written.
    pub directories_added: usize,

    /// Plaintext bytes read from the source tree.
    pub bytes_read: u64,

    /// Size of the finished archive file on disk.
    pub archive_size: u64,

    /// Duration of the write operation.
    pub duration: Duration,
}

/// Report of an archive self-verification pass.
#[derive(Debug, Clone, Default)]
pub struct VerifyReport {
    /// Number of file entries whose tags and checksums were validated.
    pub entries_checked: usize,

    /// Decrypted, decompressed bytes validated.
    pub bytes_checked: u64,

    /// Duration of the verification pass.
    pub duration: Duration,
}

/// Report of an archive extraction.
#[derive(Debug, Clone, Default)]
pub struct ExtractReport {
    /// Number of files written to the destination.
    pub files_extracted: usize,

    /// Number of directories created, including empty ones.
    pub directories_created: usize,

    /// Plaintext bytes written to disk.
    pub bytes_written: u64,

    /// Duration of the extraction.
    pub duration: Duration,
}

impl ExtractReport {
    /// Returns total number of items recreated at the destination.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.files_extracted + self.directories_created
    }
}

/// Callback trait for entry-level progress during archive writing.
///
/// All methods have empty defaults, so implementations override only what
/// they display.
///
/// # Examples
///
/// ```
/// use zipvault_core::ProgressSink;
///
/// struct Counter(usize);
///
/// impl ProgressSink for Counter {
///     fn on_entry_complete(&mut self, _name: &str) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait ProgressSink {
    /// Called before an entry is processed.
    fn on_entry_start(&mut self, name: &str, current: usize, total: usize) {
        let _ = (name, current, total);
    }

    /// Called after an entry has been written.
    fn on_entry_complete(&mut self, name: &str) {
        let _ = name;
    }

    /// Called once when the whole operation finishes.
    fn on_complete(&mut self) {}
}

/// Progress sink that discards all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_report_total_items() {
        let report = ExtractReport {
            files_extracted: 3,
            directories_created: 2,
            ..Default::default()
        };
        assert_eq!(report.total_items(), 5);
    }

    #[test]
    fn test_noop_progress_accepts_events() {
        let mut sink = NoopProgress;
        sink.on_entry_start("a.txt", 1, 2);
        sink.on_entry_complete("a.txt");
        sink.on_complete();
    }
}
