//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use super::formatter::Status;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;
use zipvault_core::ExtractReport;
use zipvault_core::VerifyReport;
use zipvault_core::WriteReport;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_encrypt_result(
        &self,
        archive: &Path,
        report: &WriteReport,
        source_removed: bool,
    ) -> Result<()> {
        #[derive(Serialize)]
        struct EncryptOutput {
            archive_path: String,
            archive_size: u64,
            files_added: usize,
            directories_added: usize,
            bytes_read: u64,
            source_removed: bool,
            duration_ms: u128,
        }

        let data = EncryptOutput {
            archive_path: archive.display().to_string(),
            archive_size: report.archive_size,
            files_added: report.files_added,
            directories_added: report.directories_added,
            bytes_read: report.bytes_read,
            source_removed,
            duration_ms: report.duration.as_millis(),
        };

        Self::output(&JsonOutput::success("encrypt", data))
    }

    fn format_extract_result(&self, destination: &Path, report: &ExtractReport) -> Result<()> {
        #[derive(Serialize)]
        struct ExtractOutput {
            destination: String,
            files_extracted: usize,
            directories_created: usize,
            bytes_written: u64,
            duration_ms: u128,
        }

        let data = ExtractOutput {
            destination: destination.display().to_string(),
            files_extracted: report.files_extracted,
            directories_created: report.directories_created,
            bytes_written: report.bytes_written,
            duration_ms: report.duration.as_millis(),
        };

        Self::output(&JsonOutput::success("decrypt", data))
    }

    fn format_verify_result(&self, archive: &Path, report: &VerifyReport) -> Result<()> {
        #[derive(Serialize)]
        struct VerifyOutput {
            archive_path: String,
            entries_checked: usize,
            bytes_checked: u64,
            duration_ms: u128,
        }

        let data = VerifyOutput {
            archive_path: archive.display().to_string(),
            entries_checked: report.entries_checked,
            bytes_checked: report.bytes_checked,
            duration_ms: report.duration.as_millis(),
        };

        Self::output(&JsonOutput::success("verify", data))
    }

    fn format_locked(&self, quarantined_to: &Path, attempts: u8) -> Result<()> {
        #[derive(Serialize)]
        struct LockedOutput {
            quarantined_to: String,
            attempts: u8,
        }

        let data = LockedOutput {
            quarantined_to: quarantined_to.display().to_string(),
            attempts,
        };

        Self::output(&JsonOutput::outcome("decrypt", Status::Locked, data))
    }

    fn format_cancelled(&self, operation: &str) -> Result<()> {
        #[derive(Serialize)]
        struct CancelledOutput {}

        Self::output(&JsonOutput::outcome(
            operation,
            Status::Cancelled,
            CancelledOutput {},
        ))
    }

    fn format_warning(&self, message: &str) {
        // Keep stdout clean for the JSON document.
        eprintln!("warning: {message}");
    }
}
