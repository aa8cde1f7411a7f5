//! Output formatter trait for CLI results.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use zipvault_core::ExtractReport;
use zipvault_core::VerifyReport;
use zipvault_core::WriteReport;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format the result of an encrypt operation
    fn format_encrypt_result(
        &self,
        archive: &Path,
        report: &WriteReport,
        source_removed: bool,
    ) -> Result<()>;

    /// Format the result of a decrypt/extract operation
    fn format_extract_result(&self, destination: &Path, report: &ExtractReport) -> Result<()>;

    /// Format the result of a verify operation
    fn format_verify_result(&self, archive: &Path, report: &VerifyReport) -> Result<()>;

    /// Format the lockout outcome: the archive was quarantined
    fn format_locked(&self, quarantined_to: &Path, attempts: u8) -> Result<()>;

    /// Format a user cancellation
    fn format_cancelled(&self, operation: &str) -> Result<()>;

    /// Format warning message
    fn format_warning(&self, message: &str);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    /// Attempt limit reached; the archive was quarantined. A defined
    /// outcome, not an error.
    Locked,
    Cancelled,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }

    pub fn outcome(operation: impl Into<String>, status: Status, data: T) -> Self {
        Self {
            operation: operation.into(),
            status,
            data: Some(data),
            error: None,
        }
    }
}
