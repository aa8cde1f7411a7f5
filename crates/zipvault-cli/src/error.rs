//! Error conversion utilities for CLI.
//!
//! Converts zipvault-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use std::path::Path;
use zipvault_core::ArchiveError;

/// Converts `ArchiveError` to a user-friendly anyhow error with context.
pub fn convert_archive_error(err: ArchiveError, archive: &Path) -> anyhow::Error {
    match err {
        ArchiveError::EmptyPassword => {
            anyhow!("Password cannot be empty")
        }
        ArchiveError::WrongPassword => {
            anyhow!("Wrong password for '{}'", archive.display())
        }
        ArchiveError::CorruptArchive { reason } => {
            anyhow!(
                "Archive '{}' failed integrity checks: {reason}\n\
                 HINT: The archive is damaged or was not produced by a compliant tool.\n\
                 If this happened right after encrypting, the original data was NOT removed.",
                archive.display()
            )
        }
        ArchiveError::PathTraversal { path } => {
            anyhow!(
                "Security violation: archive '{}' attempted path traversal with '{}'\n\
                 HINT: This archive may be malicious. Nothing was written outside the \
                 destination.",
                archive.display(),
                path.display()
            )
        }
        ArchiveError::SourceNotFound { path } => {
            anyhow!("Source not found: '{}'", path.display())
        }
        ArchiveError::Io(io_err) => {
            anyhow!(
                "I/O error while processing '{}': {}",
                archive.display(),
                io_err
            )
        }
    }
}

/// Adds archive context to a core result.
pub fn add_archive_context<T>(
    result: Result<T, ArchiveError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_archive_error(e, archive))
}
