//! Error types for encrypted archive operations.

use std::path::PathBuf;
use thiserror::Error;
use zip::result::ZipError;

/// Result type alias using `ArchiveError`.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Errors that can occur while writing, verifying, or opening an archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The supplied password is empty.
    #[error("password must not be empty")]
    EmptyPassword,

    /// The candidate password does not match the archive's verification
    /// value.
    #[error("wrong password")]
    WrongPassword,

    /// The archive failed an integrity check.
    #[error("corrupt archive: {reason}")]
    CorruptArchive {
        /// What failed to validate.
        reason: String,
    },

    /// An entry path escapes the extraction root.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// The entry path that attempted traversal.
        path: PathBuf,
    },

    /// Source path does not exist.
    #[error("source not found: {path}")]
    SourceNotFound {
        /// The missing source path.
        path: PathBuf,
    },
}

impl ArchiveError {
    /// Builds a `CorruptArchive` error from any displayable reason.
    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        Self::CorruptArchive {
            reason: reason.into(),
        }
    }

    /// Classifies an error from the `zip` container layer.
    ///
    /// The container signals a rejected password distinctly; everything
    /// else it reports about an archive's structure is an integrity
    /// failure, not user error.
    pub(crate) fn from_zip(err: ZipError) -> Self {
        match err {
            ZipError::Io(e) => Self::Io(e),
            ZipError::InvalidPassword => Self::WrongPassword,
            other => Self::corrupt(other.to_string()),
        }
    }

    /// Returns `true` if this error means the candidate password was
    /// rejected.
    ///
    /// Only this kind drives the retry loop; every other kind ends a
    /// session immediately.
    #[must_use]
    pub const fn is_wrong_password(&self) -> bool {
        matches!(self, Self::WrongPassword)
    }

    /// Returns `true` if this error represents a data-integrity failure.
    ///
    /// Integrity failures cover a corrupt container, a failed
    /// authentication tag, and entry paths that escape the extraction
    /// root. They are never retried and must be surfaced distinctly from
    /// a wrong password.
    #[must_use]
    pub const fn is_integrity_failure(&self) -> bool {
        matches!(
            self,
            Self::CorruptArchive { .. } | Self::PathTraversal { .. }
        )
    }
}
