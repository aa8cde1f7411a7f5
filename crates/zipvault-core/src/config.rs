//! Configuration for archive operations.

use std::path::PathBuf;

/// Attempt limit for the retry-lockout session.
pub const DEFAULT_ATTEMPT_LIMIT: u8 = 5;

/// Options shared by the writer, reader, and retry-lockout session.
///
/// # Examples
///
/// ```
/// use zipvault_core::VaultOptions;
///
/// let options = VaultOptions::default().with_compression_level(9);
/// assert_eq!(options.attempt_limit, 5);
/// ```
#[derive(Debug, Clone)]
pub struct VaultOptions {
    /// Consecutive wrong-password attempts allowed before lockout.
    pub attempt_limit: u8,

    /// Deflate compression level (1-9); `None` uses the container default.
    pub compression_level: Option<u8>,

    /// Where a locked-out archive is relocated. `None` resolves to
    /// `<user home>/Downloads/new_folder/`, created on demand.
    pub quarantine_dir: Option<PathBuf>,
}

impl Default for VaultOptions {
    fn default() -> Self {
        Self {
            attempt_limit: DEFAULT_ATTEMPT_LIMIT,
            compression_level: None,
            quarantine_dir: None,
        }
    }
}

impl VaultOptions {
    /// Sets the Deflate compression level (1-9).
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        self.compression_level = Some(level);
        self
    }

    /// Overrides the quarantine directory.
    #[must_use]
    pub fn with_quarantine_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.quarantine_dir = Some(dir.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = VaultOptions::default();
        assert_eq!(options.attempt_limit, DEFAULT_ATTEMPT_LIMIT);
        assert_eq!(options.compression_level, None);
        assert_eq!(options.quarantine_dir, None);
    }

    #[test]
    fn test_builder_setters() {
        let options = VaultOptions::default()
            .with_compression_level(9)
            .with_quarantine_dir("/tmp/quarantine");

        assert_eq!(options.compression_level, Some(9));
        assert_eq!(options.quarantine_dir, Some(PathBuf::from("/tmp/quarantine")));
    }
}
