//! Retry-lockout session for password attempts.
//!
//! Repeated password attempts against one archive are modeled as an
//! explicit state machine: every wrong password advances it, the limit
//! quarantines the archive, and integrity failures abort immediately
//! without counting as attempts. Prompting stays outside the core: the
//! driver takes a collaborator closure that supplies each candidate.

use crate::ArchiveError;
use crate::Password;
use crate::Result;
use crate::VaultOptions;
use crate::extractor;
use crate::report::ExtractReport;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use tracing::info;
use tracing::warn;

/// State of a retry-lockout session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Accepting attempts; `attempts` have been made so far.
    Active {
        /// Wrong-password attempts made, `0 <= attempts < limit`.
        attempts: u8,
    },
    /// The archive was opened and extraction proceeded. Terminal.
    Succeeded,
    /// The attempt limit was reached. Terminal; no further attempts are
    /// accepted and the archive is quarantined.
    Locked,
}

/// Tracks wrong-password attempts against one archive.
///
/// # Examples
///
/// ```
/// use zipvault_core::AttemptSession;
/// use zipvault_core::SessionState;
///
/// let mut session = AttemptSession::new(2);
/// assert_eq!(session.state(), SessionState::Active { attempts: 0 });
/// assert_eq!(
///     session.record_wrong_password(),
///     SessionState::Active { attempts: 1 }
/// );
/// assert_eq!(session.record_wrong_password(), SessionState::Locked);
/// ```
#[derive(Debug, Clone)]
pub struct AttemptSession {
    attempts: u8,
    limit: u8,
}

impl AttemptSession {
    /// Starts a session allowing `limit` wrong-password attempts.
    ///
    /// A zero limit is treated as one attempt.
    #[must_use]
    pub fn new(limit: u8) -> Self {
        Self {
            attempts: 0,
            limit: limit.max(1),
        }
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.attempts >= self.limit {
            SessionState::Locked
        } else {
            SessionState::Active {
                attempts: self.attempts,
            }
        }
    }

    /// Returns the number of wrong-password attempts made.
    #[must_use]
    pub fn attempts(&self) -> u8 {
        self.attempts
    }

    /// Returns how many attempts remain before lockout.
    #[must_use]
    pub fn remaining(&self) -> u8 {
        self.limit.saturating_sub(self.attempts)
    }

    /// Records a wrong-password result and returns the new state.
    pub fn record_wrong_password(&mut self) -> SessionState {
        self.attempts = self.attempts.saturating_add(1);
        self.state()
    }
}

/// Terminal outcome of a retry-lockout session.
///
/// Lockout and cancellation are defined outcomes, not errors; integrity
/// and I/O failures propagate as [`ArchiveError`] instead.
#[derive(Debug)]
pub enum SessionOutcome {
    /// The archive was opened and fully extracted.
    Extracted(ExtractReport),
    /// The prompt collaborator declined to supply another password.
    Cancelled {
        /// Wrong-password attempts made before cancelling.
        attempts_made: u8,
    },
    /// The attempt limit was reached and the archive was relocated.
    Locked {
        /// Where the archive now lives.
        quarantined_to: PathBuf,
    },
}

/// Runs password attempts against an archive until a terminal outcome.
///
/// `prompt` is called before every attempt with the current session and
/// returns the next candidate password, or `None` to cancel. Wrong
/// passwords advance the session; reaching the limit moves the archive to
/// the quarantine directory and yields [`SessionOutcome::Locked`]. A
/// `CorruptArchive` or I/O failure aborts immediately without counting an
/// attempt.
///
/// # Examples
///
/// ```no_run
/// use zipvault_core::Password;
/// use zipvault_core::SessionOutcome;
/// use zipvault_core::VaultOptions;
/// use zipvault_core::session;
/// use std::path::Path;
///
/// let options = VaultOptions::default();
/// let outcome = session::run(
///     Path::new("proj.enc.zip"),
///     Path::new("/restore"),
///     &options,
///     |_session| Password::new("password").ok(),
/// )?;
///
/// if let SessionOutcome::Locked { quarantined_to } = outcome {
///     println!("archive moved to {}", quarantined_to.display());
/// }
/// # Ok::<(), zipvault_core::ArchiveError>(())
/// ```
pub fn run<F>(
    archive_path: &Path,
    destination_root: &Path,
    options: &VaultOptions,
    mut prompt: F,
) -> Result<SessionOutcome>
where
    F: FnMut(&AttemptSession) -> Option<Password>,
{
    let mut session = AttemptSession::new(options.attempt_limit);

    loop {
        let Some(password) = prompt(&session) else {
            info!(archive = %archive_path.display(), "session cancelled");
            return Ok(SessionOutcome::Cancelled {
                attempts_made: session.attempts(),
            });
        };

        match extractor::try_open(archive_path, password) {
            Ok(open) => {
                let report = open.extract(destination_root)?;
                return Ok(SessionOutcome::Extracted(report));
            }
            Err(ArchiveError::WrongPassword) => {
                if session.record_wrong_password() == SessionState::Locked {
                    let quarantined_to = quarantine(archive_path, options)?;
                    warn!(
                        archive = %archive_path.display(),
                        quarantine = %quarantined_to.display(),
                        attempts = session.attempts(),
                        "attempt limit reached; archive quarantined"
                    );
                    return Ok(SessionOutcome::Locked { quarantined_to });
                }
            }
            // Integrity and I/O failures are not password attempts.
            Err(other) => return Err(other),
        }
    }
}

/// Resolves the quarantine directory for these options.
///
/// Defaults to `<user home>/Downloads/new_folder/`.
pub fn quarantine_dir(options: &VaultOptions) -> Result<PathBuf> {
    if let Some(dir) = &options.quarantine_dir {
        return Ok(dir.clone());
    }
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .map(|downloads| downloads.join("new_folder"))
        .ok_or_else(|| {
            ArchiveError::Io(std::io::Error::other(
                "cannot resolve a home directory for quarantine",
            ))
        })
}

/// Moves a locked-out archive into the quarantine directory.
///
/// The archive is relocated, not copied and not deleted; a cross-device
/// rename falls back to copy plus remove.
fn quarantine(archive_path: &Path, options: &VaultOptions) -> Result<PathBuf> {
    let dir = quarantine_dir(options)?;
    fs::create_dir_all(&dir)?;

    let file_name = archive_path.file_name().ok_or_else(|| {
        ArchiveError::Io(std::io::Error::other(format!(
            "cannot determine file name for {}",
            archive_path.display()
        )))
    })?;
    let target = dir.join(file_name);

    if fs::rename(archive_path, &target).is_err() {
        fs::copy(archive_path, &target)?;
        fs::remove_file(archive_path)?;
    }
    Ok(target)
}
