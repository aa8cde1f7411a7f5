//! Password-based encrypted archive engine.
//!
//! `zipvault-core` packages a file or directory tree into a single
//! authenticated, compressed, WinZip-AES encrypted ZIP archive, verifies a
//! freshly written archive before the plaintext source may be destroyed,
//! and gates archive opening behind a bounded-retry lockout session that
//! quarantines the archive after repeated wrong passwords. Archives
//! interoperate with any tool implementing the same convention.
//!
//! # Examples
//!
//! ```no_run
//! use zipvault_core::Password;
//! use zipvault_core::VaultOptions;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = VaultOptions::default();
//!
//! let password = Password::new("password")?;
//! let (archive, report) = zipvault_core::encrypt_to_dir(
//!     "proj".as_ref(),
//!     "/out".as_ref(),
//!     &password,
//!     &options,
//! )?;
//! println!("wrote {} ({} files)", archive.display(), report.files_added);
//!
//! let password = Password::new("password")?;
//! zipvault_core::extract_archive(&archive, "/restore".as_ref(), password)?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod entry;
pub mod error;
pub mod extractor;
mod framing;
pub mod keys;
mod paths;
pub mod password;
pub mod report;
pub mod session;
pub mod verifier;
pub mod writer;

// Re-export main API types
pub use api::encrypt_to_dir;
pub use api::extract_archive;
pub use config::DEFAULT_ATTEMPT_LIMIT;
pub use config::VaultOptions;
pub use entry::ArchiveEntry;
pub use entry::EntryKind;
pub use error::ArchiveError;
pub use error::Result;
pub use password::Password;
pub use report::ExtractReport;
pub use report::NoopProgress;
pub use report::ProgressSink;
pub use report::VerifyReport;
pub use report::WriteReport;
pub use session::AttemptSession;
pub use session::SessionOutcome;
pub use session::SessionState;
