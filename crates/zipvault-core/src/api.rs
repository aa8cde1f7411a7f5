//! High-level entry points composing the writer, verifier, and reader.

use crate::Password;
use crate::Result;
use crate::VaultOptions;
use crate::extractor;
use crate::report::ExtractReport;
use crate::report::WriteReport;
use crate::verifier;
use crate::writer;
use std::path::Path;
use std::path::PathBuf;

/// Encrypts a file or directory into `output_dir` and verifies the result.
///
/// The archive is named by the `.enc.zip` convention and is only reported
/// as written after it passes self-verification, so a caller may delete
/// the source on success. The source tree itself is never touched.
///
/// # Errors
///
/// Propagates writer failures (no archive is left behind) and
/// `CorruptArchive` from the verification pass (the archive file is left
/// in place for inspection, but must be treated as invalid).
///
/// # Examples
///
/// ```no_run
/// use zipvault_core::Password;
/// use zipvault_core::VaultOptions;
/// use zipvault_core::encrypt_to_dir;
/// use std::path::Path;
///
/// let password = Password::new("password")?;
/// let options = VaultOptions::default();
/// let (archive, report) = encrypt_to_dir(
///     Path::new("hello.txt"),
///     Path::new("/out"),
///     &password,
///     &options,
/// )?;
/// println!("{}: {} bytes", archive.display(), report.archive_size);
/// # Ok::<(), zipvault_core::ArchiveError>(())
/// ```
pub fn encrypt_to_dir(
    source: &Path,
    output_dir: &Path,
    password: &Password,
    options: &VaultOptions,
) -> Result<(PathBuf, WriteReport)> {
    let archive_path = output_dir.join(writer::archive_file_name(source)?);
    let report = writer::write_archive(source, &archive_path, password, options)?;
    verifier::verify_archive(&archive_path, password)?;
    Ok((archive_path, report))
}

/// Opens an archive with a candidate password and extracts everything.
///
/// One-shot composition of [`extractor::try_open`] and
/// [`extractor::OpenArchive::extract`]; a wrong password is rejected
/// before anything is written to `destination_root`.
pub fn extract_archive(
    archive_path: &Path,
    destination_root: &Path,
    password: Password,
) -> Result<ExtractReport> {
    extractor::try_open(archive_path, password)?.extract(destination_root)
}
