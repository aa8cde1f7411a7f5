//! Archive writing.
//!
//! Walks a source file or directory tree, compresses each file entry, and
//! encrypts it into a WinZip-AES ZIP container. The per-entry salt,
//! verification value, and authentication tag are produced by the
//! container layer from the same key schedule the verifier re-derives.

use crate::ArchiveError;
use crate::Password;
use crate::Result;
use crate::VaultOptions;
use crate::entry;
use crate::entry::EntryKind;
use crate::report::NoopProgress;
use crate::report::ProgressSink;
use crate::report::WriteReport;
use std::fs;
use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use tracing::info;
use tracing::warn;
use zip::AesMode;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::FileOptions;
use zip::write::SimpleFileOptions;

/// Suffix appended to a source's base name to form the archive name.
pub const ARCHIVE_SUFFIX: &str = ".enc.zip";

/// Returns the archive file name for a source path.
///
/// Encrypting `name.ext` produces `name.ext.enc.zip`; encrypting a
/// directory `dirname` produces `dirname.enc.zip`.
///
/// # Examples
///
/// ```
/// use zipvault_core::writer::archive_file_name;
/// use std::path::Path;
///
/// let name = archive_file_name(Path::new("/data/hello.txt"))?;
/// assert_eq!(name, "hello.txt.enc.zip");
/// # Ok::<(), zipvault_core::ArchiveError>(())
/// ```
pub fn archive_file_name(source: &Path) -> Result<String> {
    Ok(format!("{}{ARCHIVE_SUFFIX}", entry::base_name(source)?))
}

/// Writes an encrypted archive of `source` to `archive_path`.
///
/// The source tree is never modified; deleting it after a successful
/// write is the caller's responsibility, gated on
/// [`verify_archive`](crate::verifier::verify_archive) succeeding.
///
/// # Errors
///
/// Any failure removes the incomplete output file and propagates the
/// error, so no archive is ever left claiming success.
pub fn write_archive(
    source: &Path,
    archive_path: &Path,
    password: &Password,
    options: &VaultOptions,
) -> Result<WriteReport> {
    write_archive_with_progress(source, archive_path, password, options, &mut NoopProgress)
}

/// Writes an encrypted archive, reporting entry-level progress.
///
/// See [`write_archive`] for semantics.
pub fn write_archive_with_progress(
    source: &Path,
    archive_path: &Path,
    password: &Password,
    options: &VaultOptions,
    progress: &mut dyn ProgressSink,
) -> Result<WriteReport> {
    match write_entries(source, archive_path, password, options, progress) {
        Ok(report) => {
            info!(
                archive = %archive_path.display(),
                files = report.files_added,
                directories = report.directories_added,
                bytes = report.archive_size,
                "archive written"
            );
            Ok(report)
        }
        Err(err) => {
            warn!(
                archive = %archive_path.display(),
                error = %err,
                "archive write failed; removing incomplete output"
            );
            let _ = fs::remove_file(archive_path);
            Err(err)
        }
    }
}

/// Builds the container and writes every entry.
fn write_entries(
    source: &Path,
    archive_path: &Path,
    password: &Password,
    options: &VaultOptions,
    progress: &mut dyn ProgressSink,
) -> Result<WriteReport> {
    let start = std::time::Instant::now();
    let entries = entry::collect_entries(source)?;

    let file = File::create(archive_path)?;
    let mut zip = ZipWriter::new(file);
    let mut report = WriteReport::default();

    let mut file_options: FileOptions<'_, ()> = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .with_aes_encryption(AesMode::Aes256, password.as_str());
    if let Some(level) = options.compression_level {
        file_options = file_options.compression_level(Some(i64::from(level)));
    }
    // Directory markers carry no payload, so they are stored plain; every
    // byte of file content goes through the encrypted path above.
    let marker_options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    let total = entries.len();
    let mut buffer = vec![0u8; 64 * 1024];

    for (index, archive_entry) in entries.iter().enumerate() {
        progress.on_entry_start(&archive_entry.name, index + 1, total);

        match archive_entry.kind {
            EntryKind::DirectoryMarker => {
                zip.add_directory(archive_entry.name.as_str(), marker_options)
                    .map_err(ArchiveError::from_zip)?;
                report.directories_added += 1;
            }
            EntryKind::File => {
                zip.start_file(archive_entry.name.as_str(), file_options)
                    .map_err(ArchiveError::from_zip)?;

                let mut reader = File::open(&archive_entry.source)?;
                loop {
                    let read = reader.read(&mut buffer)?;
                    if read == 0 {
                        break;
                    }
                    zip.write_all(&buffer[..read])?;
                    report.bytes_read += read as u64;
                }
                report.files_added += 1;
            }
        }

        progress.on_entry_complete(&archive_entry.name);
    }

    zip.finish().map_err(ArchiveError::from_zip)?;
    report.archive_size = fs::metadata(archive_path)?.len();
    report.duration = start.elapsed();
    progress.on_complete();

    Ok(report)
}
