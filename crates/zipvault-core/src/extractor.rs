//! Password-gated archive opening and extraction.

use crate::ArchiveError;
use crate::Password;
use crate::Result;
use crate::framing;
use crate::framing::FrameHeader;
use crate::keys::DerivedKeys;
use crate::paths;
use crate::report::ExtractReport;
use std::fs;
use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use tracing::debug;
use tracing::info;
use zip::CompressionMethod;
use zip::ZipArchive;

/// An archive whose password has been validated, ready to extract.
///
/// Produced by [`try_open`]; consumed by [`extract`](Self::extract). The
/// candidate password lives exactly as long as this value.
#[derive(Debug)]
pub struct OpenArchive {
    archive: ZipArchive<File>,
    password: Password,
}

/// Opens an archive and validates a candidate password.
///
/// The password is checked against the stored verification value of the
/// first encrypted entry, without decrypting any payload. A mismatch is
/// the cheap, expected `WrongPassword`; structural problems are
/// `CorruptArchive`.
///
/// # Examples
///
/// ```no_run
/// use zipvault_core::Password;
/// use zipvault_core::extractor::try_open;
/// use std::path::Path;
///
/// let password = Password::new("password")?;
/// let report = try_open(Path::new("proj.enc.zip"), password)?
///     .extract(Path::new("/restore"))?;
/// println!("restored {} items", report.total_items());
/// # Ok::<(), zipvault_core::ArchiveError>(())
/// ```
pub fn try_open(archive_path: &Path, password: Password) -> Result<OpenArchive> {
    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(file).map_err(ArchiveError::from_zip)?;

    for index in 0..archive.len() {
        let frame_checked = {
            let mut raw = archive.by_index_raw(index).map_err(ArchiveError::from_zip)?;
            if raw.is_dir() || raw.compression() != CompressionMethod::Aes {
                continue;
            }

            if framing::ciphertext_len(raw.compressed_size()).is_ok() {
                let header = FrameHeader::read_from(&mut raw)?;
                let keys = DerivedKeys::derive(&password, &header.salt);
                if keys.verifier() != header.verifier {
                    debug!(archive = %archive_path.display(), "password verifier mismatch");
                    return Err(ArchiveError::WrongPassword);
                }
                true
            } else {
                false
            }
        };

        if !frame_checked {
            // Not the AES-256 frame this writer emits; fall back to the
            // container's own strength-agnostic password validation.
            archive
                .by_index_decrypt(index, password.as_bytes())
                .map_err(ArchiveError::from_zip)?;
        }

        // The first encrypted file entry decides for the whole archive.
        break;
    }

    debug!(archive = %archive_path.display(), "password accepted");
    Ok(OpenArchive { archive, password })
}

impl OpenArchive {
    /// Decrypts and decompresses every entry into `destination_root`.
    ///
    /// Directory markers are recreated as empty directories; every decoded
    /// entry path is validated against escaping the destination root. A
    /// failed authentication tag or checksum after the password check is
    /// `CorruptArchive`, never `WrongPassword`.
    pub fn extract(mut self, destination_root: &Path) -> Result<ExtractReport> {
        let start = std::time::Instant::now();
        fs::create_dir_all(destination_root)?;

        let mut report = ExtractReport::default();
        let mut buffer = vec![0u8; 64 * 1024];

        for index in 0..self.archive.len() {
            let mut entry = self
                .archive
                .by_index_decrypt(index, self.password.as_bytes())
                .map_err(|err| match ArchiveError::from_zip(err) {
                    // The archive-level check already passed, so a
                    // per-entry rejection means the archive is
                    // inconsistent with itself.
                    ArchiveError::WrongPassword => {
                        ArchiveError::corrupt("entry rejected the verified password")
                    }
                    other => other,
                })?;

            let name = entry.name().to_owned();
            let relative = paths::sanitized_entry_path(&name)?;
            let out_path = destination_root.join(&relative);

            if entry.is_dir() {
                fs::create_dir_all(&out_path)?;
                report.directories_created += 1;
                continue;
            }

            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut out = File::create(&out_path)?;
            loop {
                // Read-side failures mean the entry did not decrypt,
                // authenticate, or decompress cleanly; write-side
                // failures are local I/O.
                let read = entry.read(&mut buffer).map_err(|e| {
                    ArchiveError::corrupt(format!("entry {name} failed integrity checks: {e}"))
                })?;
                if read == 0 {
                    break;
                }
                out.write_all(&buffer[..read])?;
                report.bytes_written += read as u64;
            }
            report.files_extracted += 1;
        }

        report.duration = start.elapsed();
        info!(
            destination = %destination_root.display(),
            files = report.files_extracted,
            directories = report.directories_created,
            "archive extracted"
        );
        Ok(report)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::VaultOptions;
    use crate::writer::write_archive;
    use std::fs;
    use tempfile::TempDir;

    fn password() -> Password {
        Password::new("password").unwrap()
    }

    fn write_sample(temp: &TempDir) -> std::path::PathBuf {
        let source = temp.path().join("hello.txt");
        fs::write(&source, "Hello, world!").unwrap();
        let archive_path = temp.path().join("hello.txt.enc.zip");
        write_archive(&source, &archive_path, &password(), &VaultOptions::default()).unwrap();
        archive_path
    }

    #[test]
    fn test_try_open_accepts_correct_password() {
        let temp = TempDir::new().unwrap();
        let archive_path = write_sample(&temp);

        assert!(try_open(&archive_path, password()).is_ok());
    }

    #[test]
    fn test_try_open_rejects_wrong_password() {
        let temp = TempDir::new().unwrap();
        let archive_path = write_sample(&temp);

        let wrong = Password::new("wrong").unwrap();
        let err = try_open(&archive_path, wrong).unwrap_err();
        assert!(err.is_wrong_password());
    }

    #[test]
    fn test_try_open_rejects_garbage_file() {
        let temp = TempDir::new().unwrap();
        let bogus = temp.path().join("not-a-zip.enc.zip");
        fs::write(&bogus, "this is not a zip container").unwrap();

        let err = try_open(&bogus, password()).unwrap_err();
        assert!(err.is_integrity_failure());
    }

    #[test]
    fn test_extract_restores_file_content() {
        let temp = TempDir::new().unwrap();
        let archive_path = write_sample(&temp);
        let dest = temp.path().join("out");

        let report = try_open(&archive_path, password())
            .unwrap()
            .extract(&dest)
            .unwrap();

        assert_eq!(report.files_extracted, 1);
        assert_eq!(report.bytes_written, 13);
        let restored = fs::read_to_string(dest.join("hello.txt")).unwrap();
        assert_eq!(restored, "Hello, world!");
    }

    #[test]
    fn test_extract_recreates_empty_directories() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("proj");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("a.txt"), "A").unwrap();
        fs::create_dir(root.join("sub")).unwrap();
        let archive_path = temp.path().join("proj.enc.zip");
        write_archive(&root, &archive_path, &password(), &VaultOptions::default()).unwrap();

        let dest = temp.path().join("out");
        try_open(&archive_path, password())
            .unwrap()
            .extract(&dest)
            .unwrap();

        assert!(dest.join("proj/a.txt").is_file());
        assert!(dest.join("proj/sub").is_dir());
        assert_eq!(fs::read_dir(dest.join("proj/sub")).unwrap().count(), 0);
    }
}
