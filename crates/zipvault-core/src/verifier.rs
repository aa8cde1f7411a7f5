//! Post-write archive verification.
//!
//! Exists specifically to prevent data loss: only after a freshly written
//! archive passes this check may the caller delete the original source
//! tree. A failure here means the archive the program itself just wrote is
//! unreadable, which is a defect, never user error.

use crate::ArchiveError;
use crate::Password;
use crate::Result;
use crate::framing;
use crate::framing::FrameHeader;
use crate::keys::AUTH_TAG_LEN;
use crate::keys::DerivedKeys;
use crate::report::VerifyReport;
use hmac::Mac;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;
use tracing::info;
use zip::CompressionMethod;
use zip::ZipArchive;

/// Verifies every entry of a freshly written archive.
///
/// For each file entry this re-derives the keys from the stored per-entry
/// salt and the password the archive was just written with, checks the
/// stored verification value, recomputes the authentication tag over the
/// stored ciphertext, and finally decrypts and decompresses the entry to
/// a sink so the container's checksum is validated too.
///
/// # Errors
///
/// Any mismatch is `CorruptArchive`, including a rejected verification
/// value, which for the writing password can only mean the archive is
/// damaged.
///
/// # Examples
///
/// ```no_run
/// use zipvault_core::Password;
/// use zipvault_core::verifier::verify_archive;
/// use std::path::Path;
///
/// let password = Password::new("password")?;
/// let report = verify_archive(Path::new("proj.enc.zip"), &password)?;
/// println!("validated {} entries", report.entries_checked);
/// # Ok::<(), zipvault_core::ArchiveError>(())
/// ```
pub fn verify_archive(archive_path: &Path, password: &Password) -> Result<VerifyReport> {
    let start = std::time::Instant::now();
    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(file).map_err(ArchiveError::from_zip)?;

    let mut report = VerifyReport::default();
    let mut buffer = vec![0u8; 64 * 1024];

    for index in 0..archive.len() {
        // Tag pass: recompute the authentication tag over the stored
        // ciphertext without decrypting it.
        {
            let mut raw = archive.by_index_raw(index).map_err(ArchiveError::from_zip)?;
            if raw.is_dir() {
                continue;
            }
            let name = raw.name().to_owned();
            if raw.compression() != CompressionMethod::Aes {
                return Err(ArchiveError::corrupt(format!(
                    "entry {name} is not stored with AES encryption"
                )));
            }

            let mut remaining = framing::ciphertext_len(raw.compressed_size())?;
            let header = FrameHeader::read_from(&mut raw)?;
            let keys = DerivedKeys::derive(password, &header.salt);
            if keys.verifier() != header.verifier {
                return Err(ArchiveError::corrupt(format!(
                    "entry {name} rejected the password it was written with"
                )));
            }

            let mut mac = keys.mac();
            while remaining > 0 {
                let take = usize::try_from(remaining.min(buffer.len() as u64)).unwrap_or(0);
                let read = raw.read(&mut buffer[..take])?;
                if read == 0 {
                    return Err(ArchiveError::corrupt(format!(
                        "entry {name} ended before its stored ciphertext"
                    )));
                }
                mac.update(&buffer[..read]);
                remaining -= read as u64;
            }

            let mut tag = [0u8; AUTH_TAG_LEN];
            raw.read_exact(&mut tag).map_err(|_| {
                ArchiveError::corrupt(format!("entry {name} is missing its authentication tag"))
            })?;
            mac.verify_truncated_left(&tag).map_err(|_| {
                ArchiveError::corrupt(format!("authentication tag mismatch in entry {name}"))
            })?;
            debug!(entry = %name, "authentication tag verified");
        }

        // Decompression pass: drain the decrypted entry so the container
        // validates its checksum.
        {
            let mut entry = archive
                .by_index_decrypt(index, password.as_bytes())
                .map_err(|err| match ArchiveError::from_zip(err) {
                    // The verifier already matched above, so a rejection
                    // here is inconsistency inside the archive.
                    ArchiveError::WrongPassword => {
                        ArchiveError::corrupt("entry rejected a verified password")
                    }
                    other => other,
                })?;

            loop {
                let read = entry.read(&mut buffer).map_err(|e| {
                    ArchiveError::corrupt(format!("entry failed to decrypt cleanly: {e}"))
                })?;
                if read == 0 {
                    break;
                }
                report.bytes_checked += read as u64;
            }
            report.entries_checked += 1;
        }
    }

    report.duration = start.elapsed();
    info!(
        archive = %archive_path.display(),
        entries = report.entries_checked,
        bytes = report.bytes_checked,
        "archive verified"
    );
    Ok(report)
}
