//! Stored layout of a WinZip-AES encrypted entry.
//!
//! Each encrypted entry's raw payload is `salt || verifier || ciphertext
//! || auth tag`. This module reads the leading frame header and bounds
//! the ciphertext so the verifier and reader can stream entries of any
//! size.

use crate::ArchiveError;
use crate::Result;
use crate::keys::AUTH_TAG_LEN;
use crate::keys::SALT_LEN;
use crate::keys::VERIFIER_LEN;
use std::io::Read;

/// Bytes of per-entry overhead around the ciphertext at AES-256 strength.
pub(crate) const FRAME_OVERHEAD: u64 = (SALT_LEN + VERIFIER_LEN + AUTH_TAG_LEN) as u64;

/// The leading salt and password-verification value of a stored entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FrameHeader {
    /// Per-entry key-derivation salt.
    pub salt: [u8; SALT_LEN],
    /// Stored password-verification value.
    pub verifier: [u8; VERIFIER_LEN],
}

impl FrameHeader {
    /// Reads the frame header from the start of an entry's raw payload.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut salt = [0u8; SALT_LEN];
        let mut verifier = [0u8; VERIFIER_LEN];
        reader
            .read_exact(&mut salt)
            .and_then(|()| reader.read_exact(&mut verifier))
            .map_err(|_| ArchiveError::corrupt("encrypted entry shorter than its key header"))?;
        Ok(Self { salt, verifier })
    }
}

/// Returns the ciphertext length implied by an entry's stored size.
///
/// Fails with `CorruptArchive` when the stored size cannot hold the
/// salt, verifier, and authentication tag this writer emits.
pub(crate) fn ciphertext_len(stored_size: u64) -> Result<u64> {
    stored_size
        .checked_sub(FRAME_OVERHEAD)
        .ok_or_else(|| ArchiveError::corrupt("encrypted entry shorter than its framing"))
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_header_splits_salt_and_verifier() {
        let mut raw = Vec::new();
        raw.extend_from_slice(&[0xAA; SALT_LEN]);
        raw.extend_from_slice(&[0x01, 0x02]);
        raw.extend_from_slice(b"ciphertext...");

        let mut cursor = Cursor::new(raw);
        let header = FrameHeader::read_from(&mut cursor).expect("valid header");

        assert_eq!(header.salt, [0xAA; SALT_LEN]);
        assert_eq!(header.verifier, [0x01, 0x02]);
        // The cursor is left at the first ciphertext byte.
        assert_eq!(cursor.position(), FRAME_OVERHEAD - AUTH_TAG_LEN as u64);
    }

    #[test]
    fn test_read_header_rejects_short_payload() {
        let mut cursor = Cursor::new(vec![0u8; SALT_LEN - 1]);
        let err = FrameHeader::read_from(&mut cursor).expect_err("truncated header");
        assert!(err.is_integrity_failure());
    }

    #[test]
    fn test_ciphertext_len() {
        assert_eq!(ciphertext_len(FRAME_OVERHEAD).expect("empty payload"), 0);
        assert_eq!(
            ciphertext_len(FRAME_OVERHEAD + 13).expect("13-byte payload"),
            13
        );

        let err = ciphertext_len(FRAME_OVERHEAD - 1).expect_err("too short");
        assert!(err.is_integrity_failure());
    }
}
