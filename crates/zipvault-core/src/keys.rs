//! Key derivation for the WinZip-AES archive convention.
//!
//! One password and one per-entry salt deterministically produce an
//! encryption key, an authentication key, and a short password-verification
//! value. The schedule is fixed by the interop format: PBKDF2-HMAC-SHA1
//! with 1000 rounds, yielding `key || key || verifier` at AES-256
//! strength.

use crate::Password;
use hmac::Hmac;
use hmac::Mac;
use pbkdf2::pbkdf2_hmac;
use sha1::Sha1;
use zeroize::Zeroize;
use zeroize::ZeroizeOnDrop;
use zeroize::Zeroizing;

/// Salt length for AES-256 strength entries.
pub const SALT_LEN: usize = 16;

/// Length of the stored password-verification value.
pub const VERIFIER_LEN: usize = 2;

/// Length of the truncated HMAC-SHA1 authentication tag.
pub const AUTH_TAG_LEN: usize = 10;

/// AES-256 key length, used for both encryption and authentication keys.
pub const KEY_LEN: usize = 32;

/// Fixed PBKDF2 iteration count mandated by the convention.
pub const PBKDF2_ROUNDS: u32 = 1000;

type HmacSha1 = Hmac<Sha1>;

/// Key material derived from one `(password, salt)` pair.
///
/// Scoped to a single writer or reader attempt; the encryption and
/// authentication keys are zeroized on drop and must not be reused across
/// archives or password attempts.
///
/// # Examples
///
/// ```
/// use zipvault_core::Password;
/// use zipvault_core::keys::DerivedKeys;
///
/// let password = Password::new("password")?;
/// let salt = [0x5a; 16];
///
/// let a = DerivedKeys::derive(&password, &salt);
/// let b = DerivedKeys::derive(&password, &salt);
/// assert_eq!(a.verifier(), b.verifier());
/// # Ok::<(), zipvault_core::ArchiveError>(())
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKeys {
    encryption: [u8; KEY_LEN],
    authentication: [u8; KEY_LEN],
    verifier: [u8; VERIFIER_LEN],
}

impl DerivedKeys {
    /// Derives the key triple from a password and a per-entry salt.
    ///
    /// Deterministic for identical inputs. The salt must be fresh per
    /// archive entry and never reused across archives; the writer's
    /// container layer generates it from a CSPRNG.
    #[must_use]
    pub fn derive(password: &Password, salt: &[u8]) -> Self {
        let mut material = Zeroizing::new([0u8; 2 * KEY_LEN + VERIFIER_LEN]);
        pbkdf2_hmac::<Sha1>(password.as_bytes(), salt, PBKDF2_ROUNDS, material.as_mut());

        let mut keys = Self {
            encryption: [0u8; KEY_LEN],
            authentication: [0u8; KEY_LEN],
            verifier: [0u8; VERIFIER_LEN],
        };
        keys.encryption.copy_from_slice(&material[..KEY_LEN]);
        keys.authentication
            .copy_from_slice(&material[KEY_LEN..2 * KEY_LEN]);
        keys.verifier.copy_from_slice(&material[2 * KEY_LEN..]);
        keys
    }

    /// Returns the stored password-verification value.
    ///
    /// Comparing this against an entry's stored verifier cheaply rejects a
    /// wrong password before any payload is decrypted.
    #[must_use]
    pub fn verifier(&self) -> [u8; VERIFIER_LEN] {
        self.verifier
    }

    /// Computes the truncated authentication tag over a full ciphertext.
    #[must_use]
    pub fn authentication_tag(&self, ciphertext: &[u8]) -> [u8; AUTH_TAG_LEN] {
        let mut mac = self.mac();
        mac.update(ciphertext);
        let digest = mac.finalize().into_bytes();
        let mut tag = [0u8; AUTH_TAG_LEN];
        tag.copy_from_slice(&digest[..AUTH_TAG_LEN]);
        tag
    }

    /// Starts an incremental tag computation for streamed ciphertext.
    ///
    /// Finalize with [`Mac::verify_truncated_left`] for a constant-time
    /// comparison against the stored tag.
    pub(crate) fn mac(&self) -> HmacSha1 {
        #[allow(clippy::expect_used)] // HMAC accepts keys of any length
        HmacSha1::new_from_slice(&self.authentication).expect("HMAC accepts any key length")
    }
}
