//! Transient password handling.

use crate::ArchiveError;
use crate::Result;
use std::fmt;
use zeroize::Zeroizing;

/// A user-supplied password, held only for the duration of one operation.
///
/// The backing buffer is zeroized when the value is dropped, and the
/// `Debug` representation never reveals the secret. Construction is the
/// only entry point and rejects the empty password, so every `Password`
/// a keying operation sees is non-empty by type.
///
/// # Examples
///
/// ```
/// use zipvault_core::Password;
///
/// let password = Password::new("correct horse battery staple")?;
/// assert_eq!(format!("{password:?}"), "Password(<redacted>)");
///
/// assert!(Password::new("").is_err());
/// # Ok::<(), zipvault_core::ArchiveError>(())
/// ```
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validates and wraps a password.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::EmptyPassword`] for an empty input; this is
    /// surfaced immediately and has no side effects.
    pub fn new(secret: impl Into<String>) -> Result<Self> {
        let secret = Zeroizing::new(secret.into());
        if secret.is_empty() {
            return Err(ArchiveError::EmptyPassword);
        }
        Ok(Self(secret))
    }

    /// Returns the password as UTF-8 text for the container layer.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the password bytes for key derivation.
    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}
