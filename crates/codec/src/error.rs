//! Error types for the codec.

use thiserror::Error;

/// Errors produced by [`encrypt`](crate::encrypt).
#[derive(Debug, Error)]
pub enum EncryptError {
    /// The random source could not produce salt or IV bytes. Fatal for the call.
    #[error("random source unavailable")]
    RandomSourceFailure(#[source] rand::Error),
}

/// Errors produced by [`decrypt`](crate::decrypt).
///
/// [`DecryptError::AuthenticationFailed`] is deliberately undifferentiated:
/// bad padding, bad UTF-8, a wrong passphrase and a failed tag check all map
/// to it, so callers cannot be turned into a padding oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecryptError {
    /// The blob failed structural checks (base64, length) before any
    /// cryptographic work was done.
    #[error("malformed encrypted data")]
    Malformed,

    /// Decryption did not yield a valid plaintext.
    #[error("invalid encrypted data or wrong password")]
    AuthenticationFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authentication_failure_message_is_generic() {
        assert_eq!(
            DecryptError::AuthenticationFailed.to_string(),
            "invalid encrypted data or wrong password"
        );
    }

    #[test]
    fn random_source_failure_keeps_source() {
        use std::error::Error as _;
        let inner = rand::Error::new(std::io::Error::other("entropy pool closed"));
        let e = EncryptError::RandomSourceFailure(inner);
        assert!(e.source().is_some());
    }
}
