//! [`SymmetricTextCodec`]: passphrase-based encryption of UTF-8 text.

use crate::blob::EncryptionBlob;
use crate::cipher::{compute_tag, decrypt_cbc, encrypt_cbc, verify_tag};
use crate::entropy::{EntropySource, OsEntropy};
use crate::error::{DecryptError, EncryptError};
use crate::kdf::{derive_key, derive_split_keys};
use crate::{IV_LEN, SALT_LEN};

/// Blob format produced and accepted by a [`SymmetricTextCodec`].
///
/// Blobs are never auto-detected: a legacy blob handed to an authenticated
/// codec (or the reverse) fails to decrypt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// `salt || iv || ciphertext`, no integrity tag.
    #[default]
    Legacy,
    /// `salt || iv || ciphertext || hmac_sha256`, tag checked before decryption.
    Authenticated,
}

/// Encrypts and decrypts text under a passphrase.
///
/// The codec is stateless apart from its mode and random source, so one
/// instance can be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct SymmetricTextCodec<E = OsEntropy> {
    mode: Mode,
    entropy: E,
}

impl SymmetricTextCodec {
    /// Create a codec drawing salts and IVs from the OS CSPRNG.
    pub fn new(mode: Mode) -> Self {
        Self::with_entropy(mode, OsEntropy)
    }
}

impl<E: EntropySource> SymmetricTextCodec<E> {
    /// Create a codec with a custom random source.
    pub fn with_entropy(mode: Mode, entropy: E) -> Self {
        Self { mode, entropy }
    }

    /// The blob format this codec produces and accepts.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Encrypt `plaintext` under `passphrase` and return the base64 blob.
    ///
    /// A fresh salt and IV are drawn for every call, so encrypting the same
    /// input twice yields different blobs. Empty passphrases are accepted here;
    /// rejecting weak passphrases is the caller's policy.
    ///
    /// # Errors
    ///
    /// Returns [`EncryptError::RandomSourceFailure`] if the random source
    /// cannot supply salt or IV bytes.
    pub fn encrypt(&self, plaintext: &str, passphrase: &str) -> Result<String, EncryptError> {
        let mut salt = [0u8; SALT_LEN];
        let mut iv = [0u8; IV_LEN];
        self.entropy
            .fill(&mut salt)
            .map_err(EncryptError::RandomSourceFailure)?;
        self.entropy
            .fill(&mut iv)
            .map_err(EncryptError::RandomSourceFailure)?;

        let blob = match self.mode {
            Mode::Legacy => {
                let key = derive_key(passphrase, &salt);
                let ciphertext = encrypt_cbc(plaintext.as_bytes(), &key, &iv);
                EncryptionBlob {
                    salt,
                    iv,
                    ciphertext,
                    tag: None,
                }
            }
            Mode::Authenticated => {
                let keys = derive_split_keys(passphrase, &salt);
                let ciphertext = encrypt_cbc(plaintext.as_bytes(), &keys.cipher, &iv);
                let tag = compute_tag(&keys.mac, &[&salt[..], &iv[..], &ciphertext[..]]);
                EncryptionBlob {
                    salt,
                    iv,
                    ciphertext,
                    tag: Some(tag),
                }
            }
        };

        Ok(blob.encode())
    }

    /// Decrypt a base64 blob produced by [`encrypt`](Self::encrypt).
    ///
    /// # Errors
    ///
    /// - [`DecryptError::Malformed`] if the blob fails base64 or length checks;
    ///   no key derivation is attempted.
    /// - [`DecryptError::AuthenticationFailed`] for a wrong passphrase, a
    ///   tampered blob, bad padding or non-UTF-8 output, without distinction.
    pub fn decrypt(&self, blob: &str, passphrase: &str) -> Result<String, DecryptError> {
        let blob = EncryptionBlob::decode(blob, self.mode)?;

        let plaintext = match &blob.tag {
            None => {
                let key = derive_key(passphrase, &blob.salt);
                decrypt_cbc(&blob.ciphertext, &key, &blob.iv)?
            }
            Some(tag) => {
                let keys = derive_split_keys(passphrase, &blob.salt);
                verify_tag(
                    &keys.mac,
                    &[&blob.salt[..], &blob.iv[..], &blob.ciphertext[..]],
                    tag,
                )?;
                decrypt_cbc(&blob.ciphertext, &keys.cipher, &blob.iv)?
            }
        };

        String::from_utf8(plaintext).map_err(|_| DecryptError::AuthenticationFailed)
    }
}

/// Encrypt `plaintext` in the legacy format with OS randomness.
///
/// # Errors
///
/// See [`SymmetricTextCodec::encrypt`].
pub fn encrypt(plaintext: &str, passphrase: &str) -> Result<String, EncryptError> {
    SymmetricTextCodec::new(Mode::Legacy).encrypt(plaintext, passphrase)
}

/// Decrypt a legacy-format blob.
///
/// # Errors
///
/// See [`SymmetricTextCodec::decrypt`].
pub fn decrypt(blob: &str, passphrase: &str) -> Result<String, DecryptError> {
    SymmetricTextCodec::new(Mode::Legacy).decrypt(blob, passphrase)
}
