//! Password-based text encryption for AESConnect.
//!
//! A passphrase and a fresh random salt are stretched with PBKDF2-HMAC-SHA256
//! (100 000 rounds) into an AES-256 key. The UTF-8 plaintext is PKCS#7 padded
//! and encrypted with AES-256-CBC under a fresh random IV.
//!
//! # Blob format
//!
//! ```text
//! legacy:        base64(salt[16] || iv[16] || ciphertext[16n])
//! authenticated: base64(salt[16] || iv[16] || ciphertext[16n] || hmac_sha256[32])
//! ```
//!
//! The legacy format carries **no integrity tag**: flipped ciphertext bits are
//! not detected before decryption. It is kept bit-for-bit for compatibility
//! with existing blobs. [`Mode::Authenticated`] is an explicit opt-in that
//! appends an encrypt-then-MAC tag; the two formats are never auto-detected.
//!
//! Every operation is a pure, synchronous function of its inputs plus the
//! random source. The crate performs no logging and holds no shared state.

pub mod blob;
pub mod cipher;
pub mod codec;
pub mod entropy;
pub mod error;
pub mod kdf;

pub use blob::EncryptionBlob;
pub use codec::{decrypt, encrypt, Mode, SymmetricTextCodec};
pub use entropy::{EntropySource, OsEntropy};
pub use error::{DecryptError, EncryptError};

/// Byte length of the PBKDF2 salt.
pub const SALT_LEN: usize = 16;

/// Byte length of the AES-CBC initialisation vector.
pub const IV_LEN: usize = 16;

/// AES block size in bytes.
pub const BLOCK_LEN: usize = 16;

/// Byte length of an AES-256 key.
pub const KEY_LEN: usize = 32;

/// Byte length of the HMAC-SHA256 tag appended in [`Mode::Authenticated`].
pub const TAG_LEN: usize = 32;

/// PBKDF2 iteration count. Part of the wire contract: changing it makes
/// existing blobs undecryptable.
pub const PBKDF2_ROUNDS: u32 = 100_000;
