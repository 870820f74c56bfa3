//! [`EncryptionBlob`]: the transportable form of one encryption.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::codec::Mode;
use crate::error::DecryptError;
use crate::{BLOCK_LEN, IV_LEN, SALT_LEN, TAG_LEN};

/// Salt, IV and ciphertext produced by one encryption call.
///
/// The string representation is standard padded base64 of
/// `salt || iv || ciphertext`, with the 32-byte tag appended in
/// [`Mode::Authenticated`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptionBlob {
    /// PBKDF2 salt, fresh per encryption.
    pub salt: [u8; SALT_LEN],
    /// CBC initialisation vector, fresh per encryption.
    pub iv: [u8; IV_LEN],
    /// Padded ciphertext, a positive multiple of [`BLOCK_LEN`] bytes.
    pub ciphertext: Vec<u8>,
    /// HMAC-SHA256 over `salt || iv || ciphertext`; present only in the
    /// authenticated format.
    pub tag: Option<[u8; TAG_LEN]>,
}

impl EncryptionBlob {
    /// Encode this blob to its base64 string form.
    pub fn encode(&self) -> String {
        let tag_len = self.tag.map_or(0, |t| t.len());
        let mut raw = Vec::with_capacity(SALT_LEN + IV_LEN + self.ciphertext.len() + tag_len);
        raw.extend_from_slice(&self.salt);
        raw.extend_from_slice(&self.iv);
        raw.extend_from_slice(&self.ciphertext);
        if let Some(tag) = &self.tag {
            raw.extend_from_slice(tag);
        }
        STANDARD.encode(raw)
    }

    /// Parse a base64 blob string for the given `mode`.
    ///
    /// Only structure is checked here; no key derivation or cipher work is done.
    ///
    /// # Errors
    ///
    /// Returns [`DecryptError::Malformed`] if `s` is not valid padded base64,
    /// or if the decoded length is not `32 + 16n` (legacy) or `32 + 16n + 32`
    /// (authenticated) bytes with `n >= 1`.
    pub fn decode(s: &str, mode: Mode) -> Result<Self, DecryptError> {
        let raw = STANDARD.decode(s).map_err(|_| DecryptError::Malformed)?;

        let tag_len = match mode {
            Mode::Legacy => 0,
            Mode::Authenticated => TAG_LEN,
        };
        let header_len = SALT_LEN + IV_LEN;
        if raw.len() < header_len + BLOCK_LEN + tag_len {
            return Err(DecryptError::Malformed);
        }
        let body_len = raw.len() - header_len - tag_len;
        if body_len % BLOCK_LEN != 0 {
            return Err(DecryptError::Malformed);
        }

        let (salt_bytes, rest) = raw.split_at(SALT_LEN);
        let (iv_bytes, rest) = rest.split_at(IV_LEN);
        let (ciphertext, tag_bytes) = rest.split_at(body_len);

        let mut salt = [0u8; SALT_LEN];
        salt.copy_from_slice(salt_bytes);
        let mut iv = [0u8; IV_LEN];
        iv.copy_from_slice(iv_bytes);
        let tag = match mode {
            Mode::Legacy => None,
            Mode::Authenticated => {
                let mut tag = [0u8; TAG_LEN];
                tag.copy_from_slice(tag_bytes);
                Some(tag)
            }
        };

        Ok(Self {
            salt,
            iv,
            ciphertext: ciphertext.to_vec(),
            tag,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_b64(len: usize) -> String {
        STANDARD.encode(vec![0xABu8; len])
    }

    #[test]
    fn legacy_encode_layout() {
        let blob = EncryptionBlob {
            salt: [1; SALT_LEN],
            iv: [2; IV_LEN],
            ciphertext: vec![3; 32],
            tag: None,
        };
        let raw = STANDARD.decode(blob.encode()).unwrap();
        assert_eq!(raw.len(), 64);
        assert_eq!(&raw[..16], &[1u8; 16]);
        assert_eq!(&raw[16..32], &[2u8; 16]);
        assert_eq!(&raw[32..], &[3u8; 32]);
    }

    #[test]
    fn decode_splits_fields() {
        let blob = EncryptionBlob {
            salt: [9; SALT_LEN],
            iv: [8; IV_LEN],
            ciphertext: vec![7; 16],
            tag: Some([6; TAG_LEN]),
        };
        let parsed = EncryptionBlob::decode(&blob.encode(), Mode::Authenticated).unwrap();
        assert_eq!(parsed, blob);
    }

    #[test]
    fn encoded_form_is_padded_standard_base64() {
        let blob = EncryptionBlob {
            salt: [0xFB; SALT_LEN],
            iv: [0xFF; IV_LEN],
            ciphertext: vec![0xFE; 32],
            tag: None,
        };
        // 64 raw bytes leave one trailing byte, so two padding characters.
        let s = blob.encode();
        assert!(s.ends_with("=="));
        assert!(s.contains('+') && s.contains('/'));
    }

    #[test]
    fn rejects_invalid_base64() {
        assert_eq!(
            EncryptionBlob::decode("not base64!!", Mode::Legacy),
            Err(DecryptError::Malformed)
        );
    }

    #[test]
    fn rejects_unpadded_base64() {
        // 64 bytes is a valid legacy length but needs two padding characters.
        let s = raw_b64(64);
        let unpadded = s.trim_end_matches('=');
        assert_eq!(
            EncryptionBlob::decode(unpadded, Mode::Legacy),
            Err(DecryptError::Malformed)
        );
    }

    #[test]
    fn rejects_short_blobs() {
        for len in [0, 16, 31, 32, 47] {
            assert_eq!(
                EncryptionBlob::decode(&raw_b64(len), Mode::Legacy),
                Err(DecryptError::Malformed),
                "length {len}"
            );
        }
    }

    #[test]
    fn rejects_unaligned_ciphertext() {
        for len in [49, 50, 63, 65] {
            assert_eq!(
                EncryptionBlob::decode(&raw_b64(len), Mode::Legacy),
                Err(DecryptError::Malformed),
                "length {len}"
            );
        }
    }

    #[test]
    fn accepts_minimal_legacy_blob() {
        let parsed = EncryptionBlob::decode(&raw_b64(48), Mode::Legacy).unwrap();
        assert_eq!(parsed.ciphertext.len(), 16);
        assert!(parsed.tag.is_none());
    }

    #[test]
    fn authenticated_requires_tag_room() {
        assert_eq!(
            EncryptionBlob::decode(&raw_b64(48), Mode::Authenticated),
            Err(DecryptError::Malformed)
        );
        assert_eq!(
            EncryptionBlob::decode(&raw_b64(64), Mode::Authenticated),
            Err(DecryptError::Malformed)
        );
        let parsed = EncryptionBlob::decode(&raw_b64(80), Mode::Authenticated).unwrap();
        assert_eq!(parsed.ciphertext.len(), 16);
        assert!(parsed.tag.is_some());
    }
}
