//! AES-256-CBC with PKCS#7 padding, plus the HMAC-SHA256 tag used by the
//! authenticated format.

use aes::cipher::{
    block_padding::Pkcs7, generic_array::GenericArray, BlockDecryptMut, BlockEncryptMut,
    KeyIvInit,
};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::DecryptError;
use crate::{IV_LEN, KEY_LEN, TAG_LEN};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;
type HmacSha256 = Hmac<Sha256>;

/// Pad `plaintext` with PKCS#7 and encrypt it. The output length is always a
/// positive multiple of 16; an empty input yields one full padding block.
pub fn encrypt_cbc(plaintext: &[u8], key: &[u8; KEY_LEN], iv: &[u8; IV_LEN]) -> Vec<u8> {
    Aes256CbcEnc::new(GenericArray::from_slice(key), GenericArray::from_slice(iv))
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext)
}

/// Decrypt and strip PKCS#7 padding.
///
/// # Errors
///
/// Returns [`DecryptError::AuthenticationFailed`] for any invalid padding
/// trailer or a ciphertext that is not block aligned.
pub fn decrypt_cbc(
    ciphertext: &[u8],
    key: &[u8; KEY_LEN],
    iv: &[u8; IV_LEN],
) -> Result<Vec<u8>, DecryptError> {
    Aes256CbcDec::new(GenericArray::from_slice(key), GenericArray::from_slice(iv))
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| DecryptError::AuthenticationFailed)
}

/// Compute the HMAC-SHA256 tag over the concatenation of `parts`.
pub fn compute_tag(mac_key: &[u8; KEY_LEN], parts: &[&[u8]]) -> [u8; TAG_LEN] {
    let mut mac = keyed_mac(mac_key);
    for part in parts {
        mac.update(part);
    }
    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(&mac.finalize().into_bytes());
    tag
}

/// Verify `tag` against the HMAC-SHA256 of `parts` in constant time.
///
/// # Errors
///
/// Returns [`DecryptError::AuthenticationFailed`] on mismatch.
pub fn verify_tag(
    mac_key: &[u8; KEY_LEN],
    parts: &[&[u8]],
    tag: &[u8; TAG_LEN],
) -> Result<(), DecryptError> {
    let mut mac = keyed_mac(mac_key);
    for part in parts {
        mac.update(part);
    }
    mac.verify_slice(tag)
        .map_err(|_| DecryptError::AuthenticationFailed)
}

fn keyed_mac(mac_key: &[u8; KEY_LEN]) -> HmacSha256 {
    <HmacSha256 as Mac>::new_from_slice(mac_key)
        .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"))
}
