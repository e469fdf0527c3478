//! AES-256-GCM authenticated encryption (format v2).
//!
//! The envelope header (magic and salt) is passed as associated data, so
//! any change to the header or the ciphertext fails the tag check.
//!
//! Output layout: `[ ciphertext | 16-byte auth tag ]`.  The nonce is not
//! stored: it is taken from the derived IV, and the per-envelope salt
//! makes each (key, nonce) pair unique.

use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use zeroize::Zeroizing;

use super::kdf::{IV_LEN, KEY_LEN};
use crate::errors::{NoteError, Result};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// The nonce for a given derived IV: its first 12 bytes.
pub fn nonce_from_iv(iv: &[u8; IV_LEN]) -> [u8; NONCE_LEN] {
    let mut nonce = [0u8; NONCE_LEN];
    nonce.copy_from_slice(&iv[..NONCE_LEN]);
    nonce
}

/// Encrypt and authenticate `plaintext`, binding `aad`.
pub fn seal(
    plaintext: &[u8],
    key: &[u8; KEY_LEN],
    iv: &[u8; IV_LEN],
    aad: &[u8],
) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| NoteError::EncryptionFailed(format!("invalid key length: {e}")))?;
    let nonce = nonce_from_iv(iv);

    let mut buffer = Vec::with_capacity(plaintext.len() + TAG_LEN);
    buffer.extend_from_slice(plaintext);
    cipher
        .encrypt_in_place(Nonce::from_slice(&nonce), aad, &mut buffer)
        .map_err(|e| NoteError::EncryptionFailed(format!("encryption error: {e}")))?;

    Ok(buffer)
}

/// Verify and decrypt data produced by `seal`.
///
/// The tag is checked before anything is decrypted, so a failure never
/// exposes plaintext.
pub fn open(
    ciphertext: &[u8],
    key: &[u8; KEY_LEN],
    iv: &[u8; IV_LEN],
    aad: &[u8],
) -> Result<Zeroizing<Vec<u8>>> {
    if ciphertext.len() < TAG_LEN {
        return Err(NoteError::DecryptionFailed);
    }

    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| NoteError::DecryptionFailed)?;
    let nonce = nonce_from_iv(iv);

    let mut buffer = Zeroizing::new(ciphertext.to_vec());
    cipher
        .decrypt_in_place(Nonce::from_slice(&nonce), aad, &mut *buffer)
        .map_err(|_| NoteError::DecryptionFailed)?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; KEY_LEN] = [0x11; KEY_LEN];
    const IV: [u8; IV_LEN] = [0x22; IV_LEN];

    #[test]
    fn seal_open_roundtrip() {
        let ct = seal(b"meeting at noon", &KEY, &IV, b"hdr").unwrap();
        assert_eq!(ct.len(), 15 + TAG_LEN);
        let pt = open(&ct, &KEY, &IV, b"hdr").unwrap();
        assert_eq!(pt.as_slice(), b"meeting at noon");
    }

    #[test]
    fn empty_plaintext_is_just_a_tag() {
        let ct = seal(b"", &KEY, &IV, b"hdr").unwrap();
        assert_eq!(ct.len(), TAG_LEN);
        assert!(open(&ct, &KEY, &IV, b"hdr").unwrap().is_empty());
    }

    #[test]
    fn changed_aad_fails() {
        let ct = seal(b"x", &KEY, &IV, b"hdr").unwrap();
        assert!(matches!(
            open(&ct, &KEY, &IV, b"HDR"),
            Err(NoteError::DecryptionFailed)
        ));
    }

    #[test]
    fn flipped_bit_fails() {
        let mut ct = seal(b"abc", &KEY, &IV, b"").unwrap();
        ct[0] ^= 0x01;
        assert!(matches!(
            open(&ct, &KEY, &IV, b""),
            Err(NoteError::DecryptionFailed)
        ));
    }

    #[test]
    fn short_input_fails() {
        assert!(matches!(
            open(&[0u8; TAG_LEN - 1], &KEY, &IV, b""),
            Err(NoteError::DecryptionFailed)
        ));
    }

    #[test]
    fn nonce_is_iv_prefix() {
        let iv: [u8; IV_LEN] = core::array::from_fn(|i| i as u8);
        let expected: [u8; NONCE_LEN] = core::array::from_fn(|i| i as u8);
        assert_eq!(nonce_from_iv(&iv), expected);
    }
}
