//! AES-256-CBC with PKCS#7 padding (format v1).
//!
//! `seal` always appends padding, so the output is the plaintext length
//! rounded up to the next block boundary, plus a full block when the
//! plaintext is already aligned.  An empty note seals to one block.
//!
//! This mode provides confidentiality only.  A modified ciphertext block
//! decrypts to garbage, and that garbage is only caught when it happens
//! to break the padding.  Format v2 (`super::aead`) adds authentication.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use zeroize::Zeroizing;

use super::kdf::{IV_LEN, KEY_LEN};
use crate::errors::{NoteError, Result};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// AES block size in bytes.
pub const BLOCK_LEN: usize = 16;

/// Encrypt `plaintext` under `key` and `iv`.
pub fn seal(plaintext: &[u8], key: &[u8; KEY_LEN], iv: &[u8; IV_LEN]) -> Vec<u8> {
    Aes256CbcEnc::new(key.into(), iv.into()).encrypt_padded_vec_mut::<Pkcs7>(plaintext)
}

/// Decrypt `ciphertext` and strip its padding.
///
/// Every failure (empty or unaligned input, ill-formed padding) is
/// reported as the same `DecryptionFailed`, and no partial plaintext is
/// ever returned.  The working buffer is wiped on every path.
pub fn open(
    ciphertext: &[u8],
    key: &[u8; KEY_LEN],
    iv: &[u8; IV_LEN],
) -> Result<Zeroizing<Vec<u8>>> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
        return Err(NoteError::DecryptionFailed);
    }

    let mut buf = Zeroizing::new(ciphertext.to_vec());
    let plaintext_len = Aes256CbcDec::new(key.into(), iv.into())
        .decrypt_padded_mut::<Pkcs7>(&mut buf)
        .map_err(|_| NoteError::DecryptionFailed)?
        .len();
    buf.truncate(plaintext_len);

    Ok(buf)
}
