//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! A single derivation yields 48 bytes: the first 32 are the AES-256
//! key, the last 16 the IV.  The iteration count and output length are
//! fixed by the envelope format version, never by configuration.

use std::fmt;

use hmac::Hmac;
use pbkdf2::pbkdf2;
use rand::rngs::OsRng;
use rand::TryRngCore;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::errors::{NoteError, Result};

/// Length of the salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Length of the symmetric key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// Length of the IV in bytes (one AES block).
pub const IV_LEN: usize = 16;

/// Total derived output: key followed by IV.
pub const KEY_MATERIAL_LEN: usize = KEY_LEN + IV_LEN;

/// PBKDF2 iteration count shared by every format version.
pub const PBKDF2_ITERATIONS: u32 = 10_000;

/// Key and IV derived from a password and salt.
///
/// Zeroed when dropped, so it is wiped on every exit path.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial {
    key: [u8; KEY_LEN],
    iv: [u8; IV_LEN],
}

impl KeyMaterial {
    /// The 32-byte cipher key.
    pub fn key(&self) -> &[u8; KEY_LEN] {
        &self.key
    }

    /// The 16-byte initialization vector.
    pub fn iv(&self) -> &[u8; IV_LEN] {
        &self.iv
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KeyMaterial([REDACTED])")
    }
}

/// Derive 48 bytes of key material from `password` and `salt`.
///
/// The same password and salt always produce the same output.  An empty
/// password is accepted.
pub fn derive(password: &[u8], salt: &[u8; SALT_LEN]) -> Result<KeyMaterial> {
    let mut okm = Zeroizing::new([0u8; KEY_MATERIAL_LEN]);

    pbkdf2::<Hmac<Sha256>>(password, salt, PBKDF2_ITERATIONS, &mut okm[..])
        .map_err(|e| NoteError::KeyDerivationFailed(format!("PBKDF2 failed: {e}")))?;

    let mut material = KeyMaterial {
        key: [0u8; KEY_LEN],
        iv: [0u8; IV_LEN],
    };
    material.key.copy_from_slice(&okm[..KEY_LEN]);
    material.iv.copy_from_slice(&okm[KEY_LEN..]);

    Ok(material)
}

/// Generate a cryptographically random 16-byte salt from the OS.
///
/// There is no fallback: if the OS source fails the caller gets
/// `RandomnessUnavailable`.
pub fn generate_salt() -> Result<[u8; SALT_LEN]> {
    let mut salt = [0u8; SALT_LEN];
    OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|e| NoteError::RandomnessUnavailable(e.to_string()))?;
    Ok(salt)
}
