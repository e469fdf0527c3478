//! Encode a note into an envelope and decode it back.
//!
//! Encode: fresh salt -> PBKDF2 -> cipher -> `magic || salt || ciphertext`.
//! Decode: parse -> PBKDF2 with the stored salt -> cipher open.
//!
//! Both directions are single-shot and keep no state between calls.

use serde::Serialize;
use tracing::debug;
use zeroize::Zeroizing;

use crate::crypto::{aead, cipher, kdf};
use crate::errors::Result;

use super::format::{header_bytes, Envelope, FormatVersion};

/// Encrypt `plaintext` under `password` into a v1 envelope.
pub fn encode(plaintext: &[u8], password: &[u8]) -> Result<Vec<u8>> {
    encode_with(plaintext, password, FormatVersion::V1)
}

/// Encrypt `plaintext` under `password` using an explicit format version.
///
/// A new salt is drawn on every call, so encoding the same note twice
/// never yields the same bytes.
pub fn encode_with(plaintext: &[u8], password: &[u8], version: FormatVersion) -> Result<Vec<u8>> {
    let salt = kdf::generate_salt()?;
    let material = kdf::derive(password, &salt)?;

    let ciphertext = match version {
        FormatVersion::V1 => cipher::seal(plaintext, material.key(), material.iv()),
        FormatVersion::V2 => {
            let aad = header_bytes(version, &salt);
            aead::seal(plaintext, material.key(), material.iv(), &aad)?
        }
    };

    let envelope = Envelope::new(version, salt, ciphertext);
    debug!(
        version = %version,
        plaintext_len = plaintext.len(),
        envelope_len = envelope.encoded_len(),
        "encoded note"
    );

    Ok(envelope.to_bytes())
}

/// Decrypt an envelope produced by `encode` or `encode_with`.
///
/// `Malformed` means the bytes are not an envelope at all.
/// `DecryptionFailed` covers a wrong password and a damaged ciphertext
/// alike; the two cannot be told apart.
pub fn decode(blob: &[u8], password: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    let envelope = Envelope::parse(blob)?;
    open_envelope(&envelope, password)
}

/// Decrypt an already-parsed envelope.
pub fn open_envelope(envelope: &Envelope, password: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    let material = kdf::derive(password, envelope.salt())?;

    let result = match envelope.version() {
        FormatVersion::V1 => cipher::open(envelope.ciphertext(), material.key(), material.iv()),
        FormatVersion::V2 => aead::open(
            envelope.ciphertext(),
            material.key(),
            material.iv(),
            &envelope.header(),
        ),
    };

    match &result {
        Ok(plaintext) => debug!(
            version = %envelope.version(),
            plaintext_len = plaintext.len(),
            "decoded note"
        ),
        Err(_) => debug!(version = %envelope.version(), "note did not decrypt"),
    }

    result
}

/// Password-free summary of an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvelopeInfo {
    pub format: FormatVersion,
    pub authenticated: bool,
    /// Salt, lowercase hex.
    pub salt: String,
    pub ciphertext_len: usize,
    pub total_len: usize,
}

/// Describe an envelope without decrypting it.
pub fn inspect(blob: &[u8]) -> Result<EnvelopeInfo> {
    let envelope = Envelope::parse(blob)?;
    Ok(EnvelopeInfo {
        format: envelope.version(),
        authenticated: envelope.version().is_authenticated(),
        salt: hex::encode(envelope.salt()),
        ciphertext_len: envelope.ciphertext().len(),
        total_len: envelope.encoded_len(),
    })
}
