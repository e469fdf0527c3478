//! Binary envelope layout.
//!
//! An encrypted note file has this layout:
//!
//! ```text
//! [magic: 9 bytes][salt: 16 bytes][ciphertext: N bytes]
//! ```
//!
//! - **Magic** (`NOTEPADv1` or `NOTEPADv2`): identifies the file and
//!   its format version.  The version fixes the KDF parameters and the
//!   cipher together.
//! - **Salt**: random per encryption, fed to PBKDF2.
//! - **Ciphertext**: AES-256-CBC output for v1 (a positive multiple of
//!   16 bytes), AES-256-GCM ciphertext and tag for v2.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::crypto::kdf::SALT_LEN;
use crate::errors::{NoteError, Result};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Length of the magic marker.
pub const MAGIC_LEN: usize = 9;

/// Magic for the unauthenticated CBC format.
pub const MAGIC_V1: &[u8; MAGIC_LEN] = b"NOTEPADv1";

/// Magic for the authenticated GCM format.
pub const MAGIC_V2: &[u8; MAGIC_LEN] = b"NOTEPADv2";

/// Fixed-size prefix: 9 (magic) + 16 (salt).
pub const HEADER_LEN: usize = MAGIC_LEN + SALT_LEN;

// ---------------------------------------------------------------------------
// FormatVersion
// ---------------------------------------------------------------------------

/// Envelope format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatVersion {
    /// PBKDF2 + AES-256-CBC.  The compatible baseline.
    #[default]
    V1,
    /// PBKDF2 + AES-256-GCM with the header as associated data.
    V2,
}

impl FormatVersion {
    /// The magic marker written for this version.
    pub fn magic(self) -> &'static [u8; MAGIC_LEN] {
        match self {
            FormatVersion::V1 => MAGIC_V1,
            FormatVersion::V2 => MAGIC_V2,
        }
    }

    /// Identify a version from the leading bytes of a file.
    pub fn from_magic(magic: &[u8]) -> Option<Self> {
        if magic == MAGIC_V1 {
            Some(FormatVersion::V1)
        } else if magic == MAGIC_V2 {
            Some(FormatVersion::V2)
        } else {
            None
        }
    }

    /// Whether envelopes of this version carry an authentication tag.
    pub fn is_authenticated(self) -> bool {
        matches!(self, FormatVersion::V2)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FormatVersion::V1 => "v1",
            FormatVersion::V2 => "v2",
        }
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatVersion {
    type Err = NoteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "v1" | "1" => Ok(FormatVersion::V1),
            "v2" | "2" => Ok(FormatVersion::V2),
            other => Err(NoteError::UnknownFormat(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// The bytes `magic || salt` for a given version and salt.
pub fn header_bytes(version: FormatVersion, salt: &[u8; SALT_LEN]) -> [u8; HEADER_LEN] {
    let mut header = [0u8; HEADER_LEN];
    header[..MAGIC_LEN].copy_from_slice(version.magic());
    header[MAGIC_LEN..].copy_from_slice(salt);
    header
}

/// A parsed (or freshly built) envelope.  Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    version: FormatVersion,
    salt: [u8; SALT_LEN],
    ciphertext: Vec<u8>,
}

impl Envelope {
    pub fn new(version: FormatVersion, salt: [u8; SALT_LEN], ciphertext: Vec<u8>) -> Self {
        Self {
            version,
            salt,
            ciphertext,
        }
    }

    /// Split a raw file into its fields.
    ///
    /// Fails with `Malformed` if the data is shorter than the header or
    /// does not start with a known magic.  The ciphertext is not checked
    /// here: a bad ciphertext is a decryption failure, not a framing one.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_LEN {
            return Err(NoteError::Malformed(format!(
                "file is {} bytes, need at least {HEADER_LEN}",
                data.len()
            )));
        }

        let version = FormatVersion::from_magic(&data[..MAGIC_LEN])
            .ok_or_else(|| NoteError::Malformed("missing NOTEPAD magic bytes".into()))?;

        let mut salt = [0u8; SALT_LEN];
        salt.copy_from_slice(&data[MAGIC_LEN..HEADER_LEN]);

        Ok(Self {
            version,
            salt,
            ciphertext: data[HEADER_LEN..].to_vec(),
        })
    }

    /// Serialize to `magic || salt || ciphertext`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        buf.extend_from_slice(&self.header()); // 25 bytes
        buf.extend_from_slice(&self.ciphertext);
        buf
    }

    /// The serialized `magic || salt` prefix.
    pub fn header(&self) -> [u8; HEADER_LEN] {
        header_bytes(self.version, &self.salt)
    }

    pub fn version(&self) -> FormatVersion {
        self.version
    }

    pub fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Total serialized length.
    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + self.ciphertext.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_is_25_bytes() {
        assert_eq!(HEADER_LEN, 25);
        assert_eq!(MAGIC_V1.len(), 9);
    }

    #[test]
    fn parse_splits_fields_at_fixed_offsets() {
        let mut data = MAGIC_V1.to_vec();
        data.extend_from_slice(&[0xAA; SALT_LEN]);
        data.extend_from_slice(&[0xBB; 32]);

        let env = Envelope::parse(&data).unwrap();
        assert_eq!(env.version(), FormatVersion::V1);
        assert_eq!(env.salt(), &[0xAA; SALT_LEN]);
        assert_eq!(env.ciphertext(), &[0xBB; 32]);
        assert_eq!(env.to_bytes(), data);
        assert_eq!(env.encoded_len(), data.len());
    }

    #[test]
    fn parse_accepts_header_only() {
        let mut data = MAGIC_V2.to_vec();
        data.extend_from_slice(&[0u8; SALT_LEN]);
        let env = Envelope::parse(&data).unwrap();
        assert_eq!(env.version(), FormatVersion::V2);
        assert!(env.ciphertext().is_empty());
    }

    #[test]
    fn parse_rejects_short_input() {
        for n in 0..HEADER_LEN {
            let mut data = MAGIC_V1.to_vec();
            data.resize(HEADER_LEN, 0);
            data.truncate(n);
            assert!(matches!(Envelope::parse(&data), Err(NoteError::Malformed(_))));
        }
    }

    #[test]
    fn parse_rejects_unknown_magic() {
        let mut data = b"NOTEPADv9".to_vec();
        data.extend_from_slice(&[0u8; 32]);
        assert!(matches!(Envelope::parse(&data), Err(NoteError::Malformed(_))));
    }

    #[test]
    fn format_version_parses_from_str() {
        assert_eq!("v1".parse::<FormatVersion>().unwrap(), FormatVersion::V1);
        assert_eq!("V2".parse::<FormatVersion>().unwrap(), FormatVersion::V2);
        assert!(matches!(
            "v3".parse::<FormatVersion>(),
            Err(NoteError::UnknownFormat(_))
        ));
    }

    #[test]
    fn format_version_magic_roundtrip() {
        for v in [FormatVersion::V1, FormatVersion::V2] {
            assert_eq!(FormatVersion::from_magic(v.magic()), Some(v));
        }
    }
}
