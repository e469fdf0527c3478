use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in encnote.
#[derive(Debug, Error)]
pub enum NoteError {
    // --- Envelope errors ---
    #[error("Not a valid encrypted note: {0}")]
    Malformed(String),

    #[error("Decryption failed (wrong password or corrupt file)")]
    DecryptionFailed,

    #[error("Unknown note format '{0}' (supported: v1, v2)")]
    UnknownFormat(String),

    // --- Crypto errors ---
    #[error("Secure random source unavailable: {0}")]
    RandomnessUnavailable(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    // --- Storage errors ---
    #[error("Note not found at {0}")]
    NoteNotFound(PathBuf),

    #[error("Note already exists at {0} (use --force to overwrite)")]
    NoteAlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),
}

impl NoteError {
    /// Process exit code for this error.
    ///
    /// A failed decryption exits with `2` so scripts can tell it apart
    /// from usage and I/O problems, which exit with `1`.
    pub fn exit_code(&self) -> i32 {
        match self {
            NoteError::DecryptionFailed => 2,
            _ => 1,
        }
    }
}

/// Convenience type alias for encnote results.
pub type Result<T> = std::result::Result<T, NoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decryption_failure_has_distinct_exit_code() {
        assert_eq!(NoteError::DecryptionFailed.exit_code(), 2);
        assert_eq!(NoteError::Malformed("too short".into()).exit_code(), 1);
        assert_eq!(NoteError::PasswordTooShort(8).exit_code(), 1);
    }

    #[test]
    fn decryption_failure_message_is_generic() {
        let msg = NoteError::DecryptionFailed.to_string();
        assert!(msg.contains("wrong password or corrupt file"));
        assert!(!msg.to_lowercase().contains("padding"));
    }
}
