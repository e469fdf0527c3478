use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::envelope::FormatVersion;
use crate::errors::{NoteError, Result};

/// User configuration, loaded from `.encnote.toml`.
///
/// Every field has a sensible default so encnote works out-of-the-box
/// without any config file at all.  KDF parameters are not here: they
/// belong to the envelope format version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Format used by `save` when `--format` is not given.  `rekey` keeps
    /// the note's current format instead.
    #[serde(default)]
    pub default_format: FormatVersion,

    /// Minimum length for a new password chosen at the prompt.
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,

    /// Ask for the new password twice.
    #[serde(default = "default_true")]
    pub confirm_password: bool,

    /// Print the `---- SECRET NOTE ----` banner before a decrypted note.
    #[serde(default = "default_true")]
    pub banner: bool,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_min_password_len() -> usize {
    8
}

fn default_true() -> bool {
    true
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_format: FormatVersion::default(),
            min_password_len: default_min_password_len(),
            confirm_password: default_true(),
            banner: default_true(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the config directory.
    pub const FILE_NAME: &'static str = ".encnote.toml";

    /// Load settings from `<config_dir>/.encnote.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            NoteError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        tracing::debug!(path = %config_path.display(), "loaded settings");
        Ok(settings)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
