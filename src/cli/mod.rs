//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::envelope::FormatVersion;
use crate::errors::{NoteError, Result};

/// Environment variable holding the note password (scripts and CI).
pub const PASSWORD_ENV: &str = "ENCNOTE_PASSWORD";

/// Environment variable holding the replacement password for `rekey`.
pub const NEW_PASSWORD_ENV: &str = "ENCNOTE_NEW_PASSWORD";

/// encnote CLI: password-protected encrypted notes.
#[derive(Parser)]
#[command(
    name = "encnote",
    about = "Password-protected encrypted notes",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory containing .encnote.toml (default: current directory)
    #[arg(long, global = true, env = "ENCNOTE_CONFIG_DIR")]
    pub config_dir: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Encrypt a note (read from stdin or --input) and save it
    Save {
        /// Destination file
        file: String,

        /// Read the note from this file instead of stdin
        #[arg(short, long)]
        input: Option<String>,

        /// Envelope format: v1 (compatible, default) or v2 (authenticated)
        #[arg(long)]
        format: Option<FormatVersion>,

        /// Overwrite the destination if it exists
        #[arg(short, long)]
        force: bool,
    },

    /// Decrypt a note and print it
    Read {
        /// Encrypted note file
        file: String,

        /// Print only the note, without the banner
        #[arg(long)]
        raw: bool,
    },

    /// Re-encrypt a note under a new password
    Rekey {
        /// Encrypted note file
        file: String,

        /// Envelope format for the re-encrypted note (default: keep current)
        #[arg(long)]
        format: Option<FormatVersion>,
    },

    /// Show envelope details (no password needed)
    Info {
        /// Encrypted note file
        file: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

impl Cli {
    /// Load settings from `--config-dir`, or the current directory.
    pub fn settings(&self) -> Result<Settings> {
        let dir = match &self.config_dir {
            Some(dir) => PathBuf::from(dir),
            None => std::env::current_dir()?,
        };
        Settings::load(&dir)
    }
}

/// Get the password for an existing note, trying in order:
/// 1. `ENCNOTE_PASSWORD` env var (scripts/CI)
/// 2. Interactive prompt (no echo)
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env(PASSWORD_ENV) {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Password")
        .allow_empty_password(true)
        .interact()
        .map_err(|e| NoteError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new password, confirming it when configured to.
///
/// `env_var` is checked first for scripted use.  Enforces
/// `settings.min_password_len` either way.
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_new_password(settings: &Settings, env_var: &str) -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env(env_var) {
        check_password_len(&pw, settings.min_password_len)?;
        return Ok(pw);
    }

    loop {
        let mut prompt = dialoguer::Password::new().with_prompt("New password");
        if settings.confirm_password {
            prompt =
                prompt.with_confirmation("Confirm password", "Passwords do not match, try again");
        }
        let password = Zeroizing::new(
            prompt
                .interact()
                .map_err(|e| NoteError::CommandFailed(format!("password prompt: {e}")))?,
        );

        if let Err(e) = check_password_len(&password, settings.min_password_len) {
            output::warning(&format!("{e}. Try again."));
            continue;
        }

        return Ok(password);
    }
}

fn password_from_env(var: &str) -> Option<Zeroizing<String>> {
    std::env::var(var)
        .ok()
        .filter(|pw| !pw.is_empty())
        .map(Zeroizing::new)
}

/// Reject passwords shorter than `min_len` characters.
pub fn check_password_len(password: &str, min_len: usize) -> Result<()> {
    if password.chars().count() < min_len {
        return Err(NoteError::PasswordTooShort(min_len));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn password_length_is_counted_in_chars() {
        assert!(check_password_len("12345678", 8).is_ok());
        assert!(check_password_len("ééééééé", 8).is_err());
        assert!(check_password_len("éééééééé", 8).is_ok());
    }

    #[test]
    fn short_password_rejected() {
        assert!(matches!(
            check_password_len("short", 8),
            Err(NoteError::PasswordTooShort(8))
        ));
    }

    #[test]
    fn zero_min_len_allows_empty() {
        assert!(check_password_len("", 0).is_ok());
    }

    #[test]
    fn save_parses_format_flag() {
        let cli = Cli::try_parse_from(["encnote", "save", "n.note", "--format", "v2"]).unwrap();
        match cli.command {
            Commands::Save { format, force, .. } => {
                assert_eq!(format, Some(FormatVersion::V2));
                assert!(!force);
            }
            _ => panic!("expected save"),
        }
    }

    #[test]
    fn save_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["encnote", "save", "n.note", "--format", "v9"]).is_err());
    }
}
