//! `encnote rekey` — change the password of an existing note.
//!
//! Decrypts the note with the current password, then encodes it again
//! under the new password with a fresh salt and replaces the file
//! atomically.  The format version is kept unless `--format` is given.

use std::path::Path;

use crate::cli::output;
use crate::cli::{prompt_new_password, prompt_password, Cli, NEW_PASSWORD_ENV};
use crate::envelope::{self, Envelope, FormatVersion};
use crate::errors::Result;
use crate::store;

/// Execute the `rekey` command.
pub fn execute(cli: &Cli, file: &str, format: Option<FormatVersion>) -> Result<()> {
    let path = Path::new(file);
    let settings = cli.settings()?;

    // 1. Open the note with the current password.
    let data = store::read_envelope(path)?;
    let parsed = Envelope::parse(&data)?;
    output::info("Enter the current password.");
    let old_password = prompt_password()?;
    let note = envelope::open_envelope(&parsed, old_password.as_bytes())?;
    drop(old_password);

    // 2. Prompt for the new password.
    output::info("Choose the new password.");
    let new_password = prompt_new_password(&settings, NEW_PASSWORD_ENV)?;

    // 3. Re-encode and replace.
    let version = format.unwrap_or(parsed.version());
    let blob = envelope::encode_with(&note, new_password.as_bytes(), version)?;
    store::write_envelope(path, &blob, true)?;

    tracing::info!(path = %path.display(), from = %parsed.version(), to = %version, "rekeyed note");
    output::success(&format!(
        "Password changed for {} (format {version})",
        path.display()
    ));

    Ok(())
}
