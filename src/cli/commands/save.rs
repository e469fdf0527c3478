//! `encnote save` — encrypt a note and write it to disk.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::Path;

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{prompt_new_password, Cli, PASSWORD_ENV};
use crate::envelope::{self, FormatVersion};
use crate::errors::{NoteError, Result};
use crate::store;

/// Execute the `save` command.
pub fn execute(
    cli: &Cli,
    file: &str,
    input: Option<&str>,
    format: Option<FormatVersion>,
    force: bool,
) -> Result<()> {
    let path = Path::new(file);
    let settings = cli.settings()?;

    // 1. Fail before asking for anything if we would clobber a file.
    if path.exists() && !force {
        output::tip("Pass --force to overwrite it.");
        return Err(NoteError::NoteAlreadyExists(path.to_path_buf()));
    }

    // 2. Collect the note body.
    let note = match input {
        Some(src) => Zeroizing::new(fs::read(src)?),
        None => read_note_from_stdin()?,
    };

    // 3. Ask for the password (with confirmation).
    let password = prompt_new_password(&settings, PASSWORD_ENV)?;

    // 4. Encrypt and write atomically.
    let version = format.unwrap_or(settings.default_format);
    let blob = envelope::encode_with(&note, password.as_bytes(), version)?;
    store::write_envelope(path, &blob, force)?;

    tracing::info!(path = %path.display(), format = %version, "saved note");
    output::success(&format!("Saved encrypted note to {}", path.display()));

    Ok(())
}

/// Read stdin to EOF, prompting first when a person is typing.
fn read_note_from_stdin() -> Result<Zeroizing<Vec<u8>>> {
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        output::info("Enter note (Ctrl+D to finish):");
    }

    let mut note = Zeroizing::new(Vec::new());
    stdin.read_to_end(&mut note)?;
    Ok(note)
}
