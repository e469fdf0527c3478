//! `encnote read` — decrypt a note and print it to stdout.

use std::io::{self, Write};
use std::path::Path;

use crate::cli::output::NOTE_BANNER;
use crate::cli::{prompt_password, Cli};
use crate::envelope::{self, Envelope};
use crate::errors::Result;
use crate::store;

/// Execute the `read` command.
pub fn execute(cli: &Cli, file: &str, raw: bool) -> Result<()> {
    let path = Path::new(file);
    let settings = cli.settings()?;

    // Reject non-envelopes before prompting for a password.
    let data = store::read_envelope(path)?;
    let parsed = Envelope::parse(&data)?;

    let password = prompt_password()?;
    let note = envelope::open_envelope(&parsed, password.as_bytes())?;

    let mut stdout = io::stdout().lock();
    if settings.banner && !raw {
        writeln!(stdout, "{NOTE_BANNER}")?;
        stdout.write_all(&note)?;
        if !note.ends_with(b"\n") {
            writeln!(stdout)?;
        }
    } else {
        stdout.write_all(&note)?;
    }
    stdout.flush()?;

    Ok(())
}
