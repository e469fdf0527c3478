//! `encnote info` — describe an envelope without decrypting it.

use std::path::Path;

use crate::cli::output;
use crate::envelope;
use crate::errors::{NoteError, Result};
use crate::store;

/// Execute the `info` command.
pub fn execute(file: &str, json: bool) -> Result<()> {
    let path = Path::new(file);
    let data = store::read_envelope(path)?;
    let info = envelope::inspect(&data)?;

    if json {
        let rendered = serde_json::to_string_pretty(&info)
            .map_err(|e| NoteError::SerializationError(format!("envelope info: {e}")))?;
        println!("{rendered}");
    } else {
        output::print_envelope_table(&info);
        if !info.authenticated {
            output::warning("This format is not authenticated: tampering may go undetected.");
        }
    }

    Ok(())
}
