//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::envelope::EnvelopeInfo;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message to stderr: "info_sign {msg}"
///
/// Goes to stderr so it never mixes with a note written to stdout.
pub fn info(msg: &str) {
    eprintln!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    eprintln!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// The banner printed above a decrypted note.
pub const NOTE_BANNER: &str = "---- SECRET NOTE ----";

/// Build the table shown by `encnote info`.
pub fn envelope_table(info: &EnvelopeInfo) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Field", "Value"]);

    let authenticated = if info.authenticated { "yes" } else { "no" };
    table.add_row(vec!["Format".to_string(), info.format.to_string()]);
    table.add_row(vec!["Authenticated".to_string(), authenticated.to_string()]);
    table.add_row(vec!["Salt".to_string(), info.salt.clone()]);
    table.add_row(vec![
        "Ciphertext".to_string(),
        format!("{} bytes", info.ciphertext_len),
    ]);
    table.add_row(vec!["Total".to_string(), format!("{} bytes", info.total_len)]);

    table
}

/// Print the envelope details table.
pub fn print_envelope_table(info: &EnvelopeInfo) {
    println!("{}", envelope_table(info));
}
