//! One module per subcommand, each exposing an `execute` function.

pub mod completions;
pub mod info;
pub mod read;
pub mod rekey;
pub mod save;
