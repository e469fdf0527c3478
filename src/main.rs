use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use encnote::cli::{Cli, Commands};

/// Environment variable controlling log verbosity (e.g. `ENCNOTE_LOG=debug`).
const LOG_ENV: &str = "ENCNOTE_LOG";

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Save {
            ref file,
            ref input,
            format,
            force,
        } => encnote::cli::commands::save::execute(&cli, file, input.as_deref(), format, force),
        Commands::Read { ref file, raw } => encnote::cli::commands::read::execute(&cli, file, raw),
        Commands::Rekey { ref file, format } => {
            encnote::cli::commands::rekey::execute(&cli, file, format)
        }
        Commands::Info { ref file, json } => encnote::cli::commands::info::execute(file, json),
        Commands::Completions { shell } => encnote::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        encnote::cli::output::error(&e.to_string());
        std::process::exit(e.exit_code());
    }
}
