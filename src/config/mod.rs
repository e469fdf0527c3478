//! Configuration loaded from `.encnote.toml`.

pub mod settings;

pub use settings::Settings;
