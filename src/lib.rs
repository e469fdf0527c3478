//! Password-protected encrypted notes.
//!
//! The core is [`envelope::encode`] and [`envelope::decode`], which turn a
//! note and a password into a self-describing encrypted blob and back.
//! [`store`] and [`cli`] wrap that core for use from the terminal.

pub mod cli;
pub mod config;
pub mod crypto;
pub mod envelope;
pub mod errors;
pub mod store;
