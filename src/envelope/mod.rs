//! Envelope module — the on-disk format of an encrypted note.
//!
//! This module provides:
//! - The binary layout, magic markers and `Envelope` type (`format`)
//! - `encode` / `decode` tying key derivation and ciphers together (`codec`)

pub mod codec;
pub mod format;

// Re-export the most commonly used items.
pub use codec::{decode, encode, encode_with, inspect, open_envelope, EnvelopeInfo};
pub use format::{Envelope, FormatVersion, HEADER_LEN, MAGIC_LEN, MAGIC_V1, MAGIC_V2};
