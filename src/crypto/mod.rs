//! Cryptographic primitives for encnote.
//!
//! This module provides:
//! - PBKDF2-HMAC-SHA256 key and IV derivation plus salt generation (`kdf`)
//! - AES-256-CBC with PKCS#7 padding for the v1 format (`cipher`)
//! - AES-256-GCM authenticated encryption for the v2 format (`aead`)

pub mod aead;
pub mod cipher;
pub mod kdf;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{derive, generate_salt, seal, open};
pub use cipher::{open, seal};
pub use kdf::{derive, generate_salt, KeyMaterial};
