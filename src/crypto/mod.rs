//! Cryptographic primitives for the keychain.
//!
//! This module provides:
//! - AES-128-GCM authenticated encryption with associated data (`encryption`)
//! - SHA-256, HMAC-SHA256 and constant-time digest comparison (`digest`)
//! - Argon2id password-based key derivation over a fixed salt (`kdf`)
//! - The encryption/MAC key pair held by a session (`keys`)

pub mod digest;
pub mod encryption;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{CipherContext, derive_master_secrets, ...};
pub use digest::{digests_match, hmac_sha256, sha256, sha256_base64};
pub use encryption::{CipherContext, Sealed};
pub use kdf::{derive_master_secrets, Argon2Params};
pub use keys::MasterSecrets;
