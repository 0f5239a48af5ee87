//! Vault module — blinded, encrypted credential storage.
//!
//! This module provides:
//! - `LookupToken`, the HMAC stand-in for a domain name (`token`)
//! - `Record`, a padded AES-GCM sealed value (`record`)
//! - `VaultStore`, the ordered token -> record map (`store`)
//! - JSON document format with SHA-256 digest verification (`format`)

pub mod format;
pub mod record;
pub mod store;
pub mod token;

// Re-export the most commonly used items.
pub use format::{dump_vault, parse_vault, Metadata, VaultDump, VAULT_VERSION};
pub use record::{Record, MAX_PW_LEN_BYTES};
pub use store::VaultStore;
pub use token::LookupToken;
