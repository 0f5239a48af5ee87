//! Vault document format and digest verification.
//!
//! `dump` produces a JSON document and a companion digest:
//!
//! ```text
//! {"metadata":{"version":"keychain-vault v1"},
//!  "entries":{"<token b64>":{"nonce":"<b64>","ciphertext":"<b64>"}, ...}}
//! ```
//!
//! - **Entries** are keyed by lookup token, in ascending token order.
//! - **Digest**: `base64(SHA-256(document))`, checked before parsing
//!   when the caller supplies one.

use serde::{Deserialize, Serialize};

use super::store::VaultStore;
use crate::crypto::digest::{digests_match, sha256_base64};
use crate::errors::{KeychainError, Result};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// The only document version this crate reads and writes.
pub const VAULT_VERSION: &str = "keychain-vault v1";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Non-secret metadata carried in every document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Metadata {
    pub version: String,
}

/// A serialized vault and its integrity digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultDump {
    /// The JSON document.
    pub document: String,
    /// `base64(SHA-256(document))`.
    pub digest: String,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Serialize `store` and compute the digest over the exact output bytes.
pub fn dump_vault(store: &VaultStore) -> Result<VaultDump> {
    let document = serde_json::to_string(store)
        .map_err(|e| KeychainError::SerializationError(format!("vault: {e}")))?;
    let digest = document_digest(&document);
    Ok(VaultDump { document, digest })
}

/// Verify (optionally) and parse a document produced by `dump_vault`.
///
/// The digest is checked over the raw document text before anything is
/// parsed.  A structurally invalid document or an unknown version is
/// rejected outright; there is no partial recovery.
pub fn parse_vault(document: &str, expected_digest: Option<&str>) -> Result<VaultStore> {
    if let Some(expected) = expected_digest {
        verify_digest(document, expected)?;
    }

    let store: VaultStore = serde_json::from_str(document)
        .map_err(|e| KeychainError::InvalidFormat(format!("vault JSON: {e}")))?;

    let version = &store.metadata().version;
    if version != VAULT_VERSION {
        return Err(KeychainError::UnsupportedVersion(version.clone()));
    }

    Ok(store)
}

/// `base64(SHA-256(document))`.
pub fn document_digest(document: &str) -> String {
    sha256_base64(document.as_bytes())
}

/// Check `expected` against the digest of `document` in constant time.
pub fn verify_digest(document: &str, expected: &str) -> Result<()> {
    if digests_match(&document_digest(document), expected) {
        Ok(())
    } else {
        Err(KeychainError::DigestMismatch)
    }
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded Vec<u8> fields
// ---------------------------------------------------------------------------

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

pub(crate) fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let encoded = BASE64.encode(data);
    serializer.serialize_str(&encoded)
}

pub(crate) fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}
