//! Blinded lookup tokens.
//!
//! A domain name is never stored.  Its place in the vault is taken by
//! `HMAC-SHA256(mac_key, domain)`, written as base64 in the document.

use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::crypto::digest::{hmac_sha256, DIGEST_LEN};
use crate::errors::{KeychainError, Result};

/// Length of a lookup token in bytes.
pub const TOKEN_LEN: usize = DIGEST_LEN;

/// Opaque stand-in for a domain name, keyed by the session's MAC key.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LookupToken([u8; TOKEN_LEN]);

impl LookupToken {
    /// Blind `domain` under `mac_key`.
    ///
    /// Deterministic: the same key and domain always give the same token.
    pub fn for_domain(mac_key: &[u8], domain: &str) -> Result<Self> {
        hmac_sha256(mac_key, domain.as_bytes()).map(Self)
    }

    pub fn as_bytes(&self) -> &[u8; TOKEN_LEN] {
        &self.0
    }

    pub fn to_base64(&self) -> String {
        BASE64.encode(self.0)
    }

    /// Parse a token from its document form.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let bytes = BASE64
            .decode(encoded)
            .map_err(|e| KeychainError::InvalidFormat(format!("lookup token: {e}")))?;
        let raw: [u8; TOKEN_LEN] = bytes.try_into().map_err(|b: Vec<u8>| {
            KeychainError::InvalidFormat(format!(
                "lookup token must be {TOKEN_LEN} bytes, got {}",
                b.len()
            ))
        })?;
        Ok(Self(raw))
    }
}

impl fmt::Debug for LookupToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LookupToken({})", self.to_base64())
    }
}

impl Serialize for LookupToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for LookupToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_base64(&s).map_err(serde::de::Error::custom)
    }
}
