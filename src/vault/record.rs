//! Encrypted credential records.
//!
//! Every value is padded to a fixed plaintext length before sealing so
//! that all records have the same ciphertext size:
//!
//! ```text
//! [len: 1 byte][value: len bytes][zero fill up to MAX_PW_LEN_BYTES]
//! ```
//!
//! The record's lookup token is passed as AEAD associated data, so a
//! record moved under a different token no longer opens.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, Zeroizing};

use super::format::{base64_decode, base64_encode};
use super::token::LookupToken;
use crate::crypto::encryption::CipherContext;
use crate::errors::{KeychainError, Result};

/// Maximum length of a stored value in bytes.
pub const MAX_PW_LEN_BYTES: usize = 64;

/// Plaintext length of every record after padding.
const PADDED_LEN: usize = MAX_PW_LEN_BYTES + 1;

/// One authenticated-encrypted value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Record {
    /// The 12-byte AES-GCM nonce (base64 in JSON).
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub nonce: Vec<u8>,

    /// Ciphertext followed by the 16-byte tag (base64 in JSON).
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub ciphertext: Vec<u8>,
}

impl Record {
    /// Pad and seal `value` for storage under `token`.
    ///
    /// Values longer than `MAX_PW_LEN_BYTES` are rejected, never truncated.
    pub fn seal(cipher: &CipherContext, token: &LookupToken, value: &str) -> Result<Self> {
        let padded = pad(value)?;
        let sealed = cipher.seal(&padded, token.as_bytes())?;
        Ok(Self {
            nonce: sealed.nonce.to_vec(),
            ciphertext: sealed.ciphertext,
        })
    }

    /// Verify and decrypt this record, which must be stored under `token`.
    pub fn open(&self, cipher: &CipherContext, token: &LookupToken) -> Result<String> {
        let padded = Zeroizing::new(cipher.open(&self.nonce, &self.ciphertext, token.as_bytes())?);
        unpad(&padded)
    }
}

fn pad(value: &str) -> Result<Zeroizing<Vec<u8>>> {
    let bytes = value.as_bytes();
    if bytes.len() > MAX_PW_LEN_BYTES {
        return Err(KeychainError::ValueTooLong {
            len: bytes.len(),
            max: MAX_PW_LEN_BYTES,
        });
    }

    let mut padded = Zeroizing::new(vec![0u8; PADDED_LEN]);
    // Fits in a byte: bounded by MAX_PW_LEN_BYTES above.
    padded[0] = bytes.len() as u8;
    padded[1..=bytes.len()].copy_from_slice(bytes);
    Ok(padded)
}

// An authentic record with bad padding can only come from a different
// writer; it is reported the same way as a failed tag.
fn unpad(padded: &[u8]) -> Result<String> {
    if padded.len() != PADDED_LEN {
        return Err(KeychainError::DecryptionFailed);
    }
    let len = usize::from(padded[0]);
    if len > MAX_PW_LEN_BYTES || padded[1 + len..].iter().any(|&b| b != 0) {
        return Err(KeychainError::DecryptionFailed);
    }

    String::from_utf8(padded[1..=len].to_vec()).map_err(|e| {
        let mut bad_bytes = e.into_bytes();
        bad_bytes.zeroize();
        KeychainError::DecryptionFailed
    })
}
