//! SHA-256 hashing, HMAC-SHA256, and digest comparison.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::errors::{KeychainError, Result};

/// Length of a SHA-256 / HMAC-SHA256 output in bytes.
pub const DIGEST_LEN: usize = 32;

/// SHA-256 of `data`.
pub fn sha256(data: &[u8]) -> [u8; DIGEST_LEN] {
    Sha256::digest(data).into()
}

/// SHA-256 of `data`, base64-encoded.
pub fn sha256_base64(data: &[u8]) -> String {
    BASE64.encode(sha256(data))
}

/// HMAC-SHA256 of `message` under `key`.
pub fn hmac_sha256(key: &[u8], message: &[u8]) -> Result<[u8; DIGEST_LEN]> {
    let mut mac = Hmac::<Sha256>::new_from_slice(key)
        .map_err(|e| KeychainError::KeyDerivationFailed(format!("invalid HMAC key: {e}")))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().into())
}

/// Compare two digest strings in constant time.
///
/// Length differences return early; the length of a digest is public.
pub fn digests_match(computed: &str, expected: &str) -> bool {
    computed.as_bytes().ct_eq(expected.as_bytes()).into()
}
