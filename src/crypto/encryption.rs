//! AES-128-GCM authenticated encryption.
//!
//! Each call to `seal` generates a fresh random 12-byte nonce and
//! returns it alongside the ciphertext.  The caller supplies associated
//! data that is authenticated but not encrypted; `open` must be given
//! the same associated data or the tag check fails.

use std::fmt;

use aes_gcm::aead::{Aead, KeyInit, OsRng, Payload};
use aes_gcm::{AeadCore, Aes128Gcm, Key, Nonce};

use super::keys::ENCRYPTION_KEY_LEN;
use crate::errors::{KeychainError, Result};

/// Size of the AES-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the AES-GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Output of a single `seal` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sealed {
    pub nonce: [u8; NONCE_LEN],
    /// Ciphertext with the 16-byte tag appended.
    pub ciphertext: Vec<u8>,
}

/// An initialised AES-128-GCM handle bound to one encryption key.
pub struct CipherContext {
    cipher: Aes128Gcm,
}

impl CipherContext {
    pub fn new(key: &[u8; ENCRYPTION_KEY_LEN]) -> Self {
        Self {
            cipher: Aes128Gcm::new(Key::<Aes128Gcm>::from_slice(key)),
        }
    }

    /// Encrypt and authenticate `plaintext`, binding `aad` into the tag.
    pub fn seal(&self, plaintext: &[u8], aad: &[u8]) -> Result<Sealed> {
        let nonce = Aes128Gcm::generate_nonce(&mut OsRng);

        let ciphertext = self
            .cipher
            .encrypt(
                &nonce,
                Payload {
                    msg: plaintext,
                    aad,
                },
            )
            .map_err(|e| KeychainError::EncryptionFailed(format!("encryption error: {e}")))?;

        let mut nonce_bytes = [0u8; NONCE_LEN];
        nonce_bytes.copy_from_slice(&nonce);
        Ok(Sealed {
            nonce: nonce_bytes,
            ciphertext,
        })
    }

    /// Decrypt data produced by `seal` and verify its tag.
    ///
    /// Any malformed input, wrong key, or wrong `aad` is a
    /// `DecryptionFailed`; no partial plaintext is ever returned.
    pub fn open(&self, nonce: &[u8], ciphertext: &[u8], aad: &[u8]) -> Result<Vec<u8>> {
        if nonce.len() != NONCE_LEN || ciphertext.len() < TAG_LEN {
            return Err(KeychainError::DecryptionFailed);
        }

        self.cipher
            .decrypt(
                Nonce::from_slice(nonce),
                Payload {
                    msg: ciphertext,
                    aad,
                },
            )
            .map_err(|_| KeychainError::DecryptionFailed)
    }
}

impl fmt::Debug for CipherContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CipherContext(AES-128-GCM)")
    }
}
