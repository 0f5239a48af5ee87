//! Password-based key derivation using Argon2id.
//!
//! The password is first hashed with SHA-256, then stretched by
//! Argon2id under a fixed, public salt.  The fixed salt is what lets
//! `load` re-derive the same keys from the password alone; it also
//! means two keychains with the same password share their keys.

use argon2::{Algorithm, Argon2, Params, Version};
use zeroize::Zeroize;

use super::digest::sha256;
use super::keys::{MasterSecrets, DERIVED_LEN};
use crate::errors::{KeychainError, Result};

/// Public salt mixed into every derivation.
pub const FIXED_SALT: &[u8] = b"keychain-vault/fixed-salt/v1";

/// Minimum safe memory cost in KiB (8 MB).
const MIN_MEMORY_KIB: u32 = 8_192;

/// Configurable Argon2id parameters.
///
/// These map 1:1 to the fields in `Settings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Params {
    /// Memory cost in KiB (default: 65 536 = 64 MB).
    pub memory_kib: u32,
    /// Number of iterations (default: 3).
    pub iterations: u32,
    /// Parallelism lanes (default: 4).
    pub parallelism: u32,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            memory_kib: 65_536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

impl Argon2Params {
    /// Reject dangerously weak or unusable settings.
    pub fn validate(&self) -> Result<()> {
        if self.memory_kib < MIN_MEMORY_KIB {
            return Err(KeychainError::KeyDerivationFailed(format!(
                "Argon2 memory_kib must be at least {MIN_MEMORY_KIB} (got {})",
                self.memory_kib
            )));
        }
        if self.iterations < 1 {
            return Err(KeychainError::KeyDerivationFailed(
                "Argon2 iterations must be at least 1".into(),
            ));
        }
        if self.parallelism < 1 {
            return Err(KeychainError::KeyDerivationFailed(
                "Argon2 parallelism must be at least 1".into(),
            ));
        }
        self.build().map(|_| ())
    }

    fn build(&self) -> Result<Argon2<'static>> {
        let params = Params::new(
            self.memory_kib,
            self.iterations,
            self.parallelism,
            Some(DERIVED_LEN),
        )
        .map_err(|e| KeychainError::KeyDerivationFailed(format!("invalid Argon2 params: {e}")))?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

/// Derive the session's encryption and MAC keys from `password`.
///
/// The same password + params always produce the same keys. Any string
/// is accepted, including the empty one.
pub fn derive_master_secrets(password: &str, params: &Argon2Params) -> Result<MasterSecrets> {
    params.validate()?;
    let argon2 = params.build()?;

    let mut prehash = sha256(password.as_bytes());
    let mut derived = [0u8; DERIVED_LEN];
    let outcome = argon2.hash_password_into(&prehash, FIXED_SALT, &mut derived);
    prehash.zeroize();
    outcome
        .map_err(|e| KeychainError::KeyDerivationFailed(format!("Argon2id hashing failed: {e}")))?;

    let secrets = MasterSecrets::from_derived(&derived);
    derived.zeroize();
    Ok(secrets)
}
