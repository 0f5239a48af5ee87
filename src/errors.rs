use thiserror::Error;

/// All errors that can occur in the keychain.
#[derive(Debug, Error)]
pub enum KeychainError {
    // --- Lifecycle errors ---
    #[error("Keychain is not ready — call init or load first")]
    NotReady,

    #[error("Keychain lock poisoned — a previous holder panicked")]
    LockPoisoned,

    // --- Integrity errors ---
    #[error("Digest mismatch — vault document may be tampered")]
    DigestMismatch,

    #[error("Decryption failed — wrong password or tampered record")]
    DecryptionFailed,

    // --- Crypto errors ---
    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    // --- Record errors ---
    #[error("Value is {len} bytes, the maximum is {max}")]
    ValueTooLong { len: usize, max: usize },

    // --- Document errors ---
    #[error("Invalid vault document: {0}")]
    InvalidFormat(String),

    #[error("Unsupported vault version '{0}'")]
    UnsupportedVersion(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- Config errors ---
    #[error("Config error: {0}")]
    ConfigError(String),
}

impl KeychainError {
    /// Returns `true` for errors that mean stored data failed
    /// authentication: a bad document digest or a record whose tag
    /// did not verify.
    pub fn is_integrity_failure(&self) -> bool {
        matches!(self, Self::DigestMismatch | Self::DecryptionFailed)
    }
}

/// Convenience type alias for keychain results.
pub type Result<T> = std::result::Result<T, KeychainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integrity_failures_are_grouped() {
        assert!(KeychainError::DigestMismatch.is_integrity_failure());
        assert!(KeychainError::DecryptionFailed.is_integrity_failure());
        assert!(!KeychainError::NotReady.is_integrity_failure());
        assert!(!KeychainError::InvalidFormat("x".into()).is_integrity_failure());
    }

    #[test]
    fn value_too_long_message_names_both_lengths() {
        let msg = KeychainError::ValueTooLong { len: 70, max: 64 }.to_string();
        assert!(msg.contains("70"));
        assert!(msg.contains("64"));
    }
}
