//! The per-session key pair derived from the master password.
//!
//! A single 256-bit derivation output is split in two:
//! - the first 128 bits become the **encryption key** (AES-128-GCM),
//! - the remaining 128 bits become the **MAC key** used to blind
//!   domain names into lookup tokens.

use std::fmt;

use zeroize::Zeroize;

/// Length of the raw derivation output (256 bits).
pub const DERIVED_LEN: usize = 32;

/// Length of the AES-128-GCM encryption key.
pub const ENCRYPTION_KEY_LEN: usize = 16;

/// Length of the HMAC key.
pub const MAC_KEY_LEN: usize = DERIVED_LEN - ENCRYPTION_KEY_LEN;

/// Encryption key and MAC key for one session.
///
/// Zeroes its memory when dropped. Never serialized.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct MasterSecrets {
    encryption_key: [u8; ENCRYPTION_KEY_LEN],
    mac_key: [u8; MAC_KEY_LEN],
}

impl MasterSecrets {
    /// Split a raw derivation output into the two keys.
    pub fn from_derived(derived: &[u8; DERIVED_LEN]) -> Self {
        let mut encryption_key = [0u8; ENCRYPTION_KEY_LEN];
        let mut mac_key = [0u8; MAC_KEY_LEN];
        encryption_key.copy_from_slice(&derived[..ENCRYPTION_KEY_LEN]);
        mac_key.copy_from_slice(&derived[ENCRYPTION_KEY_LEN..]);
        Self {
            encryption_key,
            mac_key,
        }
    }

    pub fn encryption_key(&self) -> &[u8; ENCRYPTION_KEY_LEN] {
        &self.encryption_key
    }

    pub fn mac_key(&self) -> &[u8; MAC_KEY_LEN] {
        &self.mac_key
    }
}

impl fmt::Debug for MasterSecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MasterSecrets([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_takes_first_half_for_encryption() {
        let mut derived = [0u8; DERIVED_LEN];
        for (i, b) in derived.iter_mut().enumerate() {
            *b = i as u8;
        }

        let secrets = MasterSecrets::from_derived(&derived);
        assert_eq!(secrets.encryption_key()[..], derived[..16]);
        assert_eq!(secrets.mac_key()[..], derived[16..]);
    }

    #[test]
    fn debug_output_is_redacted() {
        let secrets = MasterSecrets::from_derived(&[0x41u8; DERIVED_LEN]);
        let shown = format!("{secrets:?}");
        assert!(shown.contains("REDACTED"));
        assert!(!shown.contains("65"));
    }
}
