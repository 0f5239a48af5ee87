use serde::{Deserialize, Serialize};

use crate::crypto::kdf::Argon2Params;
use crate::errors::{KeychainError, Result};

/// Keychain configuration, supplied by the host as a TOML snippet.
///
/// Every field has a sensible default so a keychain works out-of-the-box
/// without any configuration at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Argon2 memory cost in KiB (default: 64 MB).
    #[serde(default = "default_argon2_memory_kib")]
    pub argon2_memory_kib: u32,

    /// Argon2 iteration count (default: 3).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,

    /// Argon2 parallelism degree (default: 4).
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,

    /// Test-open every record on `load` and report a wrong password as
    /// `Ok(false)` instead of loading unreadable data.
    #[serde(default)]
    pub verify_password_on_load: bool,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_argon2_memory_kib() -> u32 {
    65_536 // 64 MB
}

fn default_argon2_iterations() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            argon2_memory_kib: default_argon2_memory_kib(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
            verify_password_on_load: false,
        }
    }
}

impl Settings {
    /// Parse settings from TOML text.
    ///
    /// Missing fields fall back to their defaults. Unparseable input
    /// is a `ConfigError`.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| KeychainError::ConfigError(format!("Failed to parse settings: {e}")))
    }

    /// Convert the Argon2 settings into crypto-layer params.
    pub fn argon2_params(&self) -> Argon2Params {
        Argon2Params {
            memory_kib: self.argon2_memory_kib,
            iterations: self.argon2_iterations,
            parallelism: self.argon2_parallelism,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.argon2_memory_kib, 65_536);
        assert_eq!(s.argon2_iterations, 3);
        assert_eq!(s.argon2_parallelism, 4);
        assert!(!s.verify_password_on_load);
    }

    #[test]
    fn parses_full_toml() {
        let config = r#"
argon2_memory_kib = 131072
argon2_iterations = 5
argon2_parallelism = 8
verify_password_on_load = true
"#;
        let s = Settings::from_toml_str(config).unwrap();
        assert_eq!(s.argon2_memory_kib, 131_072);
        assert_eq!(s.argon2_iterations, 5);
        assert_eq!(s.argon2_parallelism, 8);
        assert!(s.verify_password_on_load);
    }

    #[test]
    fn uses_defaults_for_missing_fields() {
        let s = Settings::from_toml_str("argon2_iterations = 1\n").unwrap();
        assert_eq!(s.argon2_iterations, 1);
        assert_eq!(s.argon2_memory_kib, 65_536);
        assert!(!s.verify_password_on_load);
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let s = Settings::from_toml_str("").unwrap();
        assert_eq!(s.argon2_parallelism, 4);
    }

    #[test]
    fn errors_on_invalid_toml() {
        let result = Settings::from_toml_str("not valid {{toml");
        assert!(matches!(result, Err(KeychainError::ConfigError(_))));
    }

    #[test]
    fn argon2_params_mirror_settings() {
        let s = Settings {
            argon2_memory_kib: 8_192,
            argon2_iterations: 2,
            argon2_parallelism: 1,
            ..Settings::default()
        };
        let p = s.argon2_params();
        assert_eq!(p.memory_kib, 8_192);
        assert_eq!(p.iterations, 2);
        assert_eq!(p.parallelism, 1);
    }
}
