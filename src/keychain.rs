//! The keychain session.
//!
//! A `Keychain` is either **not ready** (fresh, no keys) or **ready**
//! (keys derived, vault loaded).  `init` and `load` move it to ready;
//! every other operation except `dump` fails with `NotReady` until then.
//!
//! ```no_run
//! use keychain::Keychain;
//!
//! let mut kc = Keychain::default();
//! kc.init("correct horse")?;
//! kc.set("example.com", "p@ss1")?;
//! let dump = kc.dump()?.expect("ready keychain always dumps");
//!
//! let mut restored = Keychain::default();
//! assert!(restored.load("correct horse", &dump.document, Some(&dump.digest))?);
//! assert_eq!(restored.get("example.com")?.as_deref(), Some("p@ss1"));
//! # Ok::<(), keychain::KeychainError>(())
//! ```

use std::fmt;

use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::crypto::encryption::CipherContext;
use crate::crypto::kdf::{derive_master_secrets, Argon2Params};
use crate::crypto::keys::MasterSecrets;
use crate::errors::{KeychainError, Result};
use crate::vault::format::{self, VaultDump};
use crate::vault::{LookupToken, Record, VaultStore};

/// Keys, cipher and vault for one password.
struct Session {
    secrets: MasterSecrets,
    cipher: CipherContext,
    vault: VaultStore,
}

impl Session {
    /// Derive keys for `password` and start with an empty vault.
    fn derive(password: &str, params: &Argon2Params) -> Result<Self> {
        let secrets = derive_master_secrets(password, params)?;
        let cipher = CipherContext::new(secrets.encryption_key());
        Ok(Self {
            secrets,
            cipher,
            vault: VaultStore::new(),
        })
    }

    fn token_for(&self, domain: &str) -> Result<LookupToken> {
        LookupToken::for_domain(self.secrets.mac_key(), domain)
    }

    /// Returns `true` if every record authenticates under this session's key.
    fn opens_every_record(&self) -> bool {
        self.vault
            .iter()
            .all(|(token, record)| record.open(&self.cipher, token).is_ok())
    }
}

enum SessionState {
    NotReady,
    Ready(Session),
}

/// A single-user credential keychain.
///
/// Owned by the caller and passed by reference into each operation.
/// Wrap it in [`crate::shared::SharedKeychain`] to share it between threads.
pub struct Keychain {
    argon2_params: Argon2Params,
    verify_password_on_load: bool,
    state: SessionState,
}

impl Default for Keychain {
    /// A not-ready keychain with default settings.
    fn default() -> Self {
        Self {
            argon2_params: Argon2Params::default(),
            verify_password_on_load: false,
            state: SessionState::NotReady,
        }
    }
}

impl Keychain {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Build a not-ready keychain from `settings`.
    ///
    /// The Argon2 parameters are validated here so that `init` and
    /// `load` never fail on configuration grounds.
    pub fn with_settings(settings: &Settings) -> Result<Self> {
        let argon2_params = settings.argon2_params();
        argon2_params.validate()?;
        Ok(Self {
            argon2_params,
            verify_password_on_load: settings.verify_password_on_load,
            state: SessionState::NotReady,
        })
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Derive keys from `password` and start a new, empty vault.
    ///
    /// Any previous session, including its vault, is discarded.
    pub fn init(&mut self, password: &str) -> Result<()> {
        debug!("Deriving keychain keys");
        let session = Session::derive(password, &self.argon2_params)?;
        self.state = SessionState::Ready(session);
        info!("Keychain initialised with an empty vault");
        Ok(())
    }

    /// Replace the current session with the vault in `document`.
    ///
    /// When `expected_digest` is given it is checked first; a mismatch is
    /// `DigestMismatch`.  Keys are then re-derived from `password` and the
    /// document parsed.  The previous session is only replaced if every
    /// step succeeds.
    ///
    /// Returns `Ok(false)` only when password verification is enabled in
    /// `Settings` and some record does not open under the re-derived key.
    pub fn load(
        &mut self,
        password: &str,
        document: &str,
        expected_digest: Option<&str>,
    ) -> Result<bool> {
        if let Some(expected) = expected_digest {
            if let Err(e) = format::verify_digest(document, expected) {
                warn!("Vault document failed its digest check");
                return Err(e);
            }
        }

        let mut session = Session::derive(password, &self.argon2_params)?;
        session.vault = format::parse_vault(document, None)?;

        if self.verify_password_on_load && !session.opens_every_record() {
            warn!("Vault records do not open under the supplied password");
            return Ok(false);
        }

        info!(entries = session.vault.len(), "Keychain loaded");
        self.state = SessionState::Ready(session);
        Ok(true)
    }

    /// Serialize the vault and its digest.
    ///
    /// Returns `Ok(None)` when the keychain is not ready; there is
    /// nothing to dump.
    pub fn dump(&self) -> Result<Option<VaultDump>> {
        let SessionState::Ready(session) = &self.state else {
            return Ok(None);
        };
        let dump = format::dump_vault(&session.vault)?;
        debug!(entries = session.vault.len(), "Keychain dumped");
        Ok(Some(dump))
    }

    // ------------------------------------------------------------------
    // Credential operations
    // ------------------------------------------------------------------

    /// Decrypt and return the value stored for `domain`.
    ///
    /// Absence is `Ok(None)`.  A record that fails authentication is
    /// `DecryptionFailed`.
    pub fn get(&self, domain: &str) -> Result<Option<String>> {
        let session = self.session()?;
        let token = session.token_for(domain)?;
        let Some(record) = session.vault.get(&token) else {
            return Ok(None);
        };

        record.open(&session.cipher, &token).map(Some).map_err(|e| {
            warn!("Stored record failed authentication");
            e
        })
    }

    /// Store `value` for `domain`, replacing any existing value.
    pub fn set(&mut self, domain: &str, value: &str) -> Result<()> {
        let session = self.session_mut()?;
        let token = session.token_for(domain)?;
        let record = Record::seal(&session.cipher, &token, value)?;
        session.vault.insert(token, record);
        Ok(())
    }

    /// Remove the value for `domain`.  Returns whether one was present.
    pub fn remove(&mut self, domain: &str) -> Result<bool> {
        let session = self.session_mut()?;
        let token = session.token_for(domain)?;
        Ok(session.vault.remove(&token).is_some())
    }

    /// Returns `true` if `domain` has a stored value.
    ///
    /// This is a metadata-only check — no decryption is performed.
    pub fn contains(&self, domain: &str) -> Result<bool> {
        let session = self.session()?;
        Ok(session.vault.contains(&session.token_for(domain)?))
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn is_ready(&self) -> bool {
        matches!(self.state, SessionState::Ready(_))
    }

    /// Number of stored records.
    pub fn len(&self) -> Result<usize> {
        Ok(self.session()?.vault.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.session()?.vault.is_empty())
    }

    /// Metadata version of the loaded vault, if ready.
    pub fn version(&self) -> Option<&str> {
        match &self.state {
            SessionState::Ready(session) => Some(session.vault.metadata().version.as_str()),
            SessionState::NotReady => None,
        }
    }

    fn session(&self) -> Result<&Session> {
        match &self.state {
            SessionState::Ready(session) => Ok(session),
            SessionState::NotReady => Err(KeychainError::NotReady),
        }
    }

    fn session_mut(&mut self) -> Result<&mut Session> {
        match &mut self.state {
            SessionState::Ready(session) => Ok(session),
            SessionState::NotReady => Err(KeychainError::NotReady),
        }
    }
}

impl fmt::Debug for Keychain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Keychain");
        s.field("ready", &self.is_ready());
        if let SessionState::Ready(session) = &self.state {
            s.field("entries", &session.vault.len());
        }
        s.finish_non_exhaustive()
    }
}
