//! A keychain shared between threads.
//!
//! `init` and `load` replace keys, cipher and vault together, so the
//! whole session sits behind one mutex that is held for the full
//! duration of every operation.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::errors::{KeychainError, Result};
use crate::keychain::Keychain;
use crate::vault::VaultDump;

/// Cloneable, thread-safe handle to one [`Keychain`].
#[derive(Debug, Clone, Default)]
pub struct SharedKeychain {
    inner: Arc<Mutex<Keychain>>,
}

impl SharedKeychain {
    pub fn new(keychain: Keychain) -> Self {
        Self {
            inner: Arc::new(Mutex::new(keychain)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Keychain>> {
        self.inner.lock().map_err(|_| KeychainError::LockPoisoned)
    }

    pub fn init(&self, password: &str) -> Result<()> {
        self.lock()?.init(password)
    }

    pub fn load(&self, password: &str, document: &str, expected_digest: Option<&str>) -> Result<bool> {
        self.lock()?.load(password, document, expected_digest)
    }

    pub fn dump(&self) -> Result<Option<VaultDump>> {
        self.lock()?.dump()
    }

    pub fn get(&self, domain: &str) -> Result<Option<String>> {
        self.lock()?.get(domain)
    }

    pub fn set(&self, domain: &str, value: &str) -> Result<()> {
        self.lock()?.set(domain, value)
    }

    pub fn remove(&self, domain: &str) -> Result<bool> {
        self.lock()?.remove(domain)
    }

    pub fn is_ready(&self) -> Result<bool> {
        Ok(self.lock()?.is_ready())
    }
}
