//! In-memory vault contents.
//!
//! `VaultStore` is the token -> record map plus its metadata.  It knows
//! nothing about keys; blinding and sealing happen in the session
//! before a record reaches the store.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::format::{Metadata, VAULT_VERSION};
use super::record::Record;
use super::token::LookupToken;

/// An ordered map of lookup token -> encrypted record.
///
/// Ordering makes the serialized document canonical: the same contents
/// always produce the same bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VaultStore {
    metadata: Metadata,
    entries: BTreeMap<LookupToken, Record>,
}

impl Default for VaultStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VaultStore {
    /// An empty vault stamped with the current format version.
    pub fn new() -> Self {
        Self {
            metadata: Metadata {
                version: VAULT_VERSION.to_string(),
            },
            entries: BTreeMap::new(),
        }
    }

    pub fn get(&self, token: &LookupToken) -> Option<&Record> {
        self.entries.get(token)
    }

    /// Insert or overwrite; returns the replaced record, if any.
    pub fn insert(&mut self, token: LookupToken, record: Record) -> Option<Record> {
        self.entries.insert(token, record)
    }

    pub fn remove(&mut self, token: &LookupToken) -> Option<Record> {
        self.entries.remove(token)
    }

    pub fn contains(&self, token: &LookupToken) -> bool {
        self.entries.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, LookupToken, Record> {
        self.entries.iter()
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(domain: &str) -> LookupToken {
        LookupToken::for_domain(&[9u8; 16], domain).unwrap()
    }

    fn record(fill: u8) -> Record {
        Record {
            nonce: vec![fill; 12],
            ciphertext: vec![fill; 81],
        }
    }

    #[test]
    fn new_store_is_empty_and_versioned() {
        let store = VaultStore::new();
        assert!(store.is_empty());
        assert_eq!(store.metadata().version, VAULT_VERSION);
    }

    #[test]
    fn insert_overwrites_without_duplicates() {
        let mut store = VaultStore::new();
        assert!(store.insert(token("a"), record(1)).is_none());
        assert_eq!(store.insert(token("a"), record(2)), Some(record(1)));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&token("a")), Some(&record(2)));
    }

    #[test]
    fn remove_reports_presence() {
        let mut store = VaultStore::new();
        store.insert(token("a"), record(1));
        assert!(store.contains(&token("a")));
        assert!(store.remove(&token("a")).is_some());
        assert!(store.remove(&token("a")).is_none());
        assert!(!store.contains(&token("a")));
    }

    #[test]
    fn iteration_order_is_independent_of_insertion_order() {
        let mut forward = VaultStore::new();
        let mut backward = VaultStore::new();
        for d in ["a", "b", "c"] {
            forward.insert(token(d), record(1));
        }
        for d in ["c", "b", "a"] {
            backward.insert(token(d), record(1));
        }
        let f: Vec<_> = forward.iter().map(|(t, _)| t.clone()).collect();
        let b: Vec<_> = backward.iter().map(|(t, _)| t.clone()).collect();
        assert_eq!(f, b);
    }
}
