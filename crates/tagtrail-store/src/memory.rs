//! In-memory store backend

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use tagtrail_domain::entry::expiry_from;
use tagtrail_domain::{is_namespaced, namespaced, Clock, PersistentKeyStore, StoredEntry, SystemClock};

/// Process-local implementation of [`PersistentKeyStore`]
///
/// Useful for tests and for hosts that manage persistence themselves. Reads
/// skip expired entries; every `set` evicts them. Keys
/// without the attribution prefix can be seeded with [`insert_raw`] to model
/// unrelated data sharing the same store.
///
/// [`insert_raw`]: MemoryStore::insert_raw
pub struct MemoryStore {
    entries: HashMap<String, StoredEntry>,
    clock: Arc<dyn Clock>,
}

impl MemoryStore {
    /// Create an empty store on the wall clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty store on the given clock
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            clock,
        }
    }

    /// Insert a key verbatim, without namespacing
    pub fn insert_raw(&mut self, key: &str, value: &str, expires_at: DateTime<Utc>) {
        self.entries.insert(
            key.to_string(),
            StoredEntry {
                name: key.to_string(),
                value: value.to_string(),
                expires_at,
            },
        );
    }

    /// Read a key verbatim, without namespacing
    pub fn get_raw(&self, key: &str) -> Option<&str> {
        let now = self.clock.now();
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| entry.value.as_str())
    }

    /// Live entries, expired ones excluded
    pub fn entries(&self) -> Vec<&StoredEntry> {
        let now = self.clock.now();
        self.entries.values().filter(|e| !e.is_expired_at(now)).collect()
    }

    /// Physically remove expired entries, returning how many were dropped
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        before - self.entries.len()
    }

    /// Total number of stored keys, including expired ones not yet purged
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has ever been stored (or everything was removed)
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PersistentKeyStore for MemoryStore {
    type Error = Infallible;

    fn set(&mut self, name: &str, value: &str, expiry_days: u32) -> Result<(), Self::Error> {
        self.purge_expired();
        let entry = StoredEntry::new(name, value, expiry_from(self.clock.now(), expiry_days));
        self.entries.insert(entry.name.clone(), entry);
        Ok(())
    }

    fn get(&self, name: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.get_raw(&namespaced(name)).map(str::to_string))
    }

    fn clear(&mut self, names: Option<&[String]>) -> Result<(), Self::Error> {
        match names {
            Some(names) if !names.is_empty() => {
                for name in names {
                    self.entries.remove(&*namespaced(name));
                }
            }
            _ => self.entries.retain(|key, _| !is_namespaced(key)),
        }
        Ok(())
    }
}
