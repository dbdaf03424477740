//! SQLite store backend

use crate::StoreError;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;
use tagtrail_domain::entry::expiry_from;
use tagtrail_domain::{namespaced, Clock, PersistentKeyStore, StoredEntry, SystemClock, KEY_PREFIX};

/// SQLite-based implementation of [`PersistentKeyStore`]
///
/// Entries persist across process runs. Expiry is stored as an absolute
/// timestamp and enforced on every read. Expired rows are deleted on every
/// `set`, or on demand with [`purge_expired`].
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own
/// SqliteStore instance.
///
/// [`purge_expired`]: SqliteStore::purge_expired
pub struct SqliteStore {
    conn: Connection,
    clock: Arc<dyn Clock>,
}

impl SqliteStore {
    /// Open (or create) a store at the given path on the wall clock
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        Self::with_clock(path, Arc::new(SystemClock))
    }

    /// Open (or create) a store at the given path on the given clock
    pub fn with_clock<P: AsRef<Path>>(path: P, clock: Arc<dyn Clock>) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn, clock };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    fn now_millis(&self) -> i64 {
        self.clock.now().timestamp_millis()
    }

    fn millis_to_datetime(millis: i64) -> Result<DateTime<Utc>, StoreError> {
        DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| StoreError::InvalidData(format!("Timestamp out of range: {}", millis)))
    }

    /// Write a key verbatim, without namespacing
    ///
    /// Lets unrelated data share the database with attribution entries.
    pub fn put_raw(&self, key: &str, value: &str, expires_at: DateTime<Utc>) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO entries (name, value, expires_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(name) DO UPDATE SET value = excluded.value, expires_at = excluded.expires_at",
            params![key, value, expires_at.timestamp_millis()],
        )?;
        Ok(())
    }

    /// Read a key verbatim, without namespacing
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM entries WHERE name = ?1 AND expires_at > ?2",
                params![key, self.now_millis()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Live attribution entries, ordered by name
    pub fn list_entries(&self) -> Result<Vec<StoredEntry>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT name, value, expires_at FROM entries
             WHERE substr(name, 1, ?1) = ?2 AND expires_at > ?3
             ORDER BY name",
        )?;

        let rows = stmt
            .query_map(
                params![KEY_PREFIX.len() as i64, KEY_PREFIX, self.now_millis()],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?, row.get::<_, i64>(2)?)),
            )?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(name, value, expires_at)| {
                Ok(StoredEntry {
                    name,
                    value,
                    expires_at: Self::millis_to_datetime(expires_at)?,
                })
            })
            .collect()
    }

    /// Delete every expired row, returning the number removed
    pub fn purge_expired(&self) -> Result<usize, StoreError> {
        let removed = self.conn.execute(
            "DELETE FROM entries WHERE expires_at <= ?1",
            params![self.now_millis()],
        )?;
        Ok(removed)
    }
}

impl PersistentKeyStore for SqliteStore {
    type Error = StoreError;

    fn set(&mut self, name: &str, value: &str, expiry_days: u32) -> Result<(), Self::Error> {
        let expires_at = expiry_from(self.clock.now(), expiry_days);
        self.put_raw(&namespaced(name), value, expires_at)?;
        let purged = self.purge_expired()?;
        if purged > 0 {
            tracing::debug!("Evicted {} expired entry(s)", purged);
        }
        Ok(())
    }

    fn get(&self, name: &str) -> Result<Option<String>, Self::Error> {
        self.get_raw(&namespaced(name))
    }

    fn clear(&mut self, names: Option<&[String]>) -> Result<(), Self::Error> {
        match names {
            Some(names) if !names.is_empty() => {
                let tx = self.conn.transaction()?;
                for name in names {
                    tx.execute("DELETE FROM entries WHERE name = ?1", params![namespaced(name)])?;
                }
                tx.commit()?;
            }
            // substr comparison is case-sensitive, unlike LIKE
            _ => {
                self.conn.execute(
                    "DELETE FROM entries WHERE substr(name, 1, ?1) = ?2",
                    params![KEY_PREFIX.len() as i64, KEY_PREFIX],
                )?;
            }
        }
        Ok(())
    }
}
