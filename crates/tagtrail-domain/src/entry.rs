//! Stored entry module - a persisted value with absolute expiry

use crate::key::namespaced;
use chrono::{DateTime, Duration, Utc};

/// A value persisted in a [`PersistentKeyStore`](crate::PersistentKeyStore)
///
/// The name is always stored in its namespaced form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEntry {
    /// Namespaced key (always starts with `utm_`)
    pub name: String,

    /// Raw (decoded) value
    pub value: String,

    /// Instant after which the entry is no longer served
    pub expires_at: DateTime<Utc>,
}

impl StoredEntry {
    /// Create an entry, namespacing the name
    pub fn new(name: &str, value: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            name: namespaced(name).into_owned(),
            value: value.into(),
            expires_at,
        }
    }

    /// Create an entry that expires `expiry_days` after `now`
    pub fn with_expiry_days(
        name: &str,
        value: impl Into<String>,
        now: DateTime<Utc>,
        expiry_days: u32,
    ) -> Self {
        Self::new(name, value, expiry_from(now, expiry_days))
    }

    /// An entry is expired once `now` reaches its expiry instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Absolute expiry for a write made at `now`
///
/// Saturates at the latest representable instant instead of overflowing.
pub fn expiry_from(now: DateTime<Utc>, expiry_days: u32) -> DateTime<Utc> {
    now.checked_add_signed(Duration::days(i64::from(expiry_days)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
