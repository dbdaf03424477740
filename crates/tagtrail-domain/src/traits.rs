//! Trait definitions for external interactions
//!
//! These traits define the boundary between capture logic and storage.
//! Infrastructure implementations live in `tagtrail-store`.

/// Durable key-value store with per-entry expiry
///
/// Implemented by the infrastructure layer (tagtrail-store).
///
/// Every method applies the namespacing rule from [`crate::key`], so callers
/// may pass `source` or `utm_source` interchangeably.
pub trait PersistentKeyStore {
    /// Error type for store operations
    type Error;

    /// Store `value` under the namespaced key, expiring `expiry_days` from now
    ///
    /// Overwrites any existing entry for that name.
    fn set(&mut self, name: &str, value: &str, expiry_days: u32) -> Result<(), Self::Error>;

    /// Get the value for the namespaced key
    ///
    /// Returns `None` if the entry is missing or its expiry has passed.
    fn get(&self, name: &str) -> Result<Option<String>, Self::Error>;

    /// Delete attribution entries
    ///
    /// With a non-empty `names`, deletes exactly those (namespaced) entries.
    /// With `None` or an empty slice, deletes every prefixed entry and leaves
    /// unrelated keys untouched. Clearing an absent key is not an error.
    fn clear(&mut self, names: Option<&[String]>) -> Result<(), Self::Error>;
}
