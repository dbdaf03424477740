//! Key namespacing for stored attribution entries
//!
//! Stored keys always carry [`KEY_PREFIX`]. Callers may pass either the bare
//! name (`source`) or the prefixed one (`utm_source`); both resolve to the
//! same underlying key.

use std::borrow::Cow;

/// Prefix that marks a stored key as an attribution entry
pub const KEY_PREFIX: &str = "utm_";

/// Normalize a parameter name to its stored key
///
/// # Examples
///
/// ```
/// use tagtrail_domain::namespaced;
///
/// assert_eq!(namespaced("source"), "utm_source");
/// assert_eq!(namespaced("utm_source"), "utm_source");
/// ```
pub fn namespaced(name: &str) -> Cow<'_, str> {
    if is_namespaced(name) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("{}{}", KEY_PREFIX, name))
    }
}

/// Check whether a key already carries the attribution prefix
pub fn is_namespaced(key: &str) -> bool {
    key.starts_with(KEY_PREFIX)
}
