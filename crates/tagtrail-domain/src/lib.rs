//! Tagtrail Domain Layer
//!
//! This crate contains the core data model for Tagtrail: attribution records,
//! the key namespacing rule, stored entries with absolute expiry, and the trait
//! interfaces that storage backends implement.
//!
//! ## Key Concepts
//!
//! - **AttributionRecord**: Parameter name → captured value (e.g. `utm_source` → `news`)
//! - **Namespacing**: Every stored key carries the `utm_` prefix, added when missing
//! - **StoredEntry**: A `(name, value, expires_at)` triple; never served once expired
//! - **Clock**: Injectable time source so expiry can be tested without sleeping
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture:
//! - Pure data model and rules only
//! - Storage implementations live in `tagtrail-store`
//! - Capture logic lives in `tagtrail-capture`
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod clock;
pub mod entry;
pub mod key;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::StoredEntry;
pub use key::{is_namespaced, namespaced, KEY_PREFIX};
pub use record::{AttributionRecord, DEFAULT_CAPTURE_PARAMS};
pub use traits::PersistentKeyStore;
