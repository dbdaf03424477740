//! Tagtrail Storage Layer
//!
//! Implements the [`PersistentKeyStore`](tagtrail_domain::PersistentKeyStore)
//! trait over three backends.
//!
//! # Backends
//!
//! - [`MemoryStore`]: process-local map, for tests and embedding
//! - [`SqliteStore`]: durable SQLite file shared across runs
//! - [`CookieJarStore`]: browser cookie jar model, read from a `Cookie:` header
//!   and written back as `Set-Cookie` lines
//!
//! All backends apply lazy expiry: an entry past its expiry is never served,
//! whether or not it has been physically removed yet.
//!
//! # Examples
//!
//! ```no_run
//! use tagtrail_domain::PersistentKeyStore;
//! use tagtrail_store::SqliteStore;
//!
//! let mut store = SqliteStore::new("tagtrail.db").unwrap();
//! store.set("source", "newsletter", 30).unwrap();
//! assert_eq!(store.get("utm_source").unwrap().as_deref(), Some("newsletter"));
//! ```

#![warn(missing_docs)]

pub mod cookie;
mod cookie_jar;
mod memory;
mod sqlite;

pub use cookie_jar::CookieJarStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
