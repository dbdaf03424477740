//! Command implementations.

pub mod capture;
pub mod clear;
pub mod cookies;
pub mod init;
pub mod show;

pub use self::capture::execute_capture;
pub use self::clear::execute_clear;
pub use self::cookies::execute_cookies;
pub use self::init::execute_init;
pub use self::show::execute_show;

use crate::config::Config;
use crate::error::Result;
use std::path::Path;
use tagtrail_store::SqliteStore;

/// Open the attribution database, creating its directory if needed.
pub fn open_store(config: &Config, overridden: Option<&Path>) -> Result<SqliteStore> {
    let store_path = config.resolve_store_path(overridden)?;
    if let Some(parent) = store_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    tracing::debug!(path = %store_path.display(), "Opening attribution store");
    Ok(SqliteStore::new(&store_path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagtrail_domain::PersistentKeyStore;
    use tempfile::TempDir;

    #[test]
    fn test_open_store_creates_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("attribution.db");

        let mut store = open_store(&Config::default(), Some(&path)).unwrap();
        store.set("source", "news", 30).unwrap();
        assert!(path.exists());

        let mut config = Config::default();
        config.store_path = Some(path.clone());
        let reopened = open_store(&config, None).unwrap();
        assert_eq!(reopened.get("source").unwrap().as_deref(), Some("news"));
    }
}
