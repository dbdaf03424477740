//! Init command implementation.

use crate::cli::InitArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the init command: write a default configuration file.
pub fn execute_init(args: &InitArgs, path: &Path, formatter: &Formatter) -> Result<()> {
    write_default(args, path)?;
    println!(
        "{}",
        formatter.success(&format!("Wrote configuration to {}", path.display()))
    );
    Ok(())
}

fn write_default(args: &InitArgs, path: &Path) -> Result<()> {
    if path.exists() && !args.force {
        return Err(CliError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    let mut config = Config::default();
    config.store_path = args.store_path.clone();
    config.save_to(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tagtrail").join("config.toml");
        let args = InitArgs {
            force: false,
            store_path: Some(PathBuf::from("/srv/attribution.db")),
        };

        write_default(&args, &path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.store_path, Some(PathBuf::from("/srv/attribution.db")));
        assert_eq!(loaded.capture.expiry_days, 30);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[settings]\ncolor = false\n").unwrap();

        let args = InitArgs {
            force: false,
            store_path: None,
        };
        assert!(matches!(write_default(&args, &path), Err(CliError::Config(_))));
        assert!(!Config::load_from(&path).unwrap().settings.color);

        let forced = InitArgs {
            force: true,
            store_path: None,
        };
        write_default(&forced, &path).unwrap();
        assert!(Config::load_from(&path).unwrap().settings.color);
    }
}
