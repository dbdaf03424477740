//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tagtrail_capture::CaptureConfig;

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database holding attribution entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Capture behavior
    #[serde(default)]
    pub capture: CaptureConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet format (`name=value` lines)
    Quiet,
}

impl Config {
    /// Directory holding config and data (`~/.tagtrail`).
    pub fn home_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".tagtrail"))
    }

    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::home_dir()?.join("config.toml"))
    }

    /// Load configuration from the default path, or defaults if absent.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.capture.validate()?;
        Ok(config)
    }

    /// Save configuration to a file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Resolve the store path: explicit override, then config, then `~/.tagtrail/attribution.db`.
    pub fn resolve_store_path(&self, overridden: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = overridden {
            return Ok(path.to_path_buf());
        }
        match &self.store_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::home_dir()?.join("attribution.db")),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.store_path.is_none());
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert_eq!(config.capture, CaptureConfig::default());
    }

    #[test]
    fn test_parse_full_file() {
        let toml = r#"
            store_path = "/var/lib/tagtrail/attribution.db"

            [settings]
            color = false
            format = "json"

            [capture]
            capture_params = ["utm_source", "utm_campaign"]
            expiry_days = 14
            require_referrer = true
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.store_path.as_deref(), Some(Path::new("/var/lib/tagtrail/attribution.db")));
        assert!(!config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert_eq!(config.capture.capture_params, vec!["utm_source", "utm_campaign"]);
        assert_eq!(config.capture.expiry_days, 14);
        assert!(config.capture.require_referrer);
        assert!(config.capture.consent_given);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.capture = CaptureConfig::default().with_expiry_days(60);
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.capture.expiry_days, 60);
    }

    #[test]
    fn test_load_rejects_invalid_capture() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[capture]\nexpiry_days = 0\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(CliError::Capture(_))));
    }

    #[test]
    fn test_store_path_resolution() {
        let mut config = Config::default();
        config.store_path = Some(PathBuf::from("/data/a.db"));

        assert_eq!(config.resolve_store_path(Some(Path::new("/tmp/b.db"))).unwrap(), PathBuf::from("/tmp/b.db"));
        assert_eq!(config.resolve_store_path(None).unwrap(), PathBuf::from("/data/a.db"));
    }
}
