//! Error types for capture configuration

use thiserror::Error;

/// Errors that can occur while loading or validating a [`CaptureConfig`](crate::CaptureConfig)
///
/// Capture itself never fails; these only arise at configuration boundaries.
#[derive(Error, Debug)]
pub enum CaptureError {
    /// Failed to read a config file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration values are out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
