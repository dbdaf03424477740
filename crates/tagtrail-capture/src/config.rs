//! Configuration for attribution capture
//!
//! Defines which parameters are captured, how long they persist, and the
//! consent and referrer gates.

use crate::CaptureError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tagtrail_domain::DEFAULT_CAPTURE_PARAMS;

/// Configuration for [`AttributionCapture`](crate::AttributionCapture)
///
/// Supplied once at construction. A capture never mutates its config; a new
/// one is applied wholesale with
/// [`reconfigure`](crate::AttributionCapture::reconfigure).
///
/// # Examples
///
/// ```
/// use tagtrail_capture::CaptureConfig;
///
/// let config = CaptureConfig::default();
/// assert_eq!(config.capture_params.len(), 5);
/// assert_eq!(config.expiry_days, 30);
/// assert!(config.consent_given);
///
/// let strict = CaptureConfig::default()
///     .with_require_consent(true)
///     .with_consent_given(false);
/// assert!(!strict.tracking_allowed());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Parameter names read from the URL and the store
    /// Default: the five canonical UTM names
    #[serde(default = "default_capture_params")]
    pub capture_params: Vec<String>,

    /// Lifetime of stored entries, in days (1 to [`MAX_EXPIRY_DAYS`])
    /// Default: 30
    #[serde(default = "default_expiry_days")]
    pub expiry_days: u32,

    /// Only trust URL parameters when a non-empty referrer is present
    /// Default: false
    #[serde(default)]
    pub require_referrer: bool,

    /// Only capture once the host reports consent
    /// Default: false
    #[serde(default)]
    pub require_consent: bool,

    /// Consent signal supplied by the host
    /// Default: true
    #[serde(default = "default_true")]
    pub consent_given: bool,
}

/// Longest accepted entry lifetime, in days (100 years)
pub const MAX_EXPIRY_DAYS: u32 = 36_500;

fn default_capture_params() -> Vec<String> {
    DEFAULT_CAPTURE_PARAMS.iter().map(|s| s.to_string()).collect()
}

fn default_expiry_days() -> u32 {
    30
}

fn default_true() -> bool {
    true
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            capture_params: default_capture_params(),
            expiry_days: default_expiry_days(),
            require_referrer: false,
            require_consent: false,
            consent_given: true,
        }
    }
}

impl CaptureConfig {
    /// Replace the captured parameter names
    pub fn with_capture_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.capture_params = params.into_iter().map(Into::into).collect();
        self
    }

    /// Set the entry lifetime in days
    pub fn with_expiry_days(mut self, days: u32) -> Self {
        self.expiry_days = days;
        self
    }

    /// Require a non-empty referrer before trusting URL parameters
    pub fn with_require_referrer(mut self, required: bool) -> Self {
        self.require_referrer = required;
        self
    }

    /// Require explicit consent before any capture
    pub fn with_require_consent(mut self, required: bool) -> Self {
        self.require_consent = required;
        self
    }

    /// Set the host's consent signal
    pub fn with_consent_given(mut self, given: bool) -> Self {
        self.consent_given = given;
        self
    }

    /// False when consent is required and has not been given
    pub fn tracking_allowed(&self) -> bool {
        !self.require_consent || self.consent_given
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), CaptureError> {
        if self.expiry_days == 0 {
            return Err(CaptureError::InvalidConfig(
                "expiry_days must be at least 1".to_string(),
            ));
        }
        if self.expiry_days > MAX_EXPIRY_DAYS {
            return Err(CaptureError::InvalidConfig(format!(
                "expiry_days must be at most {} (got {})",
                MAX_EXPIRY_DAYS, self.expiry_days
            )));
        }
        if let Some(pos) = self.capture_params.iter().position(|p| p.trim().is_empty()) {
            return Err(CaptureError::InvalidConfig(format!(
                "capture_params[{}] is empty",
                pos
            )));
        }
        Ok(())
    }

    /// Parse from TOML
    ///
    /// Accepts either a bare table or one nested under `[capture]`. Missing
    /// fields take their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, CaptureError> {
        let mut table: toml::Table = toml::from_str(contents)?;
        let config: CaptureConfig = match table.remove("capture") {
            Some(section) => section.try_into()?,
            None => toml::Value::Table(table).try_into()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CaptureError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CaptureConfig::default();
        assert_eq!(
            config.capture_params,
            vec!["utm_source", "utm_medium", "utm_campaign", "utm_term", "utm_content"]
        );
        assert_eq!(config.expiry_days, 30);
        assert!(!config.require_referrer);
        assert!(!config.require_consent);
        assert!(config.consent_given);
        assert!(config.tracking_allowed());
    }

    #[test]
    fn test_tracking_allowed_matrix() {
        let base = CaptureConfig::default();
        assert!(base.clone().with_require_consent(false).with_consent_given(false).tracking_allowed());
        assert!(base.clone().with_require_consent(true).with_consent_given(true).tracking_allowed());
        assert!(!base.with_require_consent(true).with_consent_given(false).tracking_allowed());
    }

    #[test]
    fn test_parse_bare_table() {
        let toml = r#"
            capture_params = ["utm_source", "gclid"]
            expiry_days = 7
            require_referrer = true
        "#;

        let config = CaptureConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.capture_params, vec!["utm_source", "gclid"]);
        assert_eq!(config.expiry_days, 7);
        assert!(config.require_referrer);
        assert!(config.consent_given);
    }

    #[test]
    fn test_parse_capture_section() {
        let toml = r#"
            store_path = "/tmp/ignored.db"

            [capture]
            require_consent = true
            consent_given = false
        "#;

        let config = CaptureConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.capture_params.len(), 5);
        assert!(config.require_consent);
        assert!(!config.consent_given);
    }

    #[test]
    fn test_parse_empty_is_default() {
        assert_eq!(CaptureConfig::from_toml_str("").unwrap(), CaptureConfig::default());
    }

    #[test]
    fn test_reject_zero_expiry() {
        let result = CaptureConfig::from_toml_str("expiry_days = 0");
        assert!(matches!(result, Err(CaptureError::InvalidConfig(_))));
    }

    #[test]
    fn test_expiry_upper_bound() {
        assert!(CaptureConfig::default().with_expiry_days(MAX_EXPIRY_DAYS).validate().is_ok());

        let result = CaptureConfig::default().with_expiry_days(MAX_EXPIRY_DAYS + 1).validate();
        assert!(matches!(result, Err(CaptureError::InvalidConfig(_))));
        assert!(CaptureConfig::default().with_expiry_days(u32::MAX).validate().is_err());
    }

    #[test]
    fn test_reject_blank_param() {
        let config = CaptureConfig::default().with_capture_params(["utm_source", " "]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reject_bad_type() {
        let result = CaptureConfig::from_toml_str("expiry_days = \"thirty\"");
        assert!(matches!(result, Err(CaptureError::Toml(_))));
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = CaptureConfig::default().with_expiry_days(90).with_require_referrer(true);
        let serialized = serde_json::to_string(&config).unwrap();
        let deserialized: CaptureConfig = serde_json::from_str(&serialized).unwrap();
        assert_eq!(config, deserialized);
    }
}
