//! # Application Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     HOTELIER_ROUNDING=half_even                                        │
//! │     HOTELIER_CURRENCY=Rs.                                              │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/hotelier/report.toml (Linux)                             │
//! │     ~/Library/Application Support/com.hotelier.hotelier/report.toml    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     scale 2, half_up, last_write_wins, JSON output, "₹"                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [report]
//! scale = 2
//! rounding = "half_up"      # half_up | half_even
//!
//! [report.kot]
//! duplicates = "reject"     # last_write_wins | reject
//!
//! [output]
//! format = "text"           # json | text
//! currency_symbol = "₹"
//! ```

use hotelier_core::ReportConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

// =============================================================================
// Output Settings
// =============================================================================

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Pretty-printed JSON, amounts as strings.
    #[default]
    Json,
    /// Aligned text table with the currency symbol.
    Text,
}

impl std::str::FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" | "table" => Ok(OutputFormat::Text),
            _ => Err(ConfigError::InvalidValue("HOTELIER_OUTPUT_FORMAT".to_string())),
        }
    }
}

/// Presentation settings; the core never sees these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

impl Default for OutputSettings {
    fn default() -> Self {
        OutputSettings {
            format: OutputFormat::default(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

// =============================================================================
// App Configuration
// =============================================================================

/// Complete configuration of hotelier-report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub output: OutputSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (report.toml)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` that does not exist is an error; a missing
    /// file in the default location is not.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path));
                }
                Self::from_file(&path)?
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(?path, "Loading report config from file");
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parses a TOML document; missing sections take their defaults.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.report
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if self.output.currency_symbol.chars().count() > 8 {
            return Err(ConfigError::Invalid(
                "currency_symbol must be at most 8 characters".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    ///
    /// `lookup` is `std::env::var` in production and a map in tests.
    fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(scale) = lookup("HOTELIER_SCALE") {
            self.report.scale = scale
                .parse()
                .map_err(|_| ConfigError::InvalidValue("HOTELIER_SCALE".to_string()))?;
        }

        if let Some(mode) = lookup("HOTELIER_ROUNDING") {
            debug!(mode = %mode, "Overriding rounding mode from environment");
            self.report.rounding = mode
                .parse()
                .map_err(|_| ConfigError::InvalidValue("HOTELIER_ROUNDING".to_string()))?;
        }

        if let Some(policy) = lookup("HOTELIER_DUPLICATES") {
            self.report.kot.duplicates = policy
                .parse()
                .map_err(|_| ConfigError::InvalidValue("HOTELIER_DUPLICATES".to_string()))?;
        }

        if let Some(format) = lookup("HOTELIER_OUTPUT_FORMAT") {
            self.output.format = format.parse()?;
        }

        if let Some(symbol) = lookup("HOTELIER_CURRENCY") {
            if symbol.is_empty() {
                warn!("HOTELIER_CURRENCY is empty, amounts will print without a symbol");
            }
            self.output.currency_symbol = symbol;
        }

        Ok(())
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "hotelier", "hotelier")
            .map(|dirs| dirs.config_dir().join("report.toml"))
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotelier_core::{DuplicatePolicy, RoundingMode};
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.report.scale, 2);
        assert_eq!(config.report.rounding, RoundingMode::HalfUp);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.output.currency_symbol, "₹");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_sections() {
        let config = AppConfig::from_toml(
            r#"
            [report]
            rounding = "half_even"

            [report.kot]
            duplicates = "reject"

            [output]
            format = "text"
            "#,
        )
        .unwrap();

        assert_eq!(config.report.scale, 2);
        assert_eq!(config.report.rounding, RoundingMode::HalfEven);
        assert_eq!(config.report.kot.duplicates, DuplicatePolicy::Reject);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert_eq!(config.output.currency_symbol, "₹");
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(AppConfig::from_toml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_env_overrides(env(&[
                ("HOTELIER_SCALE", "3"),
                ("HOTELIER_ROUNDING", "bankers"),
                ("HOTELIER_DUPLICATES", "reject"),
                ("HOTELIER_OUTPUT_FORMAT", "table"),
                ("HOTELIER_CURRENCY", "Rs."),
            ]))
            .unwrap();

        assert_eq!(config.report.scale, 3);
        assert_eq!(config.report.rounding, RoundingMode::HalfEven);
        assert_eq!(config.report.kot.duplicates, DuplicatePolicy::Reject);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert_eq!(config.output.currency_symbol, "Rs.");
    }

    #[test]
    fn test_bad_env_value_is_an_error() {
        let mut config = AppConfig::default();
        let err = config
            .apply_env_overrides(env(&[("HOTELIER_ROUNDING", "ceiling")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref key) if key == "HOTELIER_ROUNDING"));
    }

    #[test]
    fn test_validation() {
        let mut config = AppConfig::default();
        config.report.scale = 9;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.output.currency_symbol = "RUPEES-INR".to_string();
        assert!(config.validate().is_err());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_default_config_path_is_under_hotelier() {
        if let Some(path) = AppConfig::default_config_path() {
            assert!(path.ends_with("hotelier/report.toml"), "{}", path.display());
        }
    }

    #[test]
    fn test_missing_explicit_path() {
        let err = AppConfig::load(Some(PathBuf::from("/nonexistent/report.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
