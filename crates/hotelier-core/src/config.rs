//! # Report Configuration
//!
//! Knobs that change computed output: rounding scale, rounding strategy and
//! the duplicate-name policy of the KOT diff.
//!
//! ## Where Configuration Comes From
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Ownership                              │
//! │                                                                         │
//! │  hotelier-core (this module)                                           │
//! │  └── ReportConfig: plain data + validate(), serde defaults             │
//! │                                                                         │
//! │  hotelier-report (app)                                                 │
//! │  └── AppConfig: report.toml → env overrides → ReportConfig             │
//! │                                                                         │
//! │  The core never reads files or environment variables.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## File Format (as embedded by the app)
//! ```toml
//! [report]
//! scale = 2
//! rounding = "half_up"
//!
//! [report.kot]
//! duplicates = "last_write_wins"
//! ```

use rust_decimal::RoundingStrategy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, ValidationError};

/// Largest supported output scale.
pub const MAX_SCALE: u32 = 6;

// =============================================================================
// Rounding Mode
// =============================================================================

/// How a value exactly halfway between two outputs is rounded.
///
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────┐
/// │  value      HALF_UP (default)     HALF_EVEN                         │
/// │  2.345  ──► 2.35                  2.34                              │
/// │  2.355  ──► 2.36                  2.36                              │
/// │  -2.345 ──► -2.35                 -2.34                             │
/// └─────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Round half away from zero (what printed Indian invoices use).
    #[default]
    HalfUp,

    /// Bankers rounding: round half to the nearest even digit.
    HalfEven,
}

impl RoundingMode {
    pub(crate) fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundingMode::HalfUp => write!(f, "half_up"),
            RoundingMode::HalfEven => write!(f, "half_even"),
        }
    }
}

impl FromStr for RoundingMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "half_up" | "half-up" | "up" => Ok(RoundingMode::HalfUp),
            "half_even" | "half-even" | "even" | "bankers" => Ok(RoundingMode::HalfEven),
            other => Err(CoreError::invalid_input(
                "rounding",
                format!("unknown rounding mode '{}', expected half_up or half_even", other),
            )),
        }
    }
}

// =============================================================================
// KOT Settings
// =============================================================================

/// What to do when one order snapshot names the same item twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Later quantity replaces the earlier one; the item keeps the position
    /// of its first occurrence.
    #[default]
    LastWriteWins,

    /// Fail with [`CoreError::DuplicateItem`].
    Reject,
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicatePolicy::LastWriteWins => write!(f, "last_write_wins"),
            DuplicatePolicy::Reject => write!(f, "reject"),
        }
    }
}

impl FromStr for DuplicatePolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "last_write_wins" | "last-write-wins" | "last" => Ok(DuplicatePolicy::LastWriteWins),
            "reject" | "error" => Ok(DuplicatePolicy::Reject),
            other => Err(CoreError::invalid_input(
                "duplicates",
                format!(
                    "unknown duplicate policy '{}', expected last_write_wins or reject",
                    other
                ),
            )),
        }
    }
}

/// Order-diff settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KotConfig {
    #[serde(default)]
    pub duplicates: DuplicatePolicy,
}

// =============================================================================
// Report Configuration
// =============================================================================

/// Complete configuration for the reporting core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Fractional digits kept at the output boundary.
    #[serde(default = "default_scale")]
    pub scale: u32,

    /// Midpoint rounding strategy.
    #[serde(default)]
    pub rounding: RoundingMode,

    /// Order-diff settings.
    #[serde(default)]
    pub kot: KotConfig,
}

fn default_scale() -> u32 {
    2
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            scale: default_scale(),
            rounding: RoundingMode::default(),
            kot: KotConfig::default(),
        }
    }
}

impl ReportConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.scale > MAX_SCALE {
            return Err(ValidationError::OutOfRange {
                field: "scale".to_string(),
                min: 0,
                max: MAX_SCALE as i64,
            });
        }

        Ok(())
    }
}
