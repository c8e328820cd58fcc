//! # xrr-settings
//!
//! **Tier 0 (Pure Settings)**
//!
//! Clap-free settings for the xrr driver, loadable from TOML. These types
//! mirror CLI arguments without Clap dependencies so library consumers can
//! build them directly.
//!
//! ## What belongs here
//! * Pure data types with Serde derive
//! * Default values
//! * TOML parsing
//!
//! ## What does NOT belong here
//! * Clap parsing (see the `xrr` binary)
//! * Metric computation

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use xrr_types::{DistanceKind, MetricKind, ReportFormat};

/// Decimal places used when rendering scores unless configured otherwise.
pub const DEFAULT_DECIMALS: u32 = 4;

/// Moods reported by `xrr irep` when none are configured.
pub const DEFAULT_MOODS: [&str; 5] = ["CONTEMPLATION", "LOVE", "AWE", "SADNESS", "CONTENTMENT"];

/// Errors from settings loading.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse settings TOML: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid setting '{name}': {reason}")]
    Invalid { name: String, reason: String },
}

/// Settings shared by every xrr command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XrrSettings {
    /// Distance function comparing two annotations.
    pub distance: DistanceKind,

    /// Metric variant.
    pub metric: MetricKind,

    /// Report output format.
    pub format: ReportFormat,

    /// Decimal places for scores in text formats.
    pub decimals: u32,

    /// Worker threads for parallel reductions (`None` = one per core).
    pub threads: Option<usize>,

    /// Mood labels scored by `xrr irep`.
    pub moods: Vec<String>,
}

impl Default for XrrSettings {
    fn default() -> Self {
        Self {
            distance: DistanceKind::default(),
            metric: MetricKind::default(),
            format: ReportFormat::default(),
            decimals: DEFAULT_DECIMALS,
            threads: None,
            moods: DEFAULT_MOODS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

impl XrrSettings {
    /// Parse settings from a TOML string.
    pub fn from_toml(s: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Rejects values no command can run with.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.threads == Some(0) {
            return Err(SettingsError::Invalid {
                name: "threads".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.decimals > 12 {
            return Err(SettingsError::Invalid {
                name: "decimals".into(),
                reason: format!("{} exceeds the maximum of 12", self.decimals),
            });
        }
        Ok(())
    }
}
