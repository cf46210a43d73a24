//! # Application Configuration
//!
//! Settings are read from an optional YAML file. Every key has a default, so
//! a partial file (or no file at all) is valid.
//!
//! ## YAML Format
//!
//! ```yaml
//! default_region: "midwest"
//! log_level: "info"
//! tracker:
//!   revenue_per_booking: 2000
//!   max_bookings_per_channel: 99
//!   currency_symbol: "$"
//! export:
//!   directory: "/home/me/plans"
//!   page_width: 90
//!   lines_per_page: 60
//! ```

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use shared::{Region, TrackerConfig, MAX_BOOKINGS_PER_CHANNEL};
use std::fs;
use std::path::{Path, PathBuf};

/// Plan export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory plans are written to when a request names none
    pub directory: Option<PathBuf>,
    /// Columns per line before text wraps
    pub page_width: usize,
    /// Lines per page, footer included
    pub lines_per_page: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: None,
            page_width: 90,
            lines_per_page: 60,
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub default_region: Region,
    /// Default log filter, overridden by `RUST_LOG`
    pub log_level: String,
    pub tracker: TrackerConfig,
    pub export: ExportConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_region: Region::Midwest,
            log_level: "info".to_string(),
            tracker: TrackerConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file, using defaults when it doesn't exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("⚙️ CONFIG: {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        info!("⚙️ CONFIG: Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: AppConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(1..=MAX_BOOKINGS_PER_CHANNEL).contains(&self.tracker.max_bookings_per_channel) {
            anyhow::bail!(
                "tracker.max_bookings_per_channel must be between 1 and {}",
                MAX_BOOKINGS_PER_CHANNEL
            );
        }
        if self.export.page_width < 20 {
            anyhow::bail!("export.page_width must be at least 20 columns");
        }
        if self.export.lines_per_page < 10 {
            anyhow::bail!("export.lines_per_page must be at least 10 lines");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();

        let config = AppConfig::load(&temp_dir.path().join("missing.yaml")).unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.tracker.revenue_per_booking, 2000);
        assert_eq!(config.tracker.max_bookings_per_channel, 99);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(
            &path,
            "default_region: pacific-nw\ntracker:\n  revenue_per_booking: 2500\nexport:\n  page_width: 72\n",
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();

        assert_eq!(config.default_region, Region::PacificNw);
        assert_eq!(config.tracker.revenue_per_booking, 2500);
        assert_eq!(config.tracker.max_bookings_per_channel, 99);
        assert_eq!(config.export.page_width, 72);
        assert_eq!(config.export.lines_per_page, 60);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(AppConfig::from_yaml("export:\n  page_width: 5\n").is_err());
        assert!(AppConfig::from_yaml("tracker:\n  max_bookings_per_channel: 0\n").is_err());
        assert!(AppConfig::from_yaml("default_region: atlantis\n").is_err());
    }

    #[test]
    fn test_booking_limit_above_cap_is_rejected() {
        let result = AppConfig::from_yaml("tracker:\n  max_bookings_per_channel: 4294967295\n");
        assert!(result.is_err());

        assert!(AppConfig::from_yaml("tracker:\n  max_bookings_per_channel: 100\n").is_err());

        let config = AppConfig::from_yaml("tracker:\n  max_bookings_per_channel: 50\n").unwrap();
        assert_eq!(config.tracker.max_bookings_per_channel, 50);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        assert_eq!(AppConfig::from_yaml("  \n").unwrap(), AppConfig::default());
    }
}
