//! # Report Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --format json                                                      │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     SALESBOARD_FIRST_PLACE_RATE=0.2                                    │
//! │     SALESBOARD_OUTPUT_FORMAT=json                                      │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config PATH, else ~/.config/salesboard/report.toml (Linux)       │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     15% / 10% / 5% bonus tiers, table output                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [bonus]
//! first_place_rate = 0.15
//! podium_rate = 0.10
//! base_rate = 0.05
//!
//! [output]
//! format = "table"  # table | json
//! ```

use std::path::PathBuf;

use clap::ValueEnum;
use salesboard_core::{AnalysisOptions, BonusByProfit, SimpleRevenue};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

pub const ENV_FIRST_PLACE_RATE: &str = "SALESBOARD_FIRST_PLACE_RATE";
pub const ENV_PODIUM_RATE: &str = "SALESBOARD_PODIUM_RATE";
pub const ENV_BASE_RATE: &str = "SALESBOARD_BASE_RATE";
pub const ENV_OUTPUT_FORMAT: &str = "SALESBOARD_OUTPUT_FORMAT";

// =============================================================================
// Output Format
// =============================================================================

/// How the report is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Terminal table with a totals line.
    #[default]
    Table,
    /// Pretty-printed JSON envelope.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(CliError::InvalidConfig(format!(
                "Unknown output format: '{}'. Valid options: table, json",
                other
            ))),
        }
    }
}

// =============================================================================
// Settings Sections
// =============================================================================

/// Bonus tier rates, as fractions of profit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusSettings {
    #[serde(default = "default_first_place_rate")]
    pub first_place_rate: f64,
    #[serde(default = "default_podium_rate")]
    pub podium_rate: f64,
    #[serde(default = "default_base_rate")]
    pub base_rate: f64,
}

fn default_first_place_rate() -> f64 {
    BonusByProfit::DEFAULT_FIRST_PLACE_RATE
}

fn default_podium_rate() -> f64 {
    BonusByProfit::DEFAULT_PODIUM_RATE
}

fn default_base_rate() -> f64 {
    BonusByProfit::DEFAULT_BASE_RATE
}

impl Default for BonusSettings {
    fn default() -> Self {
        BonusSettings {
            first_place_rate: default_first_place_rate(),
            podium_rate: default_podium_rate(),
            base_rate: default_base_rate(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,
}

// =============================================================================
// Report Config
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub bonus: BonusSettings,

    #[serde(default)]
    pub output: OutputSettings,
}

impl ReportConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (report.toml)
    /// 3. Environment variables
    ///
    /// An explicitly given path must exist; the platform default may not.
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let mut config = match config_path {
            Some(path) if !path.exists() => return Err(CliError::ConfigNotFound(path)),
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(path)?,
                path => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    fn from_file(path: PathBuf) -> CliResult<Self> {
        info!(?path, "Loading report config from file");
        let contents = std::fs::read_to_string(&path).map_err(|source| CliError::Read {
            path: path.clone(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> CliResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        let rates = [
            ("bonus.first_place_rate", self.bonus.first_place_rate),
            ("bonus.podium_rate", self.bonus.podium_rate),
            ("bonus.base_rate", self.bonus.base_rate),
        ];
        for (name, rate) in rates {
            if !(0.0..=1.0).contains(&rate) {
                return Err(CliError::InvalidConfig(format!(
                    "{} must be between 0 and 1, got {}",
                    name, rate
                )));
            }
        }
        Ok(())
    }

    /// Applies environment overrides read through `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let rate_overrides = [
            (ENV_FIRST_PLACE_RATE, &mut self.bonus.first_place_rate),
            (ENV_PODIUM_RATE, &mut self.bonus.podium_rate),
            (ENV_BASE_RATE, &mut self.bonus.base_rate),
        ];
        for (key, slot) in rate_overrides {
            if let Some(value) = lookup(key) {
                match value.parse::<f64>() {
                    Ok(rate) => {
                        debug!(key, rate, "Overriding bonus rate from environment");
                        *slot = rate;
                    }
                    Err(_) => warn!(key, value = %value, "Ignoring non-numeric bonus rate"),
                }
            }
        }

        if let Some(value) = lookup(ENV_OUTPUT_FORMAT) {
            match value.parse() {
                Ok(format) => self.output.format = format,
                Err(_) => warn!(value = %value, "Unknown output format in environment"),
            }
        }
    }

    /// The bonus policy described by this config.
    pub fn bonus_policy(&self) -> BonusByProfit {
        BonusByProfit::with_rates(
            self.bonus.first_place_rate,
            self.bonus.podium_rate,
            self.bonus.base_rate,
        )
    }

    /// Analysis options: simple revenue plus the configured bonus tiers.
    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions::new()
            .with_revenue_policy(SimpleRevenue)
            .with_bonus_policy(self.bonus_policy())
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "salesboard", "salesboard")
            .map(|dirs| dirs.config_dir().join("report.toml"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
