//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Points awarded per match outcome. A loss is always worth zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_win_points")]
    pub win_points: f64,

    #[serde(default = "default_draw_points")]
    pub draw_points: f64,
}

fn default_win_points() -> f64 {
    1.0
}

fn default_draw_points() -> f64 {
    0.5
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            win_points: default_win_points(),
            draw_points: default_draw_points(),
        }
    }
}

impl ScoringConfig {
    /// Validate the scoring weights.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.win_points.is_finite() || !self.draw_points.is_finite() {
            return Err(ConfigError::ValidationError(
                "Scoring weights must be finite".to_string(),
            ));
        }

        if self.win_points < 0.0 || self.draw_points < 0.0 {
            return Err(ConfigError::ValidationError(
                "Scoring weights must not be negative".to_string(),
            ));
        }

        if self.draw_points > self.win_points {
            return Err(ConfigError::ValidationError(
                "A draw cannot be worth more than a win".to_string(),
            ));
        }

        Ok(())
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub scoring: ScoringConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            scoring: ScoringConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, or fall back to defaults when the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Log level must not be empty".to_string(),
            ));
        }

        self.scoring.validate()
    }
}
