//! Application Configuration
//! Data path, year range, price band and chart settings, loaded from JSON.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid year range: {start} > {end}")]
    InvalidYearRange { start: i32, end: i32 },
    #[error("Invalid price band: {low} > {high}")]
    InvalidPriceBand { low: f64, high: f64 },
    #[error("Major tick step must be at least 1")]
    InvalidTickStep,
}

/// Inclusive range of years reported on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            start: 2001,
            end: 2020,
        }
    }
}

impl YearRange {
    /// Years in ascending order.
    pub fn years(&self) -> Vec<i32> {
        (self.start..=self.end).collect()
    }
}

/// Inclusive price interval used by the probability statistic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBand {
    pub low: f64,
    pub high: f64,
}

impl Default for PriceBand {
    fn default() -> Self {
        Self {
            low: 200_000.0,
            high: 300_000.0,
        }
    }
}

impl PriceBand {
    pub fn contains(&self, price: f64) -> bool {
        self.low <= price && price <= self.high
    }
}

/// Chart output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub width: u32,
    pub height: u32,
    pub major_tick_step: i32,
    /// Where `--png` writes when no explicit path is given
    pub output: PathBuf,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            major_tick_step: 5,
            output: PathBuf::from("sales_chart.png"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub years: YearRange,
    pub price_band: PriceBand,
    pub chart: ChartSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("Sales_01_20.csv"),
            years: YearRange::default(),
            price_band: PriceBand::default(),
            chart: ChartSettings::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration. Without a path the built-in defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::from_json(&text)?
            }
            None => Self::default(),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.years.start > self.years.end {
            return Err(ConfigError::InvalidYearRange {
                start: self.years.start,
                end: self.years.end,
            });
        }
        if self.price_band.low > self.price_band.high {
            return Err(ConfigError::InvalidPriceBand {
                low: self.price_band.low,
                high: self.price_band.high,
            });
        }
        if self.chart.major_tick_step < 1 {
            return Err(ConfigError::InvalidTickStep);
        }
        Ok(())
    }
}
