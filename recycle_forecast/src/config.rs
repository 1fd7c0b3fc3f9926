//! Runtime configuration for the dashboard

use crate::error::{ForecastError, Result};
use crate::series::SeriesOptions;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Paths and windows used to build a [`crate::pipeline::QueryContext`]
///
/// Missing fields in a JSON config file fall back to [`Default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Monthly tonnage CSV
    pub data_path: PathBuf,
    /// Baseline forecaster table
    pub baseline_path: PathBuf,
    /// Non-seasonal ARIMA forecaster table
    pub arima_path: PathBuf,
    /// Seasonal ARIMA forecaster table
    pub sarima_path: PathBuf,
    /// Records before this month are discarded at load time
    pub cutoff: NaiveDate,
    /// First day of the evaluation window (inclusive)
    pub window_start: NaiveDate,
    /// End of the evaluation window (exclusive)
    pub window_end: NaiveDate,
    /// Share of the series used for training
    pub train_ratio: f64,
    /// Smallest test segment that can be scored
    pub min_test_len: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let options = SeriesOptions::default();
        Self {
            data_path: PathBuf::from("data/DSNY_Monthly_Tonnage_Data.csv"),
            baseline_path: PathBuf::from("models/baseline.json"),
            arima_path: PathBuf::from("models/modeling_simple.json"),
            sarima_path: PathBuf::from("models/modeling_tuned.json"),
            cutoff: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap_or_default(),
            window_start: options.window_start,
            window_end: options.window_end,
            train_ratio: options.train_ratio,
            min_test_len: options.min_test_len,
        }
    }
}

impl DashboardConfig {
    /// Load and validate a JSON config file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the windows and ratios describe a usable evaluation
    pub fn validate(&self) -> Result<()> {
        if !(self.train_ratio > 0.0 && self.train_ratio < 1.0) {
            return Err(ForecastError::ConfigError(format!(
                "train_ratio must be between 0 and 1, got {}",
                self.train_ratio
            )));
        }
        if self.window_start >= self.window_end {
            return Err(ForecastError::ConfigError(format!(
                "Evaluation window {}..{} is empty",
                self.window_start, self.window_end
            )));
        }
        if self.min_test_len == 0 {
            return Err(ForecastError::ConfigError(
                "min_test_len must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Replace every field `overrides` sets, then validate the result
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Result<Self> {
        if let Some(path) = overrides.data_path {
            self.data_path = path;
        }
        if let Some(path) = overrides.baseline_path {
            self.baseline_path = path;
        }
        if let Some(path) = overrides.arima_path {
            self.arima_path = path;
        }
        if let Some(path) = overrides.sarima_path {
            self.sarima_path = path;
        }
        if let Some(cutoff) = overrides.cutoff {
            self.cutoff = cutoff;
        }
        if let Some(start) = overrides.window_start {
            self.window_start = start;
        }
        if let Some(end) = overrides.window_end {
            self.window_end = end;
        }
        if let Some(ratio) = overrides.train_ratio {
            self.train_ratio = ratio;
        }
        if let Some(min_test_len) = overrides.min_test_len {
            self.min_test_len = min_test_len;
        }

        self.validate()?;
        Ok(self)
    }

    /// Options for the series extractor
    pub fn series_options(&self) -> SeriesOptions {
        SeriesOptions {
            window_start: self.window_start,
            window_end: self.window_end,
            train_ratio: self.train_ratio,
            min_test_len: self.min_test_len,
        }
    }
}

/// Individual fields to replace in a [`DashboardConfig`], e.g. from CLI flags
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub data_path: Option<PathBuf>,
    pub baseline_path: Option<PathBuf>,
    pub arima_path: Option<PathBuf>,
    pub sarima_path: Option<PathBuf>,
    pub cutoff: Option<NaiveDate>,
    pub window_start: Option<NaiveDate>,
    pub window_end: Option<NaiveDate>,
    pub train_ratio: Option<f64>,
    pub min_test_len: Option<usize>,
}
