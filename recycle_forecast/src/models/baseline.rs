//! Baseline forecaster backed by stored predictions

use crate::error::{ForecastError, Result};
use crate::models::{ForecastResult, Forecaster};
use serde::{Deserialize, Serialize};

/// Pre-computed naive forecast for the evaluation horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineForecast {
    /// Stored predictions, earliest first
    pub values: Vec<f64>,
}

impl BaselineForecast {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }
}

impl Forecaster for BaselineForecast {
    /// The leading `horizons` stored predictions
    fn forecast(&self, horizons: usize) -> Result<ForecastResult> {
        if horizons > self.values.len() {
            return Err(ForecastError::ComputationError(format!(
                "Baseline stores {} prediction(s) but {} were requested",
                self.values.len(),
                horizons
            )));
        }
        ForecastResult::new(self.values[..horizons].to_vec(), horizons)
    }

    fn validate(&self) -> Result<()> {
        if self.values.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::ForecastingError(
                "Baseline predictions contain non-finite values".to_string(),
            ));
        }
        Ok(())
    }

    fn name(&self) -> String {
        "Baseline".to_string()
    }
}
