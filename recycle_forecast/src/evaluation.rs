//! Scoring the three forecasters against a held-out test segment
//!
//! Forecasts are aligned to the test segment by position: step `i` of a
//! forecast is paired with the `i`-th test date. The forecaster's own step
//! cadence is never compared with the test calendar.

use crate::data::DistrictId;
use crate::error::{ForecastError, Result};
use crate::models::{Forecaster, ForecasterSet, ModelKind};
use crate::series::TimeSeries;
use recycle_math::root_mean_squared_error;
use tracing::debug;

/// Forecast and score of one model slot
#[derive(Debug, Clone, PartialEq)]
pub struct ModelEvaluation {
    /// Model slot
    pub model: ModelKind,
    /// Descriptive name of the underlying forecaster
    pub model_name: String,
    /// Forecast re-indexed onto the test dates
    pub forecast: TimeSeries,
    /// Root mean squared error against the test values
    pub rmse: f64,
}

/// Scores every forecaster for one district
#[derive(Debug, Clone, Copy)]
pub struct ModelEvaluator<'a> {
    forecasters: &'a ForecasterSet,
}

impl<'a> ModelEvaluator<'a> {
    pub fn new(forecasters: &'a ForecasterSet) -> Self {
        Self { forecasters }
    }

    /// Evaluate baseline, ARIMA and SARIMA, in that order
    ///
    /// All three lookups happen before any forecasting so a missing district
    /// is reported as a lookup error.
    pub fn evaluate(&self, district: &DistrictId, test: &TimeSeries) -> Result<Vec<ModelEvaluation>> {
        let forecasters = self
            .forecasters
            .tables()
            .into_iter()
            .map(|table| Ok((table.kind(), table.get(district)?)))
            .collect::<Result<Vec<_>>>()?;

        forecasters
            .into_iter()
            .map(|(kind, forecaster)| evaluate_forecaster(kind, forecaster, test))
            .collect()
    }
}

/// Forecast `test.len()` steps with `forecaster` and score them
pub fn evaluate_forecaster<F: Forecaster + ?Sized>(
    model: ModelKind,
    forecaster: &F,
    test: &TimeSeries,
) -> Result<ModelEvaluation> {
    if test.is_empty() {
        return Err(ForecastError::ComputationError(
            "Cannot score a forecast against an empty test segment".to_string(),
        ));
    }

    let result = forecaster.forecast(test.len())?;
    if result.values().len() != test.len() {
        return Err(ForecastError::ComputationError(format!(
            "{} produced {} value(s) for a test segment of {}",
            model,
            result.values().len(),
            test.len()
        )));
    }

    let rmse = root_mean_squared_error(test.values(), result.values())
        .map_err(|err| ForecastError::ComputationError(err.to_string()))?;
    let forecast = TimeSeries::new(test.dates().to_vec(), result.into_values())?;

    debug!(model = %model, rmse, "Scored forecaster");
    Ok(ModelEvaluation {
        model,
        model_name: forecaster.name(),
        forecast,
        rmse,
    })
}
