//! Non-seasonal ARIMA forecaster

use crate::error::{ForecastError, Result};
use crate::models::{ForecastResult, Forecaster};
use recycle_math::{LagPolynomial, MathError};
use serde::{Deserialize, Serialize};

/// Fitted ARIMA(p,d,q) model (AutoRegressive Integrated Moving Average)
///
/// `history` holds the most recent observations on the original scale and
/// `residuals` the most recent in-sample innovations, newest last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArimaForecast {
    /// Fitted AR coefficients φ_1..φ_p
    #[serde(default)]
    pub ar: Vec<f64>,
    /// Fitted MA coefficients θ_1..θ_q
    #[serde(default)]
    pub ma: Vec<f64>,
    /// Differencing order (d)
    #[serde(default)]
    pub d: usize,
    /// Intercept of the differenced process
    #[serde(default)]
    pub constant: f64,
    /// Trailing observations
    pub history: Vec<f64>,
    /// Trailing residuals
    #[serde(default)]
    pub residuals: Vec<f64>,
}

impl ArimaForecast {
    /// Create a new ARIMA forecaster from fitted state
    pub fn new(ar: Vec<f64>, d: usize, ma: Vec<f64>, history: Vec<f64>) -> Self {
        Self {
            ar,
            ma,
            d,
            constant: 0.0,
            history,
            residuals: Vec::new(),
        }
    }

    pub fn with_constant(mut self, constant: f64) -> Self {
        self.constant = constant;
        self
    }

    pub fn with_residuals(mut self, residuals: Vec<f64>) -> Self {
        self.residuals = residuals;
        self
    }

    fn polynomials(&self) -> recycle_math::Result<(LagPolynomial, LagPolynomial)> {
        let ar = LagPolynomial::autoregressive(&self.ar, 1)?
            .multiply(&LagPolynomial::difference(self.d, 1)?);
        let ma = LagPolynomial::moving_average(&self.ma, 1)?;
        Ok((ar, ma))
    }

    fn recursion(&self) -> Result<LagRecursion> {
        check_orders(
            self.ar.len().checked_add(self.d),
            Some(self.ma.len()),
            &self.history,
            &self.residuals,
        )?;
        let (ar, ma) = self.polynomials().map_err(invalid_model)?;
        LagRecursion::new(&ar, &ma, self.constant)
    }
}

impl Forecaster for ArimaForecast {
    fn forecast(&self, horizons: usize) -> Result<ForecastResult> {
        let values = self
            .recursion()?
            .run(&self.history, &self.residuals, horizons)?;
        ForecastResult::new(values, horizons)
    }

    fn validate(&self) -> Result<()> {
        self.recursion()?.check_state(&self.history, &self.residuals)
    }

    fn name(&self) -> String {
        format!("ARIMA({},{},{})", self.ar.len(), self.d, self.ma.len())
    }
}

pub(crate) fn invalid_model(err: MathError) -> ForecastError {
    ForecastError::InvalidParameter(err.to_string())
}

/// Bound the nominal AR and MA orders by the stored state
///
/// Runs before any lag polynomial is expanded. `None` marks an order that
/// overflowed while being computed. The MA order may exceed the residuals
/// supplied, but not both the history and the residuals.
pub(crate) fn check_orders(
    ar_order: Option<usize>,
    ma_order: Option<usize>,
    history: &[f64],
    residuals: &[f64],
) -> Result<()> {
    let (ar_order, ma_order) = match (ar_order, ma_order) {
        (Some(ar), Some(ma)) => (ar, ma),
        _ => {
            return Err(ForecastError::InvalidParameter(
                "Model order is too large".to_string(),
            ))
        }
    };

    if ar_order > history.len() {
        return Err(ForecastError::ForecastingError(format!(
            "Model of AR order {} needs as many trailing observations, has {}",
            ar_order,
            history.len()
        )));
    }
    if ma_order > history.len().max(residuals.len()) {
        return Err(ForecastError::ForecastingError(format!(
            "Model of MA order {} stores only {} observation(s) and {} residual(s)",
            ma_order,
            history.len(),
            residuals.len()
        )));
    }
    Ok(())
}

/// `y_t = c + Σ a_l y_(t-l) + Σ b_l e_(t-l)` with future innovations zero
#[derive(Debug, Clone)]
pub(crate) struct LagRecursion {
    ar_weights: Vec<f64>,
    ma_weights: Vec<f64>,
    constant: f64,
}

impl LagRecursion {
    /// Build from the fully integrated AR side and the MA side
    pub(crate) fn new(ar: &LagPolynomial, ma: &LagPolynomial, constant: f64) -> Result<Self> {
        if !constant.is_finite() {
            return Err(ForecastError::InvalidParameter(
                "Constant must be finite".to_string(),
            ));
        }
        Ok(Self {
            ar_weights: ar.autoregressive_weights(),
            ma_weights: ma.moving_average_weights(),
            constant,
        })
    }

    /// Check the trailing state can drive the recursion
    ///
    /// Residuals older than those supplied are taken as zero, so only the
    /// history length is constrained.
    pub(crate) fn check_state(&self, history: &[f64], residuals: &[f64]) -> Result<()> {
        if history.len() < self.ar_weights.len() {
            return Err(ForecastError::ForecastingError(format!(
                "Model needs at least {} trailing observations, has {}",
                self.ar_weights.len(),
                history.len()
            )));
        }
        if history.iter().chain(residuals).any(|v| !v.is_finite()) {
            return Err(ForecastError::ForecastingError(
                "Model state contains non-finite values".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn run(&self, history: &[f64], residuals: &[f64], horizon: usize) -> Result<Vec<f64>> {
        self.check_state(history, residuals)?;

        let mut levels = history.to_vec();
        let mut shocks = vec![0.0; self.ma_weights.len().saturating_sub(residuals.len())];
        shocks.extend_from_slice(residuals);

        let mut forecasts = Vec::with_capacity(horizon);
        for _ in 0..horizon {
            let mut next = self.constant;
            for (lag, weight) in self.ar_weights.iter().enumerate() {
                next += weight * levels[levels.len() - 1 - lag];
            }
            for (lag, weight) in self.ma_weights.iter().enumerate() {
                next += weight * shocks[shocks.len() - 1 - lag];
            }

            levels.push(next);
            shocks.push(0.0);
            forecasts.push(next);
        }

        Ok(forecasts)
    }
}
