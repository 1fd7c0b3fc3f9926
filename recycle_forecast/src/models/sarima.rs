//! Seasonal ARIMA forecaster

use crate::error::{ForecastError, Result};
use crate::models::arima::{check_orders, invalid_model, LagRecursion};
use crate::models::{ForecastResult, Forecaster};
use recycle_math::LagPolynomial;
use serde::{Deserialize, Serialize};

/// Fitted SARIMA(p,d,q)(P,D,Q,s) model
///
/// The seasonal and non-seasonal factors are multiplied out into a single
/// recursion over the original-scale history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SarimaForecast {
    #[serde(default)]
    pub ar: Vec<f64>,
    #[serde(default)]
    pub ma: Vec<f64>,
    #[serde(default)]
    pub d: usize,
    /// Seasonal AR coefficients Φ_1..Φ_P
    #[serde(default)]
    pub seasonal_ar: Vec<f64>,
    /// Seasonal MA coefficients Θ_1..Θ_Q
    #[serde(default)]
    pub seasonal_ma: Vec<f64>,
    /// Seasonal differencing order (D)
    #[serde(default)]
    pub seasonal_d: usize,
    /// Season length in observations (s)
    pub period: usize,
    #[serde(default)]
    pub constant: f64,
    pub history: Vec<f64>,
    #[serde(default)]
    pub residuals: Vec<f64>,
}

impl SarimaForecast {
    /// Seasonal model with no fitted coefficients yet; add them with the
    /// builder methods.
    pub fn new(period: usize, history: Vec<f64>) -> Self {
        Self {
            ar: Vec::new(),
            ma: Vec::new(),
            d: 0,
            seasonal_ar: Vec::new(),
            seasonal_ma: Vec::new(),
            seasonal_d: 0,
            period,
            constant: 0.0,
            history,
            residuals: Vec::new(),
        }
    }

    pub fn with_order(mut self, ar: Vec<f64>, d: usize, ma: Vec<f64>) -> Self {
        self.ar = ar;
        self.d = d;
        self.ma = ma;
        self
    }

    pub fn with_seasonal_order(mut self, ar: Vec<f64>, d: usize, ma: Vec<f64>) -> Self {
        self.seasonal_ar = ar;
        self.seasonal_d = d;
        self.seasonal_ma = ma;
        self
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
        let s = self.period;
        let ar = LagPolynomial::autoregressive(&self.ar, 1)?
            .multiply(&LagPolynomial::autoregressive(&self.seasonal_ar, s)?)
            .multiply(&LagPolynomial::difference(self.d, 1)?)
            .multiply(&LagPolynomial::difference(self.seasonal_d, s)?);
        let ma = LagPolynomial::moving_average(&self.ma, 1)?
            .multiply(&LagPolynomial::moving_average(&self.seasonal_ma, s)?);
        Ok((ar, ma))
    }

    fn recursion(&self) -> Result<LagRecursion> {
        if self.period == 0 {
            return Err(ForecastError::InvalidParameter(
                "Seasonal period must be greater than zero".to_string(),
            ));
        }

        // p + d + s(P + D) and q + sQ
        let s = self.period;
        let ar_order = self
            .seasonal_ar
            .len()
            .checked_add(self.seasonal_d)
            .and_then(|seasonal| seasonal.checked_mul(s))
            .and_then(|order| order.checked_add(self.ar.len()))
            .and_then(|order| order.checked_add(self.d));
        let ma_order = self
            .seasonal_ma
            .len()
            .checked_mul(s)
            .and_then(|order| order.checked_add(self.ma.len()));
        check_orders(ar_order, ma_order, &self.history, &self.residuals)?;

        let (ar, ma) = self.polynomials().map_err(invalid_model)?;
        LagRecursion::new(&ar, &ma, self.constant)
    }
}

impl Forecaster for SarimaForecast {
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
        format!(
            "SARIMA({},{},{})({},{},{},{})",
            self.ar.len(),
            self.d,
            self.ma.len(),
            self.seasonal_ar.len(),
            self.seasonal_d,
            self.seasonal_ma.len(),
            self.period
        )
    }
}
