//! # Recycle Math
//!
//! Numeric kernels used by the recycling proportion estimator.
//! This crate provides the forecast error metrics, the positional
//! train/test split rule and the lag-polynomial algebra behind the
//! seasonal ARIMA forecast recursion.

use thiserror::Error;

pub mod metrics;
pub mod polynomial;

pub use metrics::{mean_squared_error, root_mean_squared_error, split_index};
pub use polynomial::LagPolynomial;

/// Errors that can occur in numeric calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for numeric operations
pub type Result<T> = std::result::Result<T, MathError>;
