//! Forecast error metrics
//!
//! Both series are compared strictly by position: element `i` of the
//! forecast is scored against element `i` of the actual values.

use crate::{MathError, Result};

/// Mean squared error between actual and predicted values
pub fn mean_squared_error(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    if actual.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot score an empty series".to_string(),
        ));
    }
    if actual.len() != predicted.len() {
        return Err(MathError::InvalidInput(format!(
            "Actual length ({}) doesn't match predicted length ({})",
            actual.len(),
            predicted.len()
        )));
    }

    let sum: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum();

    Ok(sum / actual.len() as f64)
}

/// Root mean squared error between actual and predicted values
///
/// Fails with [`MathError::CalculationError`] when either input carries a
/// non-finite value, since the score would be meaningless for ranking.
pub fn root_mean_squared_error(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    let rmse = mean_squared_error(actual, predicted)?.sqrt();
    if !rmse.is_finite() {
        return Err(MathError::CalculationError(
            "RMSE is not a finite number".to_string(),
        ));
    }
    Ok(rmse)
}

/// Position at which a series of `len` observations is split
///
/// Returns `floor(len * train_ratio)`, evaluated in `f64` so the boundary is
/// identical for identical lengths.
pub fn split_index(len: usize, train_ratio: f64) -> usize {
    (len as f64 * train_ratio).floor() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_squared_error() {
        let actual = vec![10.0, 20.0, 30.0, 40.0, 50.0];
        let predicted = vec![12.0, 18.0, 33.0, 37.0, 52.0];

        let mse = mean_squared_error(&actual, &predicted).unwrap();
        assert_relative_eq!(mse, 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_root_mean_squared_error() {
        let actual = vec![0.2, 0.3, 0.4];
        let predicted = vec![0.2, 0.3, 0.4];
        assert_eq!(root_mean_squared_error(&actual, &predicted).unwrap(), 0.0);

        let predicted = vec![0.3, 0.4, 0.5];
        let rmse = root_mean_squared_error(&actual, &predicted).unwrap();
        assert_relative_eq!(rmse, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let result = mean_squared_error(&[1.0, 2.0, 3.0], &[1.0, 2.0]);
        assert!(matches!(result, Err(MathError::InvalidInput(_))));
    }

    #[test]
    fn test_empty_series_is_rejected() {
        let result = root_mean_squared_error(&[], &[]);
        assert!(matches!(result, Err(MathError::InsufficientData(_))));
    }

    #[test]
    fn test_non_finite_rmse_is_rejected() {
        let result = root_mean_squared_error(&[1.0, f64::NAN], &[1.0, 2.0]);
        assert!(matches!(result, Err(MathError::CalculationError(_))));
    }

    #[test]
    fn test_split_index() {
        assert_eq!(split_index(0, 0.7), 0);
        assert_eq!(split_index(2, 0.7), 1);
        assert_eq!(split_index(3, 0.7), 2);
        assert_eq!(split_index(10, 0.7), 7);
        assert_eq!(split_index(24, 0.7), 16);
        assert_eq!(split_index(100, 0.7), 70);
    }
}
