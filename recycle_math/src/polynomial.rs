//! Lag polynomial algebra
//!
//! Polynomials in the backshift operator `B`, stored as dense coefficient
//! vectors where index `i` holds the coefficient of `B^i`. Every polynomial
//! built here has a leading coefficient of `1.0`.
//!
//! A multiplicative seasonal ARIMA model
//! `φ(B)Φ(B^s)(1-B)^d(1-B^s)^D y_t = c + θ(B)Θ(B^s) e_t`
//! is reduced to a single recursion by multiplying the factors out.

use crate::{MathError, Result};

/// Polynomial in the backshift operator
#[derive(Debug, Clone, PartialEq)]
pub struct LagPolynomial {
    coefficients: Vec<f64>,
}

impl LagPolynomial {
    /// The identity polynomial `1`
    pub fn one() -> Self {
        Self {
            coefficients: vec![1.0],
        }
    }

    /// Autoregressive factor `1 - Σ φ_i B^(i·lag)`
    pub fn autoregressive(phi: &[f64], lag: usize) -> Result<Self> {
        Self::from_terms(phi, lag, -1.0)
    }

    /// Moving-average factor `1 + Σ θ_i B^(i·lag)`
    pub fn moving_average(theta: &[f64], lag: usize) -> Result<Self> {
        Self::from_terms(theta, lag, 1.0)
    }

    /// Differencing factor `(1 - B^lag)^order`
    pub fn difference(order: usize, lag: usize) -> Result<Self> {
        let single = Self::from_terms(&[1.0], lag, -1.0)?;
        let mut result = Self::one();
        for _ in 0..order {
            result = result.multiply(&single);
        }
        Ok(result)
    }

    fn from_terms(terms: &[f64], lag: usize, sign: f64) -> Result<Self> {
        if lag == 0 {
            return Err(MathError::InvalidInput(
                "Lag must be greater than zero".to_string(),
            ));
        }
        if let Some(bad) = terms.iter().find(|t| !t.is_finite()) {
            return Err(MathError::InvalidInput(format!(
                "Polynomial coefficient must be finite, got {}",
                bad
            )));
        }

        let len = terms
            .len()
            .checked_mul(lag)
            .and_then(|degree| degree.checked_add(1))
            .ok_or_else(|| {
                MathError::InvalidInput(format!(
                    "Polynomial of {} term(s) at lag {} is too large",
                    terms.len(),
                    lag
                ))
            })?;

        let mut coefficients = vec![0.0; len];
        coefficients[0] = 1.0;
        for (i, term) in terms.iter().enumerate() {
            coefficients[(i + 1) * lag] = sign * term;
        }

        Ok(Self { coefficients }.trimmed())
    }

    /// Product of two lag polynomials
    pub fn multiply(&self, other: &Self) -> Self {
        let mut coefficients = vec![0.0; self.coefficients.len() + other.coefficients.len() - 1];
        for (i, a) in self.coefficients.iter().enumerate() {
            if *a == 0.0 {
                continue;
            }
            for (j, b) in other.coefficients.iter().enumerate() {
                coefficients[i + j] += a * b;
            }
        }
        Self { coefficients }.trimmed()
    }

    // Trailing zero coefficients would inflate the degree.
    fn trimmed(mut self) -> Self {
        while self.coefficients.len() > 1 && self.coefficients.last() == Some(&0.0) {
            self.coefficients.pop();
        }
        self
    }

    /// Highest power of `B` with a non-zero coefficient
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Raw coefficients, index `i` for `B^i`
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Weights `a_l` such that the left-hand side moves to
    /// `y_t = Σ a_l y_(t-l) + ...`, i.e. the negated tail.
    pub fn autoregressive_weights(&self) -> Vec<f64> {
        self.coefficients[1..].iter().map(|c| -c).collect()
    }

    /// Weights `b_l` of the right-hand side `Σ b_l e_(t-l)`, i.e. the tail.
    pub fn moving_average_weights(&self) -> Vec<f64> {
        self.coefficients[1..].to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_autoregressive_factor() {
        let ar = LagPolynomial::autoregressive(&[0.5, -0.2], 1).unwrap();
        assert_eq!(ar.coefficients(), &[1.0, -0.5, 0.2]);
        assert_eq!(ar.autoregressive_weights(), vec![0.5, -0.2]);
    }

    #[test]
    fn test_seasonal_factor_spacing() {
        let sar = LagPolynomial::autoregressive(&[0.3], 12).unwrap();
        assert_eq!(sar.degree(), 12);
        assert_eq!(sar.coefficients()[12], -0.3);
        assert!(sar.coefficients()[1..12].iter().all(|c| *c == 0.0));
    }

    #[test]
    fn test_difference_matches_binomial() {
        let d2 = LagPolynomial::difference(2, 1).unwrap();
        assert_eq!(d2.coefficients(), &[1.0, -2.0, 1.0]);

        let none = LagPolynomial::difference(0, 4).unwrap();
        assert_eq!(none, LagPolynomial::one());
    }

    #[test]
    fn test_multiply_expands_seasonal_model() {
        // (1 - 0.5B)(1 - 0.4B^2) = 1 - 0.5B - 0.4B^2 + 0.2B^3
        let ar = LagPolynomial::autoregressive(&[0.5], 1).unwrap();
        let sar = LagPolynomial::autoregressive(&[0.4], 2).unwrap();
        let product = ar.multiply(&sar);

        let weights = product.autoregressive_weights();
        assert_eq!(weights.len(), 3);
        assert_relative_eq!(weights[0], 0.5);
        assert_relative_eq!(weights[1], 0.4);
        assert_relative_eq!(weights[2], -0.2);
    }

    #[test]
    fn test_empty_terms_give_identity() {
        let ma = LagPolynomial::moving_average(&[], 1).unwrap();
        assert_eq!(ma, LagPolynomial::one());
        assert!(ma.moving_average_weights().is_empty());
    }

    #[test]
    fn test_zero_terms_are_trimmed() {
        let ar = LagPolynomial::autoregressive(&[0.0, 0.0], 1).unwrap();
        assert_eq!(ar.degree(), 0);
    }

    #[test]
    fn test_invalid_input() {
        assert!(LagPolynomial::autoregressive(&[0.5], 0).is_err());
        assert!(LagPolynomial::moving_average(&[f64::NAN], 1).is_err());
        assert!(LagPolynomial::difference(1, 0).is_err());
    }

    #[test]
    fn test_degree_overflow_is_invalid_input() {
        assert!(matches!(
            LagPolynomial::difference(1, usize::MAX),
            Err(MathError::InvalidInput(_))
        ));
        assert!(matches!(
            LagPolynomial::autoregressive(&[0.1, 0.1], usize::MAX / 2 + 1),
            Err(MathError::InvalidInput(_))
        ));
    }
}
