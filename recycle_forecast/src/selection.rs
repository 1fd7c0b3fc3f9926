//! Picking the best-scoring model(s)

use crate::error::{ForecastError, Result};
use crate::models::ModelKind;

/// Lowest RMSE and every model that reached it
#[derive(Debug, Clone, PartialEq)]
pub struct BestModels {
    /// Minimum score
    pub best_rmse: f64,
    /// Models whose score equals the minimum, in input order
    pub models: Vec<ModelKind>,
}

impl BestModels {
    pub fn contains(&self, model: ModelKind) -> bool {
        self.models.contains(&model)
    }

    /// Whether more than one model shares the minimum
    pub fn is_tie(&self) -> bool {
        self.models.len() > 1
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.models.iter().map(ModelKind::label).collect()
    }
}

/// Select the models with the minimum score
///
/// Ties use exact `f64` equality and keep every tied model; no single winner
/// is forced. Scores must be finite.
pub fn select_best(scores: &[(ModelKind, f64)]) -> Result<BestModels> {
    if scores.is_empty() {
        return Err(ForecastError::ComputationError(
            "No scores to rank".to_string(),
        ));
    }
    if let Some((model, score)) = scores.iter().find(|(_, score)| !score.is_finite()) {
        return Err(ForecastError::ComputationError(format!(
            "{} scored a non-finite RMSE ({})",
            model, score
        )));
    }

    let best_rmse = scores
        .iter()
        .map(|(_, score)| *score)
        .fold(f64::INFINITY, f64::min);
    let models = scores
        .iter()
        .filter(|(_, score)| *score == best_rmse)
        .map(|(model, _)| *model)
        .collect();

    Ok(BestModels { best_rmse, models })
}
