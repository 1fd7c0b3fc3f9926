//! One district query, end to end
//!
//! The prepared dataset and the forecaster tables are loaded once into a
//! [`QueryContext`] and only read afterwards, so any number of queries can
//! run against the same context.

use crate::config::DashboardConfig;
use crate::data::{DataLoader, DatasetPreparer, DistrictId, PreparedDataset};
use crate::error::Result;
use crate::evaluation::{ModelEvaluation, ModelEvaluator};
use crate::models::{ForecasterSet, ModelKind};
use crate::selection::{select_best, BestModels};
use crate::series::{SeriesExtractor, SeriesOptions, TrainTestSplit};
use tracing::{debug, info};

/// Read-only state shared by every query
#[derive(Debug, Clone)]
pub struct QueryContext {
    dataset: PreparedDataset,
    forecasters: ForecasterSet,
    options: SeriesOptions,
}

impl QueryContext {
    pub fn new(dataset: PreparedDataset, forecasters: ForecasterSet, options: SeriesOptions) -> Self {
        Self {
            dataset,
            forecasters,
            options,
        }
    }

    /// Load the tonnage CSV and the three forecaster tables named by `config`
    pub fn load(config: &DashboardConfig) -> Result<Self> {
        config.validate()?;

        let raw = DataLoader::from_csv(&config.data_path)?;
        let dataset = DatasetPreparer::new(config.cutoff).prepare(&raw.records);
        info!(
            records = dataset.len(),
            rejected = dataset.rejected() + raw.unreadable,
            districts = dataset.districts().len(),
            "Prepared tonnage dataset"
        );

        let forecasters = ForecasterSet::from_json_files(
            &config.baseline_path,
            &config.arima_path,
            &config.sarima_path,
        )?;

        Ok(Self::new(dataset, forecasters, config.series_options()))
    }

    pub fn dataset(&self) -> &PreparedDataset {
        &self.dataset
    }

    pub fn forecasters(&self) -> &ForecasterSet {
        &self.forecasters
    }

    pub fn options(&self) -> &SeriesOptions {
        &self.options
    }

    /// Run the full pipeline for a free-text district identifier
    ///
    /// Errors stay scoped to this query; the context is never modified.
    pub fn run_query(&self, input: &str) -> Result<QueryOutcome> {
        let district = DistrictId::parse(input)?;
        debug!(%district, "Running query");

        let split = SeriesExtractor::new(&self.dataset, self.options.clone()).split(&district)?;
        let evaluations = ModelEvaluator::new(&self.forecasters).evaluate(&district, split.test())?;

        let scores: Vec<(ModelKind, f64)> = evaluations.iter().map(|e| (e.model, e.rmse)).collect();
        let best = select_best(&scores)?;
        info!(%district, best = ?best.labels(), best_rmse = best.best_rmse, "Query complete");

        Ok(QueryOutcome {
            district,
            split,
            evaluations,
            best,
        })
    }
}

/// Everything a single query produced
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    pub district: DistrictId,
    pub split: TrainTestSplit,
    /// Baseline, ARIMA and SARIMA evaluations in that order
    pub evaluations: Vec<ModelEvaluation>,
    pub best: BestModels,
}

impl QueryOutcome {
    pub fn evaluation(&self, model: ModelKind) -> Option<&ModelEvaluation> {
        self.evaluations.iter().find(|e| e.model == model)
    }

    /// Evaluations of the winning model(s)
    pub fn best_evaluations(&self) -> impl Iterator<Item = &ModelEvaluation> {
        self.evaluations
            .iter()
            .filter(|e| self.best.contains(e.model))
    }
}
