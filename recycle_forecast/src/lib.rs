//! # Recycle Forecast
//!
//! Query DSNY monthly tonnage records for one community district and find
//! which pre-fitted model best predicts its recycling proportion.
//!
//! ## Pipeline
//!
//! - **Dataset preparation** ([`data`]): parse the tonnage CSV, derive the
//!   district identifier (`bronx1`) and the recycling proportion
//!   `(paper + mgp) / (paper + mgp + refuse)`, drop months before the cutoff.
//! - **Series extraction** ([`series`]): one daily series per district inside
//!   the evaluation window, split 70/30 by position.
//! - **Model evaluation** ([`evaluation`]): forecast the test horizon with the
//!   baseline, ARIMA and SARIMA forecasters and score each by RMSE.
//! - **Selection** ([`selection`]): every model tied at the lowest RMSE.
//!
//! ## Quick Start
//!
//! ```no_run
//! use recycle_forecast::{DashboardConfig, QueryContext, QueryReport};
//!
//! let context = QueryContext::load(&DashboardConfig::default())?;
//! let outcome = context.run_query("bronx1")?;
//! print!("{}", QueryReport::new(&outcome));
//! # Ok::<(), recycle_forecast::ForecastError>(())
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod evaluation;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod selection;
pub mod series;
pub mod utils;

// Re-export commonly used types
pub use crate::config::{ConfigOverrides, DashboardConfig};
pub use crate::data::{DataLoader, DatasetPreparer, DistrictId, PreparedDataset};
pub use crate::error::{ForecastError, LookupSource};
pub use crate::evaluation::{ModelEvaluation, ModelEvaluator};
pub use crate::models::{ForecastResult, Forecaster, ForecasterSet, ForecasterTable, ModelKind};
pub use crate::pipeline::{QueryContext, QueryOutcome};
pub use crate::report::{ChartData, QueryReport};
pub use crate::selection::{select_best, BestModels};
pub use crate::series::{SeriesExtractor, SeriesOptions, TimeSeries, TrainTestSplit};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
