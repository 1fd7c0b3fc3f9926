//! Error types for the recycle_forecast crate

use recycle_math::MathError;
use thiserror::Error;

/// Where a district lookup failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupSource {
    /// The prepared tonnage dataset
    Dataset,
    /// One of the forecaster tables, named by its model slot
    ForecasterTable(String),
}

impl std::fmt::Display for LookupSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupSource::Dataset => write!(f, "tonnage dataset"),
            LookupSource::ForecasterTable(model) => write!(f, "{} forecaster table", model),
        }
    }
}

/// Custom error types for the recycle_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Error related to malformed input data
    #[error("Data error: {0}")]
    DataError(String),

    /// The requested district is unknown
    #[error("No such district '{district}' in {location}")]
    LookupError {
        district: String,
        location: LookupSource,
    },

    /// The district series is too short to evaluate
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Scoring invariant violated while computing a forecast error
    #[error("Computation error: {0}")]
    ComputationError(String),

    /// Error related to forecasting operations
    #[error("Forecasting error: {0}")]
    ForecastingError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from configuration loading or validation
    #[error("Config error: {0}")]
    ConfigError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from the CSV reader or writer
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error from JSON (de)serialization
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ForecastError {
    /// Lookup failure for `district` in `location`
    pub fn lookup(district: impl Into<String>, location: LookupSource) -> Self {
        ForecastError::LookupError {
            district: district.into(),
            location,
        }
    }

    /// Whether this error names an unknown district
    pub fn is_lookup(&self) -> bool {
        matches!(self, ForecastError::LookupError { .. })
    }

    /// Whether this error reports a series too short to evaluate
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, ForecastError::InsufficientData(_))
    }
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<MathError> for ForecastError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InsufficientData(msg) => ForecastError::InsufficientData(msg),
            MathError::InvalidInput(msg) | MathError::CalculationError(msg) => {
                ForecastError::ComputationError(msg)
            }
        }
    }
}
