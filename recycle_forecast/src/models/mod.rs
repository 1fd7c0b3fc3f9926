//! Pre-fitted forecasters and the tables that hold them

use crate::data::DistrictId;
use crate::error::{ForecastError, LookupSource, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Debug;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::info;

pub mod arima;
pub mod baseline;
pub mod sarima;

pub use arima::ArimaForecast;
pub use baseline::BaselineForecast;
pub use sarima::SarimaForecast;

/// Forecast result containing predicted values
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResult {
    /// Forecasted values
    pub(crate) values: Vec<f64>,
    /// Number of periods forecasted
    horizons: usize,
}

impl ForecastResult {
    /// Create a new forecast result
    pub fn new(values: Vec<f64>, horizons: usize) -> Result<Self> {
        if values.len() != horizons {
            return Err(ForecastError::ComputationError(format!(
                "Values length ({}) doesn't match horizons ({})",
                values.len(),
                horizons
            )));
        }

        Ok(Self { values, horizons })
    }

    /// Get the forecasted values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the number of periods forecasted
    pub fn horizons(&self) -> usize {
        self.horizons
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

/// A fitted model that can project the series forward
pub trait Forecaster: Debug {
    /// Generate forecast for the next `horizons` periods
    fn forecast(&self, horizons: usize) -> Result<ForecastResult>;

    /// Check the fitted state once, when the artifact is loaded
    fn validate(&self) -> Result<()>;

    /// Descriptive name of the model, e.g. `ARIMA(1,1,0)`
    fn name(&self) -> String;
}

/// The three model slots compared for every district
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModelKind {
    Baseline,
    Arima,
    Sarima,
}

impl ModelKind {
    /// Slots in reporting order
    pub const ALL: [ModelKind; 3] = [ModelKind::Baseline, ModelKind::Arima, ModelKind::Sarima];

    pub fn label(&self) -> &'static str {
        match self {
            ModelKind::Baseline => "Baseline",
            ModelKind::Arima => "ARIMA",
            ModelKind::Sarima => "SARIMA",
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Serialized forecaster definition, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ForecasterSpec {
    Baseline(BaselineForecast),
    Arima(ArimaForecast),
    Sarima(SarimaForecast),
}

impl ForecasterSpec {
    fn as_forecaster(&self) -> &dyn Forecaster {
        match self {
            ForecasterSpec::Baseline(model) => model,
            ForecasterSpec::Arima(model) => model,
            ForecasterSpec::Sarima(model) => model,
        }
    }
}

impl Forecaster for ForecasterSpec {
    fn forecast(&self, horizons: usize) -> Result<ForecastResult> {
        self.as_forecaster().forecast(horizons)
    }

    fn validate(&self) -> Result<()> {
        self.as_forecaster().validate()
    }

    fn name(&self) -> String {
        self.as_forecaster().name()
    }
}

/// Forecasters for one model slot, keyed by district
#[derive(Debug, Clone)]
pub struct ForecasterTable {
    kind: ModelKind,
    entries: HashMap<DistrictId, ForecasterSpec>,
}

impl ForecasterTable {
    /// Build a table, validating every forecaster
    pub fn from_entries<I>(kind: ModelKind, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (DistrictId, ForecasterSpec)>,
    {
        let mut table = HashMap::new();
        for (district, spec) in entries {
            spec.validate().map_err(|err| {
                ForecastError::ForecastingError(format!(
                    "{} forecaster for '{}' is invalid: {}",
                    kind, district, err
                ))
            })?;
            if table.insert(district.clone(), spec).is_some() {
                return Err(ForecastError::InvalidParameter(format!(
                    "{} table lists district '{}' more than once",
                    kind, district
                )));
            }
        }

        Ok(Self {
            kind,
            entries: table,
        })
    }

    /// Read a JSON object of `district -> forecaster`
    pub fn from_reader<R: Read>(kind: ModelKind, reader: R) -> Result<Self> {
        let raw: HashMap<String, ForecasterSpec> = serde_json::from_reader(reader)?;
        let entries = raw
            .into_iter()
            .map(|(key, spec)| Ok((DistrictId::parse(&key)?, spec)))
            .collect::<Result<Vec<_>>>()?;
        Self::from_entries(kind, entries)
    }

    pub fn from_json_file<P: AsRef<Path>>(kind: ModelKind, path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let table = Self::from_reader(kind, BufReader::new(file))?;
        info!(model = %kind, districts = table.len(), path = %path.as_ref().display(), "Loaded forecaster table");
        Ok(table)
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    /// Forecaster for `district`, or a lookup error naming this table
    pub fn get(&self, district: &DistrictId) -> Result<&ForecasterSpec> {
        self.entries.get(district).ok_or_else(|| {
            ForecastError::lookup(
                district.as_str(),
                LookupSource::ForecasterTable(self.kind.to_string()),
            )
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The baseline, ARIMA and SARIMA tables loaded together
#[derive(Debug, Clone)]
pub struct ForecasterSet {
    baseline: ForecasterTable,
    arima: ForecasterTable,
    sarima: ForecasterTable,
}

impl ForecasterSet {
    /// Group three tables, checking each sits in its own slot
    pub fn new(
        baseline: ForecasterTable,
        arima: ForecasterTable,
        sarima: ForecasterTable,
    ) -> Result<Self> {
        for (table, expected) in [&baseline, &arima, &sarima].into_iter().zip(ModelKind::ALL) {
            if table.kind() != expected {
                return Err(ForecastError::InvalidParameter(format!(
                    "{} table supplied in the {} slot",
                    table.kind(),
                    expected
                )));
            }
        }

        Ok(Self {
            baseline,
            arima,
            sarima,
        })
    }

    /// Load the three tables from JSON files
    pub fn from_json_files<P: AsRef<Path>>(baseline: P, arima: P, sarima: P) -> Result<Self> {
        Self::new(
            ForecasterTable::from_json_file(ModelKind::Baseline, baseline)?,
            ForecasterTable::from_json_file(ModelKind::Arima, arima)?,
            ForecasterTable::from_json_file(ModelKind::Sarima, sarima)?,
        )
    }

    pub fn table(&self, kind: ModelKind) -> &ForecasterTable {
        match kind {
            ModelKind::Baseline => &self.baseline,
            ModelKind::Arima => &self.arima,
            ModelKind::Sarima => &self.sarima,
        }
    }

    /// Tables in reporting order
    pub fn tables(&self) -> [&ForecasterTable; 3] {
        [&self.baseline, &self.arima, &self.sarima]
    }
}
