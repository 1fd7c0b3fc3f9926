//! Tonnage records and dataset preparation

use crate::error::{ForecastError, Result};
use crate::utils::{normalize_district_number, normalize_key, parse_month};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Columns the tonnage CSV must carry
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "BOROUGH",
    "COMMUNITYDISTRICT",
    "MONTH",
    "PAPERTONSCOLLECTED",
    "MGPTONSCOLLECTED",
    "REFUSETONSCOLLECTED",
];

/// One row of the monthly tonnage table, exactly as read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Borough name, e.g. "Staten Island"
    #[serde(rename = "BOROUGH")]
    pub borough: String,
    /// Borough geographic code, when the file carries one
    #[serde(rename = "BOROUGH_ID", default)]
    pub borough_id: Option<String>,
    /// Community-district number, e.g. "01"
    #[serde(rename = "COMMUNITYDISTRICT")]
    pub community_district: String,
    /// Month stamp, e.g. "2023 / 01"
    #[serde(rename = "MONTH")]
    pub month: String,
    #[serde(rename = "PAPERTONSCOLLECTED")]
    pub paper_tons: String,
    #[serde(rename = "MGPTONSCOLLECTED")]
    pub mgp_tons: String,
    #[serde(rename = "REFUSETONSCOLLECTED")]
    pub refuse_tons: String,
}

/// A validated tonnage record
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub borough: String,
    pub borough_id: Option<String>,
    pub community_district: String,
    /// First day of the collection month
    pub month: NaiveDate,
    /// Paper tonnage, `None` when the source cell was blank
    pub paper_tons: Option<f64>,
    /// Metal/glass/plastic tonnage, `None` when blank
    pub mgp_tons: Option<f64>,
    /// Refuse tonnage, `None` when blank
    pub refuse_tons: Option<f64>,
}

impl TryFrom<&RawRecord> for Record {
    type Error = ForecastError;

    fn try_from(raw: &RawRecord) -> Result<Self> {
        let month = parse_month(&raw.month).ok_or_else(|| {
            ForecastError::DataError(format!("Unparsable month '{}'", raw.month))
        })?;

        Ok(Record {
            borough: raw.borough.clone(),
            borough_id: raw.borough_id.clone().filter(|id| !id.trim().is_empty()),
            community_district: raw.community_district.clone(),
            month,
            paper_tons: parse_tonnage("PAPERTONSCOLLECTED", &raw.paper_tons)?,
            mgp_tons: parse_tonnage("MGPTONSCOLLECTED", &raw.mgp_tons)?,
            refuse_tons: parse_tonnage("REFUSETONSCOLLECTED", &raw.refuse_tons)?,
        })
    }
}

fn parse_tonnage(column: &str, raw: &str) -> Result<Option<f64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: f64 = trimmed.replace(',', "").parse().map_err(|_| {
        ForecastError::DataError(format!("{} is not a number: '{}'", column, raw))
    })?;

    if !value.is_finite() || value < 0.0 {
        return Err(ForecastError::DataError(format!(
            "{} must be a non-negative tonnage, got {}",
            column, value
        )));
    }

    Ok(Some(value))
}

/// Normalized borough + community-district key, e.g. `bronx1`
///
/// Lowercase with all whitespace removed, so `"Staten Island"` and
/// `" statenisland "` select the same district.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DistrictId(String);

impl DistrictId {
    /// Normalize free text into a district identifier
    pub fn parse(raw: &str) -> Result<Self> {
        let key = normalize_key(raw);
        if key.is_empty() {
            return Err(ForecastError::InvalidParameter(
                "District identifier must not be empty".to_string(),
            ));
        }
        Ok(Self(key))
    }

    /// Build the identifier of a borough and community-district pair
    pub fn from_parts(borough: &str, community_district: &str) -> Result<Self> {
        if borough.trim().is_empty() || community_district.trim().is_empty() {
            return Err(ForecastError::DataError(
                "Borough and community district are required".to_string(),
            ));
        }
        Self::parse(&format!(
            "{}{}",
            borough,
            normalize_district_number(community_district)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DistrictId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for DistrictId {
    type Error = ForecastError;

    fn try_from(raw: String) -> Result<Self> {
        Self::parse(&raw)
    }
}

impl From<DistrictId> for String {
    fn from(id: DistrictId) -> Self {
        id.0
    }
}

/// Share of collected tonnage that was recyclable
///
/// `(paper + mgp) / (paper + mgp + refuse)`. Returns `None` when any tonnage
/// is missing or the total is zero.
pub fn recycling_proportion(
    paper_tons: Option<f64>,
    mgp_tons: Option<f64>,
    refuse_tons: Option<f64>,
) -> Option<f64> {
    let recyclables = paper_tons? + mgp_tons?;
    let total = recyclables + refuse_tons?;
    if total > 0.0 {
        Some(recyclables / total)
    } else {
        None
    }
}

/// Record augmented with its district and recycling proportion
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRecord {
    pub record: Record,
    pub district: DistrictId,
    pub proportion: Option<f64>,
}

/// Records from the cutoff month onward, ready for per-district queries
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PreparedDataset {
    records: Vec<PreparedRecord>,
    rejected: usize,
}

impl PreparedDataset {
    /// Prepared records in file order
    pub fn records(&self) -> &[PreparedRecord] {
        &self.records
    }

    /// Number of raw rows rejected as malformed
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether any record belongs to `district`
    pub fn contains(&self, district: &DistrictId) -> bool {
        self.records.iter().any(|r| &r.district == district)
    }

    /// Records of one district in file order
    pub fn district_records<'a>(
        &'a self,
        district: &'a DistrictId,
    ) -> impl Iterator<Item = &'a PreparedRecord> + 'a {
        self.records.iter().filter(move |r| &r.district == district)
    }

    /// Sorted distinct district identifiers
    pub fn districts(&self) -> Vec<DistrictId> {
        self.records
            .iter()
            .map(|r| r.district.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Turns raw rows into a [`PreparedDataset`]
#[derive(Debug, Clone)]
pub struct DatasetPreparer {
    cutoff: NaiveDate,
}

impl DatasetPreparer {
    /// Keep records whose month is on or after `cutoff`
    pub fn new(cutoff: NaiveDate) -> Self {
        Self { cutoff }
    }

    pub fn cutoff(&self) -> NaiveDate {
        self.cutoff
    }

    /// Validate, filter and augment raw rows
    ///
    /// Malformed rows are logged and counted, never fatal.
    pub fn prepare(&self, raw: &[RawRecord]) -> PreparedDataset {
        let mut dataset = PreparedDataset::default();

        for (row, raw_record) in raw.iter().enumerate() {
            match self.prepare_record(raw_record) {
                Ok(Some(prepared)) => dataset.records.push(prepared),
                Ok(None) => {}
                Err(err) => {
                    warn!(row = row + 1, error = %err, "Skipping malformed tonnage row");
                    dataset.rejected += 1;
                }
            }
        }

        dataset
    }

    fn prepare_record(&self, raw: &RawRecord) -> Result<Option<PreparedRecord>> {
        let record = Record::try_from(raw)?;
        if record.month < self.cutoff {
            return Ok(None);
        }

        let district = DistrictId::from_parts(&record.borough, &record.community_district)?;
        let proportion =
            recycling_proportion(record.paper_tons, record.mgp_tons, record.refuse_tons);

        Ok(Some(PreparedRecord {
            record,
            district,
            proportion,
        }))
    }
}

/// Raw rows read from a tonnage CSV
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    /// Rows that matched the expected layout
    pub records: Vec<RawRecord>,
    /// Rows the CSV reader could not decode
    pub unreadable: usize,
}

/// Data loader for tonnage CSV files
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Read a tonnage CSV from disk
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<RawTable> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Read a tonnage CSV from any reader
    ///
    /// Fails when a required column is missing; rows with a broken layout are
    /// skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<RawTable> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|column| !headers.iter().any(|h| h == *column))
            .collect();
        if !missing.is_empty() {
            return Err(ForecastError::DataError(format!(
                "Missing required columns: {}",
                missing.join(", ")
            )));
        }

        let mut table = RawTable::default();
        for (row, result) in csv_reader.deserialize::<RawRecord>().enumerate() {
            match result {
                Ok(record) => table.records.push(record),
                Err(err) => {
                    warn!(row = row + 1, error = %err, "Skipping unreadable CSV row");
                    table.unreadable += 1;
                }
            }
        }

        info!(
            rows = table.records.len(),
            unreadable = table.unreadable,
            "Loaded tonnage table"
        );
        Ok(table)
    }
}
