//! Per-district daily series and the positional train/test split

use crate::data::{DistrictId, PreparedDataset};
use crate::error::{ForecastError, LookupSource, Result};
use crate::utils::daily_calendar;
use chrono::NaiveDate;
use recycle_math::split_index;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Ordered dated values with strictly increasing dates
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeSeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Create a series from parallel date and value vectors
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self> {
        if dates.len() != values.len() {
            return Err(ForecastError::DataError(format!(
                "Dates length ({}) doesn't match values length ({})",
                dates.len(),
                values.len()
            )));
        }
        if dates.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(ForecastError::DataError(
                "Series dates must be strictly increasing".to_string(),
            ));
        }

        Ok(Self { dates, values })
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(date, value)` pairs in order
    pub fn points(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    /// Get a slice of the series from start to end index
    pub fn slice(&self, start: usize, end: usize) -> Self {
        let end = end.min(self.len());
        let start = start.min(end);
        Self {
            dates: self.dates[start..end].to_vec(),
            values: self.values[start..end].to_vec(),
        }
    }
}

/// Leading train segment and trailing test segment of one series
#[derive(Debug, Clone, PartialEq)]
pub struct TrainTestSplit {
    train: TimeSeries,
    test: TimeSeries,
}

impl TrainTestSplit {
    /// Split `series` at `floor(len * train_ratio)`
    pub fn at_ratio(series: &TimeSeries, train_ratio: f64) -> Self {
        let boundary = split_index(series.len(), train_ratio);
        Self {
            train: series.slice(0, boundary),
            test: series.slice(boundary, series.len()),
        }
    }

    pub fn train(&self) -> &TimeSeries {
        &self.train
    }

    pub fn test(&self) -> &TimeSeries {
        &self.test
    }

    /// Length of the series the split was made from
    pub fn len(&self) -> usize {
        self.train.len() + self.test.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Window and split settings for series extraction
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesOptions {
    /// First day of the evaluation window (inclusive)
    pub window_start: NaiveDate,
    /// End of the evaluation window (exclusive)
    pub window_end: NaiveDate,
    /// Share of observations assigned to the train segment
    pub train_ratio: f64,
    /// Smallest test segment that can be scored
    pub min_test_len: usize,
}

impl Default for SeriesOptions {
    fn default() -> Self {
        Self {
            window_start: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default(),
            window_end: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default(),
            train_ratio: 0.70,
            min_test_len: 2,
        }
    }
}

/// Slices a prepared dataset into per-district series
#[derive(Debug, Clone)]
pub struct SeriesExtractor<'a> {
    dataset: &'a PreparedDataset,
    options: SeriesOptions,
}

impl<'a> SeriesExtractor<'a> {
    pub fn new(dataset: &'a PreparedDataset, options: SeriesOptions) -> Self {
        Self { dataset, options }
    }

    pub fn options(&self) -> &SeriesOptions {
        &self.options
    }

    /// Daily series of `district` inside the evaluation window
    ///
    /// Days without an observation, and observations without a defined
    /// proportion, are dropped rather than filled. When a date repeats, the
    /// first record with a defined proportion wins. A district inside the
    /// dataset but with nothing in the window yields an empty series.
    pub fn extract(&self, district: &DistrictId) -> Result<TimeSeries> {
        if !self.dataset.contains(district) {
            return Err(ForecastError::lookup(
                district.as_str(),
                LookupSource::Dataset,
            ));
        }

        let mut by_date: BTreeMap<NaiveDate, Option<f64>> = BTreeMap::new();
        for prepared in self.dataset.district_records(district) {
            let date = prepared.record.month;
            if date < self.options.window_start || date >= self.options.window_end {
                continue;
            }
            match by_date.entry(date) {
                Entry::Vacant(slot) => {
                    slot.insert(prepared.proportion);
                }
                Entry::Occupied(mut slot) => {
                    if slot.get().is_none() && prepared.proportion.is_some() {
                        slot.insert(prepared.proportion);
                    } else {
                        warn!(%district, %date, "Ignoring duplicate record for date");
                    }
                }
            }
        }

        let (first, last) = match (by_date.keys().next(), by_date.keys().next_back()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return Ok(TimeSeries::default()),
        };

        let mut dates = Vec::new();
        let mut values = Vec::new();
        for day in daily_calendar(first, last) {
            if let Some(Some(value)) = by_date.get(&day) {
                dates.push(day);
                values.push(*value);
            }
        }

        debug!(%district, observations = values.len(), "Extracted daily series");
        TimeSeries::new(dates, values)
    }

    /// Extract the district series and split it into train and test
    ///
    /// Fails with [`ForecastError::InsufficientData`] when the series has
    /// fewer than two observations or either segment is too short to score.
    pub fn split(&self, district: &DistrictId) -> Result<TrainTestSplit> {
        let series = self.extract(district)?;
        if series.len() < 2 {
            return Err(ForecastError::InsufficientData(format!(
                "District '{}' has {} observation(s) between {} and {}",
                district,
                series.len(),
                self.options.window_start,
                self.options.window_end
            )));
        }

        let split = TrainTestSplit::at_ratio(&series, self.options.train_ratio);
        if split.train().is_empty() || split.test().len() < self.options.min_test_len {
            return Err(ForecastError::InsufficientData(format!(
                "District '{}' splits into {} train and {} test observation(s), need at least 1 and {}",
                district,
                split.train().len(),
                split.test().len(),
                self.options.min_test_len
            )));
        }

        debug!(
            %district,
            train = split.train().len(),
            test = split.test().len(),
            "Split series"
        );
        Ok(split)
    }
}
