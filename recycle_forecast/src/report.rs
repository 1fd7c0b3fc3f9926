//! Text and chart output for a finished query

use crate::error::Result;
use crate::pipeline::QueryOutcome;
use chrono::NaiveDate;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Title shown when the dashboard starts
pub const TITLE: &str = "Recycle Percentage Estimation Tool";

/// Prompt for the interactive district query
pub const PROMPT: &str = "Enter a borough and district (FORMAT: bronx1):";

/// RMSE lines and best-model indicator for a query
#[derive(Debug, Clone, Copy)]
pub struct QueryReport<'a> {
    outcome: &'a QueryOutcome,
}

impl<'a> QueryReport<'a> {
    pub fn new(outcome: &'a QueryOutcome) -> Self {
        Self { outcome }
    }

    /// `[ARIMA, SARIMA]`
    pub fn best_models_label(&self) -> String {
        format!("[{}]", self.outcome.best.labels().join(", "))
    }
}

impl std::fmt::Display for QueryReport<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for evaluation in &self.outcome.evaluations {
            writeln!(f, "{} RMSE: {:.3}", evaluation.model, evaluation.rmse)?;
        }
        writeln!(f, "Best model: {}", self.best_models_label())
    }
}

/// One plotted value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub series: String,
    pub value: f64,
}

/// Train, actual test and winning forecast curves
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartData {
    pub points: Vec<ChartPoint>,
}

impl ChartData {
    pub fn from_outcome(outcome: &QueryOutcome) -> Self {
        let mut points = Vec::new();
        let mut push_series = |name: &str, series: &crate::series::TimeSeries| {
            points.extend(series.points().map(|(date, value)| ChartPoint {
                date,
                series: name.to_string(),
                value,
            }));
        };

        push_series("Train", outcome.split.train());
        push_series("Actual (Test)", outcome.split.test());
        for evaluation in outcome.best_evaluations() {
            push_series(&format!("{} Forecast", evaluation.model), &evaluation.forecast);
        }

        Self { points }
    }

    /// Names of the plotted curves, in plotting order
    pub fn series_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for point in &self.points {
            if names.last() != Some(&point.series.as_str()) {
                names.push(&point.series);
            }
        }
        names
    }

    /// Write `date,series,value` rows
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for point in &self.points {
            csv_writer.serialize(point)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    pub fn write_csv_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.write_csv(File::create(path)?)
    }
}
