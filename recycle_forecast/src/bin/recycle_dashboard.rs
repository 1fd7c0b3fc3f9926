//! Command-line dashboard: score the baseline, ARIMA and SARIMA forecasters
//! for a community district.

use anyhow::Context as _;
use chrono::NaiveDate;
use clap::Parser;
use recycle_forecast::report::{PROMPT, TITLE};
use recycle_forecast::{ChartData, ConfigOverrides, DashboardConfig, QueryContext, QueryReport};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "recycle_dashboard")]
#[command(about = "Compare recycling proportion forecasters by district", long_about = None)]
struct Args {
    /// JSON config file; flags below override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Monthly tonnage CSV
    #[arg(long)]
    data: Option<PathBuf>,

    /// Baseline forecaster table (JSON)
    #[arg(long)]
    baseline: Option<PathBuf>,

    /// ARIMA forecaster table (JSON)
    #[arg(long)]
    arima: Option<PathBuf>,

    /// SARIMA forecaster table (JSON)
    #[arg(long)]
    sarima: Option<PathBuf>,

    /// Drop records before this month (YYYY-MM-DD)
    #[arg(long)]
    cutoff: Option<NaiveDate>,

    /// First day of the evaluation window (YYYY-MM-DD)
    #[arg(long)]
    window_start: Option<NaiveDate>,

    /// End of the evaluation window, exclusive (YYYY-MM-DD)
    #[arg(long)]
    window_end: Option<NaiveDate>,

    /// Share of each series used for training
    #[arg(long)]
    train_ratio: Option<f64>,

    /// Smallest test segment that can be scored
    #[arg(long)]
    min_test_len: Option<usize>,

    /// Run a single query instead of reading districts from stdin
    #[arg(short, long)]
    district: Option<String>,

    /// Write the chart series of each query to this CSV file
    #[arg(long)]
    chart_out: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> anyhow::Result<(DashboardConfig, Option<String>, Option<PathBuf>)> {
        let config = match &self.config {
            Some(path) => DashboardConfig::from_json_file(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => DashboardConfig::default(),
        };

        let overrides = ConfigOverrides {
            data_path: self.data,
            baseline_path: self.baseline,
            arima_path: self.arima,
            sarima_path: self.sarima,
            cutoff: self.cutoff,
            window_start: self.window_start,
            window_end: self.window_end,
            train_ratio: self.train_ratio,
            min_test_len: self.min_test_len,
        };
        let config = config
            .with_overrides(overrides)
            .context("applying command-line overrides")?;

        Ok((config, self.district, self.chart_out))
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recycle_forecast=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let (config, district, chart_out) = Args::parse().into_config()?;
    let context = QueryContext::load(&config).with_context(|| {
        format!(
            "loading {} and forecaster tables",
            config.data_path.display()
        )
    })?;

    if let Some(district) = district {
        let outcome = context
            .run_query(&district)
            .with_context(|| format!("query '{}'", district))?;
        print!("{}", QueryReport::new(&outcome));
        if let Some(path) = &chart_out {
            ChartData::from_outcome(&outcome).write_csv_file(path)?;
        }
        return Ok(());
    }

    println!("{}", TITLE);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("{} ", PROMPT);
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match context.run_query(input) {
            Ok(outcome) => {
                print!("{}", QueryReport::new(&outcome));
                if let Some(path) = &chart_out {
                    if let Err(err) = ChartData::from_outcome(&outcome).write_csv_file(path) {
                        eprintln!("Could not write chart to {}: {}", path.display(), err);
                    }
                }
            }
            Err(err) => println!("{}", err),
        }
    }

    Ok(())
}
