use recycle_forecast::{ChartData, DashboardConfig, QueryContext, QueryReport};
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Recycle Forecast: Score District Example");
    println!("========================================\n");

    let demos = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../demos");
    let config = DashboardConfig {
        data_path: demos.join("data/tonnage_sample.csv"),
        baseline_path: demos.join("models/baseline.json"),
        arima_path: demos.join("models/modeling_simple.json"),
        sarima_path: demos.join("models/modeling_tuned.json"),
        ..DashboardConfig::default()
    };

    let context = QueryContext::load(&config)?;
    println!(
        "Loaded {} records for {} districts ({} rejected)\n",
        context.dataset().len(),
        context.dataset().districts().len(),
        context.dataset().rejected()
    );

    for district in ["bronx1", "Queens 7", "statenisland3"] {
        println!("--- {} ---", district);
        match context.run_query(district) {
            Ok(outcome) => {
                print!("{}", QueryReport::new(&outcome));
                let chart = ChartData::from_outcome(&outcome);
                println!("Chart series: {}\n", chart.series_names().join(", "));
            }
            Err(e) => println!("Error: {}\n", e),
        }
    }

    Ok(())
}
