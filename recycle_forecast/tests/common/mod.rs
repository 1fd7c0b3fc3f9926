#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use recycle_forecast::data::RawRecord;
use recycle_forecast::models::{
    ArimaForecast, BaselineForecast, ForecasterSpec, SarimaForecast,
};
use recycle_forecast::{
    DatasetPreparer, DistrictId, ForecasterSet, ForecasterTable, ModelKind, PreparedDataset,
};

pub const HEADER: &str =
    "BOROUGH,COMMUNITYDISTRICT,MONTH,PAPERTONSCOLLECTED,MGPTONSCOLLECTED,REFUSETONSCOLLECTED,BOROUGH_ID";

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn raw(borough: &str, district: &str, month: &str, paper: f64, mgp: f64, refuse: f64) -> RawRecord {
    RawRecord {
        borough: borough.to_string(),
        borough_id: None,
        community_district: district.to_string(),
        month: month.to_string(),
        paper_tons: paper.to_string(),
        mgp_tons: mgp.to_string(),
        refuse_tons: refuse.to_string(),
    }
}

/// `days` consecutive daily rows starting at `start`
pub fn daily_rows(
    borough: &str,
    district: &str,
    start: NaiveDate,
    days: usize,
    tons: (f64, f64, f64),
) -> Vec<RawRecord> {
    (0..days)
        .map(|i| {
            let day = start + Duration::days(i as i64);
            raw(
                borough,
                district,
                &day.format("%Y-%m-%d").to_string(),
                tons.0,
                tons.1,
                tons.2,
            )
        })
        .collect()
}

pub fn prepare(rows: &[RawRecord]) -> PreparedDataset {
    DatasetPreparer::new(date(2022, 1, 1)).prepare(rows)
}

pub fn district(raw: &str) -> DistrictId {
    DistrictId::parse(raw).unwrap()
}

fn constant_arima(level: f64) -> ArimaForecast {
    ArimaForecast::new(Vec::new(), 0, Vec::new(), Vec::new()).with_constant(level)
}

fn constant_sarima(level: f64) -> SarimaForecast {
    SarimaForecast::new(1, Vec::new()).with_constant(level)
}

/// Tables whose forecasters predict a flat level for `districts`
pub fn flat_forecasters(
    districts: &[&str],
    baseline: f64,
    arima: f64,
    sarima: f64,
    horizon: usize,
) -> ForecasterSet {
    let table = |kind: ModelKind, spec: ForecasterSpec| {
        ForecasterTable::from_entries(
            kind,
            districts.iter().map(|d| (district(d), spec.clone())),
        )
        .unwrap()
    };

    ForecasterSet::new(
        table(
            ModelKind::Baseline,
            ForecasterSpec::Baseline(BaselineForecast::new(vec![baseline; horizon])),
        ),
        table(ModelKind::Arima, ForecasterSpec::Arima(constant_arima(arima))),
        table(ModelKind::Sarima, ForecasterSpec::Sarima(constant_sarima(sarima))),
    )
    .unwrap()
}
