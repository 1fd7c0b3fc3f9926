mod common;

use common::{daily_rows, date, district, prepare, raw};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use recycle_forecast::{
    ForecastError, LookupSource, SeriesExtractor, SeriesOptions, TimeSeries, TrainTestSplit,
};
use rstest::rstest;

#[test]
fn test_extract_filters_window_and_sorts() {
    let rows = vec![
        raw("Bronx", "1", "2023 / 03", 30.0, 0.0, 70.0),
        raw("Bronx", "1", "2022 / 12", 99.0, 0.0, 1.0),
        raw("Bronx", "1", "2023 / 01", 10.0, 0.0, 90.0),
        raw("Bronx", "1", "2025 / 01", 99.0, 0.0, 1.0),
        raw("Queens", "1", "2023 / 02", 50.0, 0.0, 50.0),
        raw("Bronx", "1", "2024 / 12", 20.0, 0.0, 80.0),
    ];
    let dataset = prepare(&rows);
    let extractor = SeriesExtractor::new(&dataset, SeriesOptions::default());

    let series = extractor.extract(&district("bronx1")).unwrap();

    assert_eq!(
        series.dates(),
        &[date(2023, 1, 1), date(2023, 3, 1), date(2024, 12, 1)]
    );
    assert_eq!(series.values(), &[0.1, 0.3, 0.2]);
}

#[test]
fn test_extract_drops_undefined_proportions() {
    let rows = vec![
        raw("Bronx", "1", "2023 / 01", 10.0, 0.0, 90.0),
        raw("Bronx", "1", "2023 / 02", 0.0, 0.0, 0.0),
        raw("Bronx", "1", "2023 / 03", 30.0, 0.0, 70.0),
    ];
    let dataset = prepare(&rows);
    let extractor = SeriesExtractor::new(&dataset, SeriesOptions::default());

    let series = extractor.extract(&district("bronx1")).unwrap();

    assert_eq!(series.dates(), &[date(2023, 1, 1), date(2023, 3, 1)]);
}

#[test]
fn test_extract_keeps_first_duplicate() {
    let rows = vec![
        raw("Bronx", "1", "2023 / 01", 10.0, 0.0, 90.0),
        raw("Bronx", "1", "2023-01-01", 50.0, 0.0, 50.0),
        raw("Bronx", "1", "2023 / 02", 30.0, 0.0, 70.0),
    ];
    let dataset = prepare(&rows);
    let extractor = SeriesExtractor::new(&dataset, SeriesOptions::default());

    let series = extractor.extract(&district("bronx1")).unwrap();

    assert_eq!(series.values(), &[0.1, 0.3]);
}

#[test]
fn test_duplicate_date_prefers_defined_proportion() {
    let rows = vec![
        raw("Bronx", "1", "2023 / 01", 0.0, 0.0, 0.0),
        raw("Bronx", "1", "2023-01-01", 20.0, 0.0, 80.0),
        raw("Bronx", "1", "2023 / 01", 50.0, 0.0, 50.0),
        raw("Bronx", "1", "2023 / 02", 30.0, 0.0, 70.0),
    ];
    let dataset = prepare(&rows);
    let extractor = SeriesExtractor::new(&dataset, SeriesOptions::default());

    let series = extractor.extract(&district("bronx1")).unwrap();

    assert_eq!(series.dates(), &[date(2023, 1, 1), date(2023, 2, 1)]);
    assert_eq!(series.values(), &[0.2, 0.3]);
}

#[test]
fn test_unknown_district_is_lookup_error() {
    let dataset = prepare(&daily_rows("Bronx", "1", date(2023, 1, 1), 10, (1.0, 1.0, 1.0)));
    let extractor = SeriesExtractor::new(&dataset, SeriesOptions::default());

    match extractor.split(&district("statenisland3")) {
        Err(ForecastError::LookupError { district, location }) => {
            assert_eq!(district, "statenisland3");
            assert_eq!(location, LookupSource::Dataset);
        }
        other => panic!("Expected LookupError, got {:?}", other),
    }
}

#[test]
fn test_district_outside_window_is_insufficient() {
    let dataset = prepare(&[raw("Bronx", "1", "2022 / 06", 1.0, 1.0, 1.0)]);
    let extractor = SeriesExtractor::new(&dataset, SeriesOptions::default());

    let series = extractor.extract(&district("bronx1")).unwrap();
    assert!(series.is_empty());

    let result = extractor.split(&district("bronx1"));
    assert!(result.unwrap_err().is_insufficient_data());
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
fn test_short_series_is_insufficient(#[case] days: usize) {
    let dataset = prepare(&daily_rows("Bronx", "1", date(2023, 1, 1), days, (1.0, 1.0, 1.0)));
    let extractor = SeriesExtractor::new(&dataset, SeriesOptions::default());

    let err = extractor.split(&district("bronx1")).unwrap_err();
    assert!(err.is_insufficient_data(), "unexpected error {:?}", err);
}

#[rstest]
#[case(4, 2, 2)]
#[case(10, 7, 3)]
#[case(24, 16, 8)]
#[case(166, 116, 50)]
fn test_split_at_seventy_percent(#[case] days: usize, #[case] train: usize, #[case] test: usize) {
    let dataset = prepare(&daily_rows("Bronx", "1", date(2023, 1, 1), days, (1.0, 1.0, 2.0)));
    let extractor = SeriesExtractor::new(&dataset, SeriesOptions::default());

    let split = extractor.split(&district("bronx1")).unwrap();

    assert_eq!(split.train().len(), train);
    assert_eq!(split.test().len(), test);
    assert_eq!(split.len(), days);
}

#[test]
fn test_split_segments_are_ordered_and_disjoint() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..50 {
        let len = rng.gen_range(0..400);
        let start = date(2023, 1, 1);
        let dates: Vec<_> = (0..len)
            .map(|i| start + chrono::Duration::days(i as i64))
            .collect();
        let values: Vec<f64> = (0..len).map(|_| rng.gen_range(0.0..1.0)).collect();
        let series = TimeSeries::new(dates, values).unwrap();

        let split = TrainTestSplit::at_ratio(&series, 0.70);

        assert_eq!(split.train().len() + split.test().len(), series.len());
        assert_eq!(split.train().len(), (series.len() as f64 * 0.70).floor() as usize);
        if let (Some(last_train), Some(first_test)) =
            (split.train().dates().last(), split.test().dates().first())
        {
            assert!(last_train < first_test);
        }

        let mut rejoined = split.train().values().to_vec();
        rejoined.extend_from_slice(split.test().values());
        assert_eq!(rejoined, series.values());
    }
}

#[test]
fn test_time_series_rejects_unordered_dates() {
    let result = TimeSeries::new(vec![date(2023, 2, 1), date(2023, 1, 1)], vec![0.1, 0.2]);
    assert!(matches!(result, Err(ForecastError::DataError(_))));

    let result = TimeSeries::new(vec![date(2023, 1, 1)], vec![0.1, 0.2]);
    assert!(matches!(result, Err(ForecastError::DataError(_))));
}

#[test]
fn test_custom_min_test_len() {
    let dataset = prepare(&daily_rows("Bronx", "1", date(2023, 1, 1), 10, (1.0, 1.0, 1.0)));
    let options = SeriesOptions {
        min_test_len: 4,
        ..SeriesOptions::default()
    };
    let extractor = SeriesExtractor::new(&dataset, options);

    assert!(extractor
        .split(&district("bronx1"))
        .unwrap_err()
        .is_insufficient_data());
}
