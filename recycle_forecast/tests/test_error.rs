use recycle_forecast::error::{ForecastError, LookupSource};
use recycle_math::MathError;
use std::io;

#[test]
fn test_error_conversion() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let forecast_error = ForecastError::from(io_error);
    assert!(matches!(forecast_error, ForecastError::IoError(_)));

    let json_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let forecast_error = ForecastError::from(json_error);
    assert!(matches!(forecast_error, ForecastError::JsonError(_)));
}

#[test]
fn test_math_error_conversion() {
    let err = ForecastError::from(MathError::InsufficientData("empty".to_string()));
    assert!(err.is_insufficient_data());

    let err = ForecastError::from(MathError::InvalidInput("length mismatch".to_string()));
    assert!(matches!(err, ForecastError::ComputationError(ref msg) if msg == "length mismatch"));

    let err = ForecastError::from(MathError::CalculationError("NaN".to_string()));
    assert!(matches!(err, ForecastError::ComputationError(_)));
}

#[test]
fn test_error_display() {
    let error = ForecastError::InvalidParameter("period must be positive".to_string());
    assert_eq!(error.to_string(), "Invalid parameter: period must be positive");

    let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
    let error_string = ForecastError::from(io_error).to_string();
    assert!(error_string.contains("IO error"));
    assert!(error_string.contains("permission denied"));
}

#[test]
fn test_lookup_error_names_district_and_location() {
    let error = ForecastError::lookup("bronx19", LookupSource::Dataset);
    assert_eq!(error.to_string(), "No such district 'bronx19' in tonnage dataset");
    assert!(error.is_lookup());
    assert!(!error.is_insufficient_data());

    let error = ForecastError::lookup(
        "bronx19",
        LookupSource::ForecasterTable("SARIMA".to_string()),
    );
    assert_eq!(
        error.to_string(),
        "No such district 'bronx19' in SARIMA forecaster table"
    );
}

#[test]
fn test_result_mapping() {
    let result: Result<(), &str> = Err("window is empty");
    let mapped = result.map_err(|e| ForecastError::ConfigError(e.to_string()));

    if let Err(ForecastError::ConfigError(msg)) = mapped {
        assert_eq!(msg, "window is empty");
    } else {
        panic!("Wrong error variant");
    }
}
