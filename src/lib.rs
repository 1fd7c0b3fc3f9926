//! # Recycle Estimator
//!
//! Workspace facade for the recycling proportion estimator. It re-exports
//! the pipeline crate and its numeric kernels under one name.
//!
//! ## Example
//!
//! ```
//! use recycle_estimator_workspace::forecast::DistrictId;
//!
//! let district = DistrictId::parse("Staten Island 3").unwrap();
//! assert_eq!(district.as_str(), "statenisland3");
//! ```

/// District queries, forecaster tables and model evaluation
pub use recycle_forecast as forecast;

/// Error metrics and lag polynomials
pub use recycle_math as math;
