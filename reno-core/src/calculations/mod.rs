//! Price calculations for the renovation estimator.
//!
//! `common` holds the rounding rules; `estimator` turns a completed
//! questionnaire into a price range.

pub mod common;
pub mod estimator;

pub use estimator::{CostEstimator, EstimateError, UPPER_RANGE_FACTOR, WHOLE_HOUSE_DISCOUNT};
