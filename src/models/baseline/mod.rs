//! Baseline benchmark models.
//!
//! Trivial forecasters against which the smoothing models are compared:
//! last-value naive, seasonal naive, and moving-average methods.

mod moving_average;
mod naive;
mod seasonal_naive;

pub use moving_average::MovingAverage;
pub use naive::Naive;
pub use seasonal_naive::SeasonalNaive;
