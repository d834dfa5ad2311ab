//! # expsmooth
//!
//! Exponential smoothing forecasting for univariate time series.
//!
//! Provides the classical smoothing family — simple exponential smoothing,
//! Holt's linear trend with optional damping, and additive/multiplicative
//! Holt-Winters — together with naive benchmark models, accuracy metrics,
//! residual diagnostics, and rolling-origin evaluation utilities.
//!
//! Every model keeps explicit level/trend/season state updated in a single
//! forward pass over the observations. Once fitting completes the state is
//! frozen; forecasting reads it but never mutates it.

pub mod core;
pub mod error;
pub mod models;
pub mod utils;
pub mod validation;

pub use error::{Result, SmoothingError};

pub mod prelude {
    pub use crate::core::{Forecast, TimeSeries};
    pub use crate::error::{Result, SmoothingError};
    pub use crate::models::Forecaster;
    pub use crate::utils::{calculate_metrics, AccuracyMetrics};
}
