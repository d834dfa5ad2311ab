//! Exponential smoothing models.
//!
//! This module provides the classical smoothing family:
//! - Simple Exponential Smoothing (SES)
//! - Holt's Linear Trend (undamped and damped)
//! - Holt-Winters (additive and multiplicative seasonality)
//!
//! Smoothing parameters are fixed at construction and validated up front;
//! automatic parameter selection is deliberately out of scope.

mod holt;
mod holt_winters;
mod ses;

pub use holt::HoltLinearTrend;
pub use holt_winters::{HoltWinters, SeasonalType};
pub use ses::SimpleExponentialSmoothing;

use crate::error::{Result, SmoothingError};

/// Validate a smoothing parameter on the closed interval `[0, 1]`.
///
/// The boundary values are admitted because they correspond to well-defined
/// degenerate models (a parameter of zero freezes the corresponding state
/// component; one makes it track the data exactly).
pub(crate) fn check_smoothing_param(name: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(SmoothingError::InvalidParameter(format!(
            "{name} must lie in [0, 1], got {value}"
        )));
    }
    Ok(value)
}

/// Validate a damping parameter on the half-open interval `(0, 1]`.
pub(crate) fn check_damping_param(value: f64) -> Result<f64> {
    if !value.is_finite() || value <= 0.0 || value > 1.0 {
        return Err(SmoothingError::InvalidParameter(format!(
            "phi must lie in (0, 1], got {value}"
        )));
    }
    Ok(value)
}
