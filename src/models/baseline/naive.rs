//! Naive forecasting model.
//!
//! Forecasts the last observed value for all future steps. The simplest
//! possible benchmark, and the one every smoothing model has to beat.

use crate::core::{Forecast, TimeSeries};
use crate::error::{Result, SmoothingError};
use crate::models::Forecaster;

/// Naive forecaster that repeats the last observation.
#[derive(Debug, Clone, Default)]
pub struct Naive {
    last_value: Option<f64>,
    fitted: Option<Vec<f64>>,
    residuals: Option<Vec<f64>>,
}

impl Naive {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Forecaster for Naive {
    fn fit(&mut self, series: &TimeSeries) -> Result<()> {
        let values = series.values();
        let last = *values.last().ok_or(SmoothingError::EmptyData)?;

        // Fitted value at t is y_{t-1}; the first step has no predecessor.
        let mut fitted = Vec::with_capacity(values.len());
        fitted.push(f64::NAN);
        fitted.extend_from_slice(&values[..values.len() - 1]);

        let residuals: Vec<f64> = values
            .iter()
            .zip(fitted.iter())
            .map(|(y, f)| y - f)
            .collect();

        self.last_value = Some(last);
        self.fitted = Some(fitted);
        self.residuals = Some(residuals);
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let last = self.last_value.ok_or(SmoothingError::FitRequired)?;
        Ok(Forecast::from_values(vec![last; horizon]))
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    fn residuals(&self) -> Option<&[f64]> {
        self.residuals.as_deref()
    }

    fn name(&self) -> &str {
        "Naive"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Duration, TimeZone, Utc};

    fn make_ts(values: &[f64]) -> TimeSeries {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let timestamps: Vec<_> = (0..values.len())
            .map(|i| base + Duration::days(i as i64))
            .collect();
        TimeSeries::new(timestamps, values.to_vec()).unwrap()
    }

    #[test]
    fn naive_repeats_last_value() {
        let mut model = Naive::new();
        model.fit(&make_ts(&[3.0, 5.0, 7.0])).unwrap();

        let forecast = model.predict(4).unwrap();
        assert_eq!(forecast.point(), &[7.0, 7.0, 7.0, 7.0]);
    }

    #[test]
    fn naive_fitted_is_lagged_series() {
        let mut model = Naive::new();
        model.fit(&make_ts(&[3.0, 5.0, 7.0])).unwrap();

        let fitted = model.fitted_values().unwrap();
        assert!(fitted[0].is_nan());
        assert_relative_eq!(fitted[1], 3.0);
        assert_relative_eq!(fitted[2], 5.0);

        let residuals = model.residuals().unwrap();
        assert!(residuals[0].is_nan());
        assert_relative_eq!(residuals[1], 2.0);
        assert_relative_eq!(residuals[2], 2.0);
    }

    #[test]
    fn naive_empty_data() {
        let mut model = Naive::new();
        let ts = TimeSeries::new(vec![], vec![]).unwrap();
        assert!(matches!(model.fit(&ts), Err(SmoothingError::EmptyData)));
    }

    #[test]
    fn naive_requires_fit() {
        let model = Naive::new();
        assert!(matches!(model.predict(1), Err(SmoothingError::FitRequired)));
    }
}
