//! Moving average forecasting model.
//!
//! Forecasts the mean of the last `window` observations for all future
//! steps; a window of zero means the full-history mean.

use crate::core::{Forecast, TimeSeries};
use crate::error::{Result, SmoothingError};
use crate::models::Forecaster;

/// Moving average forecaster.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    /// Averaging window; 0 means the entire history.
    window: usize,
    last_mean: Option<f64>,
    fitted: Option<Vec<f64>>,
    residuals: Option<Vec<f64>>,
}

impl MovingAverage {
    /// Create a moving-average model. A window of 0 averages the whole
    /// series.
    pub fn new(window: usize) -> Self {
        Self {
            window,
            last_mean: None,
            fitted: None,
            residuals: None,
        }
    }

    /// Get the window size.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Mean of the observations in the window ending just before `end`.
    fn window_mean(&self, values: &[f64], end: usize) -> f64 {
        let width = if self.window == 0 || self.window > end {
            end
        } else {
            self.window
        };
        if width == 0 {
            return f64::NAN;
        }
        values[end - width..end].iter().sum::<f64>() / width as f64
    }
}

impl Default for MovingAverage {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Forecaster for MovingAverage {
    fn fit(&mut self, series: &TimeSeries) -> Result<()> {
        let values = series.values();
        if values.is_empty() {
            return Err(SmoothingError::EmptyData);
        }
        if self.window > 0 && values.len() < self.window {
            return Err(SmoothingError::InsufficientData {
                needed: self.window,
                got: values.len(),
            });
        }

        let fitted: Vec<f64> = (0..values.len())
            .map(|t| self.window_mean(values, t))
            .collect();
        let residuals: Vec<f64> = values
            .iter()
            .zip(fitted.iter())
            .map(|(y, f)| y - f)
            .collect();

        self.last_mean = Some(self.window_mean(values, values.len()));
        self.fitted = Some(fitted);
        self.residuals = Some(residuals);
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let mean = self.last_mean.ok_or(SmoothingError::FitRequired)?;
        Ok(Forecast::from_values(vec![mean; horizon]))
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    fn residuals(&self) -> Option<&[f64]> {
        self.residuals.as_deref()
    }

    fn name(&self) -> &str {
        "MovingAverage"
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
    fn forecasts_window_mean() {
        let mut model = MovingAverage::new(3);
        model.fit(&make_ts(&[1.0, 2.0, 3.0, 4.0, 5.0])).unwrap();

        // Mean of the last 3 observations is 4.
        let forecast = model.predict(2).unwrap();
        assert_relative_eq!(forecast.point()[0], 4.0, epsilon = 1e-12);
        assert_relative_eq!(forecast.point()[1], 4.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_window_uses_full_history() {
        let mut model = MovingAverage::new(0);
        model.fit(&make_ts(&[2.0, 4.0, 6.0])).unwrap();

        let forecast = model.predict(1).unwrap();
        assert_relative_eq!(forecast.point()[0], 4.0, epsilon = 1e-12);
    }

    #[test]
    fn fitted_uses_shrinking_warmup_window() {
        let mut model = MovingAverage::new(2);
        model.fit(&make_ts(&[2.0, 4.0, 6.0, 8.0])).unwrap();

        let fitted = model.fitted_values().unwrap();
        assert!(fitted[0].is_nan());
        assert_relative_eq!(fitted[1], 2.0, epsilon = 1e-12);
        assert_relative_eq!(fitted[2], 3.0, epsilon = 1e-12);
        assert_relative_eq!(fitted[3], 5.0, epsilon = 1e-12);
    }

    #[test]
    fn window_larger_than_series_is_insufficient() {
        let mut model = MovingAverage::new(5);
        assert!(matches!(
            model.fit(&make_ts(&[1.0, 2.0])),
            Err(SmoothingError::InsufficientData { needed: 5, got: 2 })
        ));
    }

    #[test]
    fn empty_data() {
        let mut model = MovingAverage::new(0);
        let ts = TimeSeries::new(vec![], vec![]).unwrap();
        assert!(matches!(model.fit(&ts), Err(SmoothingError::EmptyData)));
    }
}
