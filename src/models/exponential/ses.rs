//! Simple Exponential Smoothing (SES) forecasting model.
//!
//! SES is suitable for data with no clear trend or seasonality. Forecasts
//! are flat at the final smoothed level for every horizon; this is a
//! documented limitation of the method, not a defect.

use crate::core::{Forecast, TimeSeries};
use crate::error::{Result, SmoothingError};
use crate::models::exponential::check_smoothing_param;
use crate::models::Forecaster;
use crate::utils::stats::quantile_normal;

/// Simple Exponential Smoothing forecaster.
///
/// State is a single level value, initialized to the first observation and
/// updated once per subsequent step:
///
/// `l_t = α·y_t + (1-α)·l_{t-1}`
///
/// The fitted value at step `t` is `l_{t-1}`, and the forecast for any
/// horizon `h ≥ 1` is the final level `l_T`.
///
/// # Example
/// ```
/// use expsmooth::models::exponential::SimpleExponentialSmoothing;
/// use expsmooth::models::Forecaster;
/// use expsmooth::core::TimeSeries;
/// use chrono::{Duration, TimeZone, Utc};
///
/// let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let timestamps: Vec<_> = (0..3).map(|i| base + Duration::days(i)).collect();
/// let ts = TimeSeries::new(timestamps, vec![10.0, 12.0, 14.0]).unwrap();
///
/// let mut model = SimpleExponentialSmoothing::new(0.5).unwrap();
/// model.fit(&ts).unwrap();
/// assert_eq!(model.level(), Some(12.5));
/// ```
#[derive(Debug, Clone)]
pub struct SimpleExponentialSmoothing {
    /// Smoothing parameter.
    alpha: f64,
    /// Final level state, fixed after fitting.
    level: Option<f64>,
    /// One-step-ahead in-sample predictions.
    fitted: Option<Vec<f64>>,
    /// Residuals (actual - fitted).
    residuals: Option<Vec<f64>>,
    /// Residual variance for prediction intervals.
    residual_variance: Option<f64>,
}

impl SimpleExponentialSmoothing {
    /// Create a new SES model.
    ///
    /// # Arguments
    /// * `alpha` - Smoothing parameter in `[0, 1]`
    pub fn new(alpha: f64) -> Result<Self> {
        Ok(Self {
            alpha: check_smoothing_param("alpha", alpha)?,
            level: None,
            fitted: None,
            residuals: None,
            residual_variance: None,
        })
    }

    /// Get the smoothing parameter.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Get the final level, if fitted.
    pub fn level(&self) -> Option<f64> {
        self.level
    }
}

impl Forecaster for SimpleExponentialSmoothing {
    fn fit(&mut self, series: &TimeSeries) -> Result<()> {
        let values = series.values();
        if values.is_empty() {
            return Err(SmoothingError::EmptyData);
        }

        let alpha = self.alpha;
        let mut level = values[0];

        let mut fitted = Vec::with_capacity(values.len());
        let mut residuals = Vec::with_capacity(values.len());

        // The first observation seeds the level and has no forecast error.
        fitted.push(level);
        residuals.push(0.0);

        for &y in &values[1..] {
            fitted.push(level);
            residuals.push(y - level);
            level = alpha * y + (1.0 - alpha) * level;
        }

        if !level.is_finite() {
            return Err(SmoothingError::NumericOverflow(
                "level state became non-finite during fitting".to_string(),
            ));
        }

        let tail = &residuals[1..];
        if !tail.is_empty() {
            let variance = tail.iter().map(|r| r * r).sum::<f64>() / tail.len() as f64;
            self.residual_variance = Some(variance);
        }

        self.level = Some(level);
        self.fitted = Some(fitted);
        self.residuals = Some(residuals);

        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let level = self.level.ok_or(SmoothingError::FitRequired)?;

        // Flat forecast at the final level, identical for every horizon.
        Ok(Forecast::from_values(vec![level; horizon]))
    }

    fn predict_with_intervals(&self, horizon: usize, level: f64) -> Result<Forecast> {
        let final_level = self.level.ok_or(SmoothingError::FitRequired)?;
        let variance = self.residual_variance.unwrap_or(0.0);
        let alpha = self.alpha;

        if horizon == 0 {
            return Ok(Forecast::new());
        }

        let z = quantile_normal((1.0 + level) / 2.0);
        let point = vec![final_level; horizon];
        let mut lower = Vec::with_capacity(horizon);
        let mut upper = Vec::with_capacity(horizon);

        // Var(e_{T+h}) = sigma^2 * (1 + (h-1) * alpha^2) for SES.
        for h in 1..=horizon {
            let factor = 1.0 + (h - 1) as f64 * alpha * alpha;
            let se = (variance * factor).sqrt();
            lower.push(final_level - z * se);
            upper.push(final_level + z * se);
        }

        Ok(Forecast::from_values_with_intervals(point, lower, upper))
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    fn residuals(&self) -> Option<&[f64]> {
        self.residuals.as_deref()
    }

    fn name(&self) -> &str {
        "SimpleExponentialSmoothing"
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
    fn ses_known_calculation() {
        // l_1 = 10, l_2 = 0.5*12 + 0.5*10 = 11, l_3 = 0.5*14 + 0.5*11 = 12.5
        let ts = make_ts(&[10.0, 12.0, 14.0]);
        let mut model = SimpleExponentialSmoothing::new(0.5).unwrap();
        model.fit(&ts).unwrap();

        assert_relative_eq!(model.level().unwrap(), 12.5, epsilon = 1e-12);

        let fitted = model.fitted_values().unwrap();
        assert_relative_eq!(fitted[0], 10.0, epsilon = 1e-12);
        assert_relative_eq!(fitted[1], 10.0, epsilon = 1e-12);
        assert_relative_eq!(fitted[2], 11.0, epsilon = 1e-12);

        let forecast = model.predict(1).unwrap();
        assert_relative_eq!(forecast.point()[0], 12.5, epsilon = 1e-12);
    }

    #[test]
    fn ses_constant_series_reproduces_constant() {
        let ts = make_ts(&[5.0; 10]);
        let mut model = SimpleExponentialSmoothing::new(0.3).unwrap();
        model.fit(&ts).unwrap();

        assert_relative_eq!(model.level().unwrap(), 5.0, epsilon = 1e-12);
        for &pred in model.predict(7).unwrap().point() {
            assert_relative_eq!(pred, 5.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn ses_forecast_is_horizon_invariant() {
        let ts = make_ts(&[10.0, 12.0, 11.0, 13.0, 12.0, 14.0]);
        let mut model = SimpleExponentialSmoothing::new(0.4).unwrap();
        model.fit(&ts).unwrap();

        let short = model.predict(1).unwrap();
        let long = model.predict(10).unwrap();

        for &pred in long.point() {
            assert_relative_eq!(pred, short.point()[0], epsilon = 1e-12);
        }
    }

    #[test]
    fn ses_residuals_match_errors() {
        let values = [10.0, 12.0, 11.0, 13.0, 14.0];
        let ts = make_ts(&values);
        let mut model = SimpleExponentialSmoothing::new(0.3).unwrap();
        model.fit(&ts).unwrap();

        let fitted = model.fitted_values().unwrap();
        let residuals = model.residuals().unwrap();
        assert_eq!(fitted.len(), 5);
        assert_eq!(residuals.len(), 5);
        assert_relative_eq!(residuals[0], 0.0, epsilon = 1e-12);
        for i in 1..5 {
            assert_relative_eq!(residuals[i], values[i] - fitted[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn ses_refitting_is_deterministic() {
        let values = [3.0, 7.0, 5.0, 9.0, 6.0, 8.0];
        let mut a = SimpleExponentialSmoothing::new(0.6).unwrap();
        let mut b = SimpleExponentialSmoothing::new(0.6).unwrap();
        a.fit(&make_ts(&values)).unwrap();
        b.fit(&make_ts(&values)).unwrap();

        assert_eq!(a.level(), b.level());
        assert_eq!(a.fitted_values(), b.fitted_values());
        assert_eq!(a.residuals(), b.residuals());
    }

    #[test]
    fn ses_invalid_alpha_rejected_at_construction() {
        assert!(matches!(
            SimpleExponentialSmoothing::new(-0.1),
            Err(SmoothingError::InvalidParameter(_))
        ));
        assert!(matches!(
            SimpleExponentialSmoothing::new(1.5),
            Err(SmoothingError::InvalidParameter(_))
        ));
        assert!(SimpleExponentialSmoothing::new(f64::NAN).is_err());
    }

    #[test]
    fn ses_empty_data_returns_error() {
        let ts = TimeSeries::new(vec![], vec![]).unwrap();
        let mut model = SimpleExponentialSmoothing::new(0.3).unwrap();
        assert!(matches!(model.fit(&ts), Err(SmoothingError::EmptyData)));
    }

    #[test]
    fn ses_requires_fit_before_predict() {
        let model = SimpleExponentialSmoothing::new(0.3).unwrap();
        assert!(matches!(model.predict(5), Err(SmoothingError::FitRequired)));
    }

    #[test]
    fn ses_zero_horizon_returns_empty() {
        let ts = make_ts(&[1.0, 2.0, 3.0]);
        let mut model = SimpleExponentialSmoothing::new(0.3).unwrap();
        model.fit(&ts).unwrap();
        assert_eq!(model.predict(0).unwrap().horizon(), 0);
    }

    #[test]
    fn ses_high_alpha_tracks_recent_data() {
        // Step change from 10 to 20: a fast level should sit near 20.
        let values = [10.0, 10.0, 10.0, 10.0, 10.0, 20.0, 20.0, 20.0, 20.0, 20.0];
        let ts = make_ts(&values);

        let mut slow = SimpleExponentialSmoothing::new(0.1).unwrap();
        let mut fast = SimpleExponentialSmoothing::new(0.9).unwrap();
        slow.fit(&ts).unwrap();
        fast.fit(&ts).unwrap();

        assert!(fast.level().unwrap() > slow.level().unwrap());
        assert!((fast.level().unwrap() - 20.0).abs() < 0.1);
    }

    #[test]
    fn ses_boundary_alpha_one_is_naive() {
        let values = [4.0, 9.0, 2.0, 7.0];
        let mut model = SimpleExponentialSmoothing::new(1.0).unwrap();
        model.fit(&make_ts(&values)).unwrap();
        assert_relative_eq!(model.level().unwrap(), 7.0, epsilon = 1e-12);
    }

    #[test]
    fn ses_boundary_alpha_zero_freezes_level() {
        let values = [4.0, 9.0, 2.0, 7.0];
        let mut model = SimpleExponentialSmoothing::new(0.0).unwrap();
        model.fit(&make_ts(&values)).unwrap();
        assert_relative_eq!(model.level().unwrap(), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn ses_interval_width_grows_with_horizon() {
        let values: Vec<f64> = (0..30).map(|i| 10.0 + ((i * 7) % 5) as f64).collect();
        let mut model = SimpleExponentialSmoothing::new(0.3).unwrap();
        model.fit(&make_ts(&values)).unwrap();

        let forecast = model.predict_with_intervals(5, 0.95).unwrap();
        let lower = forecast.lower().unwrap();
        let upper = forecast.upper().unwrap();
        let point = forecast.point();

        for i in 0..5 {
            assert!(lower[i] < point[i]);
            assert!(upper[i] > point[i]);
        }
        assert!(upper[4] - lower[4] > upper[0] - lower[0]);
    }
}
