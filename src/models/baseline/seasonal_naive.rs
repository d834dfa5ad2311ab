//! Seasonal naive forecasting model.
//!
//! Forecasts by repeating the final observed seasonal cycle.

use crate::core::{Forecast, TimeSeries};
use crate::error::{Result, SmoothingError};
use crate::models::Forecaster;

/// Seasonal naive forecaster: `ŷ_{T+h} = y_{T+h-m}` (wrapping within the
/// last observed cycle).
#[derive(Debug, Clone)]
pub struct SeasonalNaive {
    period: usize,
    last_cycle: Option<Vec<f64>>,
    fitted: Option<Vec<f64>>,
    residuals: Option<Vec<f64>>,
}

impl SeasonalNaive {
    /// Create a seasonal naive model with period `m >= 1`.
    pub fn new(period: usize) -> Result<Self> {
        if period == 0 {
            return Err(SmoothingError::InvalidParameter(
                "seasonal period must be positive".to_string(),
            ));
        }
        Ok(Self {
            period,
            last_cycle: None,
            fitted: None,
            residuals: None,
        })
    }

    /// Get the seasonal period.
    pub fn period(&self) -> usize {
        self.period
    }
}

impl Forecaster for SeasonalNaive {
    fn fit(&mut self, series: &TimeSeries) -> Result<()> {
        let values = series.values();
        let m = self.period;
        if values.len() < m {
            return Err(SmoothingError::InsufficientData {
                needed: m,
                got: values.len(),
            });
        }

        // Fitted value at t is y_{t-m}; the first cycle has no predecessor.
        let fitted: Vec<f64> = (0..values.len())
            .map(|t| if t < m { f64::NAN } else { values[t - m] })
            .collect();
        let residuals: Vec<f64> = values
            .iter()
            .zip(fitted.iter())
            .map(|(y, f)| y - f)
            .collect();

        self.last_cycle = Some(values[values.len() - m..].to_vec());
        self.fitted = Some(fitted);
        self.residuals = Some(residuals);
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let cycle = self.last_cycle.as_ref().ok_or(SmoothingError::FitRequired)?;
        let m = self.period;

        let point: Vec<f64> = (1..=horizon).map(|h| cycle[(h - 1) % m]).collect();
        Ok(Forecast::from_values(point))
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    fn residuals(&self) -> Option<&[f64]> {
        self.residuals.as_deref()
    }

    fn name(&self) -> &str {
        "SeasonalNaive"
    }
}
