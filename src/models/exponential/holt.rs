//! Holt's Linear Trend forecasting model.
//!
//! Double exponential smoothing for data with a linear trend but no
//! seasonality, with optional geometric damping of the trend.

use crate::core::{Forecast, TimeSeries};
use crate::error::{Result, SmoothingError};
use crate::models::exponential::{check_damping_param, check_smoothing_param};
use crate::models::Forecaster;
use crate::utils::stats::quantile_normal;

/// Holt's Linear Trend forecaster.
///
/// State is a level/trend pair updated once per observed step:
/// - Level: `l_t = α·y_t + (1-α)·(l_{t-1} + φ·b_{t-1})`
/// - Trend: `b_t = β·(l_t - l_{t-1}) + (1-β)·φ·b_{t-1}`
/// - Forecast: `ŷ_{T+h} = l_T + (φ + φ² + ... + φ^h)·b_T`
///
/// The undamped model is the `φ = 1` case, where the damping sum reduces to
/// `h`. Initialization sets `l_1 = y_1` and `b_1 = 0`; the flat initial
/// trend biases the first few fitted values but washes out of the long-run
/// state.
#[derive(Debug, Clone)]
pub struct HoltLinearTrend {
    /// Level smoothing parameter.
    alpha: f64,
    /// Trend smoothing parameter.
    beta: f64,
    /// Damping parameter; `None` means undamped.
    phi: Option<f64>,
    /// Final level state, fixed after fitting.
    level: Option<f64>,
    /// Final trend state, fixed after fitting.
    trend: Option<f64>,
    /// One-step-ahead in-sample predictions.
    fitted: Option<Vec<f64>>,
    /// Residuals (actual - fitted).
    residuals: Option<Vec<f64>>,
    /// Residual variance for prediction intervals.
    residual_variance: Option<f64>,
}

impl HoltLinearTrend {
    /// Create a new undamped Holt model.
    ///
    /// # Arguments
    /// * `alpha` - Level smoothing parameter in `[0, 1]`
    /// * `beta` - Trend smoothing parameter in `[0, 1]`
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        Ok(Self {
            alpha: check_smoothing_param("alpha", alpha)?,
            beta: check_smoothing_param("beta", beta)?,
            phi: None,
            level: None,
            trend: None,
            fitted: None,
            residuals: None,
            residual_variance: None,
        })
    }

    /// Create a new damped-trend Holt model.
    ///
    /// `phi` must lie in `(0, 1]`. Values below roughly `0.8` are rarely
    /// useful in practice — the trend contribution decays so fast that the
    /// forecast is effectively flat — but they are accepted.
    ///
    /// # Arguments
    /// * `alpha` - Level smoothing parameter in `[0, 1]`
    /// * `beta` - Trend smoothing parameter in `[0, 1]`
    /// * `phi` - Damping parameter in `(0, 1]`
    pub fn damped(alpha: f64, beta: f64, phi: f64) -> Result<Self> {
        Ok(Self {
            phi: Some(check_damping_param(phi)?),
            ..Self::new(alpha, beta)?
        })
    }

    /// Get the level smoothing parameter.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Get the trend smoothing parameter.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Get the damping parameter, if the model is damped.
    pub fn phi(&self) -> Option<f64> {
        self.phi
    }

    /// Get the final level, if fitted.
    pub fn level(&self) -> Option<f64> {
        self.level
    }

    /// Get the final trend, if fitted.
    pub fn trend(&self) -> Option<f64> {
        self.trend
    }

    /// Damping sum `φ + φ² + ... + φ^h`, closed form for `φ != 1`.
    fn damping_sum(phi: f64, h: usize) -> f64 {
        if (phi - 1.0).abs() < 1e-12 {
            h as f64
        } else {
            phi * (1.0 - phi.powi(h as i32)) / (1.0 - phi)
        }
    }
}

impl Forecaster for HoltLinearTrend {
    fn fit(&mut self, series: &TimeSeries) -> Result<()> {
        let values = series.values();
        if values.len() < 2 {
            return Err(SmoothingError::InsufficientData {
                needed: 2,
                got: values.len(),
            });
        }

        let alpha = self.alpha;
        let beta = self.beta;
        let phi = self.phi.unwrap_or(1.0);

        // Flat initial trend; see the type-level docs.
        let mut l = values[0];
        let mut b = 0.0;

        let mut fitted = Vec::with_capacity(values.len());
        let mut residuals = Vec::with_capacity(values.len());
        fitted.push(l);
        residuals.push(0.0);

        for &y in &values[1..] {
            let yhat = l + phi * b;
            fitted.push(yhat);
            residuals.push(y - yhat);

            let l_prev = l;
            l = alpha * y + (1.0 - alpha) * (l_prev + phi * b);
            b = beta * (l - l_prev) + (1.0 - beta) * phi * b;
        }

        if !l.is_finite() || !b.is_finite() {
            return Err(SmoothingError::NumericOverflow(
                "level/trend state became non-finite during fitting".to_string(),
            ));
        }

        let tail = &residuals[1..];
        let variance = tail.iter().map(|r| r * r).sum::<f64>() / tail.len() as f64;
        self.residual_variance = Some(variance);

        self.level = Some(l);
        self.trend = Some(b);
        self.fitted = Some(fitted);
        self.residuals = Some(residuals);

        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let l = self.level.ok_or(SmoothingError::FitRequired)?;
        let b = self.trend.ok_or(SmoothingError::FitRequired)?;
        let phi = self.phi.unwrap_or(1.0);

        let point: Vec<f64> = (1..=horizon)
            .map(|h| l + Self::damping_sum(phi, h) * b)
            .collect();

        Ok(Forecast::from_values(point))
    }

    fn predict_with_intervals(&self, horizon: usize, level: f64) -> Result<Forecast> {
        let l = self.level.ok_or(SmoothingError::FitRequired)?;
        let b = self.trend.ok_or(SmoothingError::FitRequired)?;
        let phi = self.phi.unwrap_or(1.0);
        let variance = self.residual_variance.unwrap_or(0.0);

        if horizon == 0 {
            return Ok(Forecast::new());
        }

        let z = quantile_normal((1.0 + level) / 2.0);
        let mut point = Vec::with_capacity(horizon);
        let mut lower = Vec::with_capacity(horizon);
        let mut upper = Vec::with_capacity(horizon);

        for h in 1..=horizon {
            let pred = l + Self::damping_sum(phi, h) * b;
            point.push(pred);

            // Approximate h-step error variance, accumulating the level and
            // trend smoothing gains over intermediate steps.
            let mut factor = 1.0;
            for j in 1..h {
                let gain = self.alpha + self.alpha * self.beta * Self::damping_sum(phi, j);
                factor += gain * gain;
            }
            let se = (variance * factor).sqrt();
            lower.push(pred - z * se);
            upper.push(pred + z * se);
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
        if self.phi.is_some() {
            "HoltLinearTrend(damped)"
        } else {
            "HoltLinearTrend"
        }
    }
}
