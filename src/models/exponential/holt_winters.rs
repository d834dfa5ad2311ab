//! Holt-Winters forecasting model.
//!
//! Triple exponential smoothing for data with both trend and seasonality.
//! The seasonal component may enter additively (an offset) or
//! multiplicatively (a ratio).

use crate::core::{Forecast, TimeSeries};
use crate::error::{Result, SmoothingError};
use crate::models::exponential::check_smoothing_param;
use crate::models::Forecaster;
use crate::utils::stats::{mean, quantile_normal};

/// Type of seasonal component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeasonalType {
    /// Additive seasonality: `y_t ≈ l_t + b_t + s_t`
    #[default]
    Additive,
    /// Multiplicative seasonality: `y_t ≈ (l_t + b_t) · s_t`
    Multiplicative,
}

/// Holt-Winters forecaster.
///
/// State is a level/trend pair plus one seasonal index per phase of the
/// cycle, kept in a circular buffer of length `m`. Updating the index for
/// the current phase reads the value written exactly `m` steps earlier.
///
/// Additive form, for `t > m`:
/// - Level: `l_t = α(y_t - s_{t-m}) + (1-α)(l_{t-1} + b_{t-1})`
/// - Trend: `b_t = β(l_t - l_{t-1}) + (1-β)b_{t-1}`
/// - Seasonal: `s_t = γ(y_t - l_{t-1} - b_{t-1}) + (1-γ)s_{t-m}`
/// - Forecast: `ŷ_{T+h} = l_T + h·b_T + s_{T-m+h_m}`
///
/// Multiplicative form replaces the subtractions by divisions:
/// - Level: `l_t = α(y_t / s_{t-m}) + (1-α)(l_{t-1} + b_{t-1})`
/// - Seasonal: `s_t = γ(y_t / (l_{t-1} + b_{t-1})) + (1-γ)s_{t-m}`
/// - Forecast: `ŷ_{T+h} = (l_T + h·b_T) · s_{T-m+h_m}`
///
/// The state is initialized from the first two complete cycles, so fitting
/// requires at least `2m` observations. Multiplicative models are undefined
/// for series containing zero or negative values and reject such input.
#[derive(Debug, Clone)]
pub struct HoltWinters {
    /// Level smoothing parameter.
    alpha: f64,
    /// Trend smoothing parameter.
    beta: f64,
    /// Seasonal smoothing parameter.
    gamma: f64,
    /// Observations per full seasonal cycle.
    period: usize,
    /// Additive or multiplicative seasonality.
    seasonal_type: SeasonalType,
    /// Final level state, fixed after fitting.
    level: Option<f64>,
    /// Final trend state, fixed after fitting.
    trend: Option<f64>,
    /// Final seasonal indices, one per phase, fixed after fitting.
    seasonals: Option<Vec<f64>>,
    /// One-step-ahead in-sample predictions.
    fitted: Option<Vec<f64>>,
    /// Residuals (actual - fitted).
    residuals: Option<Vec<f64>>,
    /// Residual variance for prediction intervals.
    residual_variance: Option<f64>,
    /// Series length at fit time, used to phase-align forecasts.
    n: usize,
}

impl HoltWinters {
    /// Create a new Holt-Winters model.
    ///
    /// # Arguments
    /// * `alpha`, `beta`, `gamma` - Smoothing parameters in `[0, 1]`
    /// * `period` - Seasonal period `m >= 2`
    /// * `seasonal_type` - Additive or multiplicative seasonality
    pub fn new(
        alpha: f64,
        beta: f64,
        gamma: f64,
        period: usize,
        seasonal_type: SeasonalType,
    ) -> Result<Self> {
        if period < 2 {
            return Err(SmoothingError::InvalidParameter(format!(
                "seasonal period must be at least 2, got {period}"
            )));
        }
        Ok(Self {
            alpha: check_smoothing_param("alpha", alpha)?,
            beta: check_smoothing_param("beta", beta)?,
            gamma: check_smoothing_param("gamma", gamma)?,
            period,
            seasonal_type,
            level: None,
            trend: None,
            seasonals: None,
            fitted: None,
            residuals: None,
            residual_variance: None,
            n: 0,
        })
    }

    /// Create a Holt-Winters model with additive seasonality.
    pub fn additive(alpha: f64, beta: f64, gamma: f64, period: usize) -> Result<Self> {
        Self::new(alpha, beta, gamma, period, SeasonalType::Additive)
    }

    /// Create a Holt-Winters model with multiplicative seasonality.
    pub fn multiplicative(alpha: f64, beta: f64, gamma: f64, period: usize) -> Result<Self> {
        Self::new(alpha, beta, gamma, period, SeasonalType::Multiplicative)
    }

    /// Get the level smoothing parameter.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Get the trend smoothing parameter.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Get the seasonal smoothing parameter.
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Get the seasonal period.
    pub fn period(&self) -> usize {
        self.period
    }

    /// Get the seasonal type.
    pub fn seasonal_type(&self) -> SeasonalType {
        self.seasonal_type
    }

    /// Get the final level, if fitted.
    pub fn level(&self) -> Option<f64> {
        self.level
    }

    /// Get the final trend, if fitted.
    pub fn trend(&self) -> Option<f64> {
        self.trend
    }

    /// Get the final seasonal indices (one per phase), if fitted.
    pub fn seasonals(&self) -> Option<&[f64]> {
        self.seasonals.as_deref()
    }

    /// Initialize state from the first two complete cycles.
    ///
    /// - `l_m` is the mean of the first cycle.
    /// - `b_m` is the per-step difference between the second and first
    ///   cycle means.
    /// - `s_j` is the offset (or ratio) of each first-cycle observation
    ///   against `l_m`.
    fn initialize_state(
        values: &[f64],
        period: usize,
        seasonal_type: SeasonalType,
    ) -> Result<(f64, f64, Vec<f64>)> {
        let first_mean = mean(&values[..period]);
        let second_mean = mean(&values[period..2 * period]);

        let level = first_mean;
        let trend = (second_mean - first_mean) / period as f64;

        let seasonals: Vec<f64> = match seasonal_type {
            SeasonalType::Additive => values[..period].iter().map(|y| y - level).collect(),
            SeasonalType::Multiplicative => {
                if level == 0.0 {
                    return Err(SmoothingError::DegenerateDivision(
                        "first-cycle mean is zero".to_string(),
                    ));
                }
                values[..period].iter().map(|y| y / level).collect()
            }
        };

        Ok((level, trend, seasonals))
    }
}

impl Forecaster for HoltWinters {
    fn fit(&mut self, series: &TimeSeries) -> Result<()> {
        let values = series.values();
        let m = self.period;
        if values.len() < 2 * m {
            return Err(SmoothingError::InsufficientData {
                needed: 2 * m,
                got: values.len(),
            });
        }
        if self.seasonal_type == SeasonalType::Multiplicative && values.iter().any(|&y| y <= 0.0) {
            return Err(SmoothingError::DegenerateDivision(
                "multiplicative seasonality requires strictly positive observations".to_string(),
            ));
        }

        self.n = values.len();
        let alpha = self.alpha;
        let beta = self.beta;
        let gamma = self.gamma;

        let (mut l, mut b, mut seasonals) =
            Self::initialize_state(values, m, self.seasonal_type)?;

        let mut fitted = Vec::with_capacity(values.len());
        let mut residuals = Vec::with_capacity(values.len());

        // The first cycle only seeds the state; its fitted values are the
        // observations themselves.
        for &y in &values[..m] {
            fitted.push(y);
            residuals.push(0.0);
        }

        for (t, &y) in values.iter().enumerate().skip(m) {
            let phase = t % m;
            let s = seasonals[phase];

            let yhat = match self.seasonal_type {
                SeasonalType::Additive => l + b + s,
                SeasonalType::Multiplicative => (l + b) * s,
            };
            fitted.push(yhat);
            residuals.push(y - yhat);

            let l_prev = l;
            let b_prev = b;
            match self.seasonal_type {
                SeasonalType::Additive => {
                    l = alpha * (y - s) + (1.0 - alpha) * (l_prev + b_prev);
                    b = beta * (l - l_prev) + (1.0 - beta) * b_prev;
                    seasonals[phase] = gamma * (y - l_prev - b_prev) + (1.0 - gamma) * s;
                }
                SeasonalType::Multiplicative => {
                    if s == 0.0 {
                        return Err(SmoothingError::DegenerateDivision(format!(
                            "seasonal index for phase {phase} reached zero"
                        )));
                    }
                    let within_cycle = l_prev + b_prev;
                    if within_cycle == 0.0 {
                        return Err(SmoothingError::DegenerateDivision(format!(
                            "level plus trend reached zero at step {t}"
                        )));
                    }
                    l = alpha * (y / s) + (1.0 - alpha) * within_cycle;
                    b = beta * (l - l_prev) + (1.0 - beta) * b_prev;
                    seasonals[phase] = gamma * (y / within_cycle) + (1.0 - gamma) * s;
                }
            }
        }

        if !l.is_finite() || !b.is_finite() || seasonals.iter().any(|s| !s.is_finite()) {
            return Err(SmoothingError::NumericOverflow(
                "smoothing state became non-finite during fitting".to_string(),
            ));
        }

        let tail = &residuals[m..];
        let variance = tail.iter().map(|r| r * r).sum::<f64>() / tail.len() as f64;
        self.residual_variance = Some(variance);

        self.level = Some(l);
        self.trend = Some(b);
        self.seasonals = Some(seasonals);
        self.fitted = Some(fitted);
        self.residuals = Some(residuals);

        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let l = self.level.ok_or(SmoothingError::FitRequired)?;
        let b = self.trend.ok_or(SmoothingError::FitRequired)?;
        let seasonals = self.seasonals.as_ref().ok_or(SmoothingError::FitRequired)?;
        let m = self.period;

        let point: Vec<f64> = (1..=horizon)
            .map(|h| {
                // Phase of step T+h within the most recent estimated cycle.
                let s = seasonals[(self.n + h - 1) % m];
                match self.seasonal_type {
                    SeasonalType::Additive => l + h as f64 * b + s,
                    SeasonalType::Multiplicative => (l + h as f64 * b) * s,
                }
            })
            .collect();

        Ok(Forecast::from_values(point))
    }

    fn predict_with_intervals(&self, horizon: usize, level: f64) -> Result<Forecast> {
        let point_forecast = self.predict(horizon)?;
        let variance = self.residual_variance.unwrap_or(0.0);
        let m = self.period;

        if horizon == 0 {
            return Ok(Forecast::new());
        }

        let z = quantile_normal((1.0 + level) / 2.0);
        let point = point_forecast.point().to_vec();
        let mut lower = Vec::with_capacity(horizon);
        let mut upper = Vec::with_capacity(horizon);

        for (i, &pred) in point.iter().enumerate() {
            // Variance grows per completed forecast cycle.
            let cycles = i / m + 1;
            let se = (variance * cycles as f64).sqrt();
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
        match self.seasonal_type {
            SeasonalType::Additive => "HoltWinters(additive)",
            SeasonalType::Multiplicative => "HoltWinters(multiplicative)",
        }
    }
}
