//! Rolling-origin evaluation for forecasting models.

use crate::core::TimeSeries;
use crate::error::{Result, SmoothingError};
use crate::models::Forecaster;
use crate::utils::metrics::{calculate_metrics, AccuracyMetrics};

/// Cross-validation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CVStrategy {
    /// Fixed-size training window that slides forward.
    Rolling,
    /// Training window grows from `initial_window`.
    #[default]
    Expanding,
}

/// Configuration for rolling-origin cross-validation.
#[derive(Debug, Clone)]
pub struct CVConfig {
    /// Forecast horizon for each fold.
    pub horizon: usize,
    /// Initial training window size.
    pub initial_window: usize,
    /// Step size between fold origins.
    pub step_size: usize,
    /// Window strategy.
    pub strategy: CVStrategy,
    /// Optional seasonal period for MASE.
    pub seasonal_period: Option<usize>,
}

impl Default for CVConfig {
    fn default() -> Self {
        Self {
            horizon: 1,
            initial_window: 10,
            step_size: 1,
            strategy: CVStrategy::Expanding,
            seasonal_period: None,
        }
    }
}

impl CVConfig {
    /// Expanding-window configuration.
    pub fn expanding(initial_window: usize, horizon: usize) -> Self {
        Self {
            initial_window,
            horizon,
            ..Self::default()
        }
    }

    /// Rolling-window configuration.
    pub fn rolling(window_size: usize, horizon: usize) -> Self {
        Self {
            initial_window: window_size,
            horizon,
            strategy: CVStrategy::Rolling,
            ..Self::default()
        }
    }

    /// Set the step size between fold origins.
    pub fn with_step_size(mut self, step_size: usize) -> Self {
        self.step_size = step_size;
        self
    }

    /// Set the seasonal period for MASE.
    pub fn with_seasonal_period(mut self, period: usize) -> Self {
        self.seasonal_period = Some(period);
        self
    }
}

/// Results from cross-validation.
#[derive(Debug, Clone)]
pub struct CVResults {
    /// Number of folds evaluated.
    pub n_folds: usize,
    /// Metrics aggregated across folds.
    pub aggregated: AggregatedMetrics,
    /// Per-fold metrics.
    pub fold_metrics: Vec<AccuracyMetrics>,
    /// Actual values across all folds (flattened).
    pub actual_values: Vec<f64>,
    /// Predicted values across all folds (flattened).
    pub predicted_values: Vec<f64>,
}

/// Fold-averaged metrics.
#[derive(Debug, Clone)]
pub struct AggregatedMetrics {
    /// Mean MAE across folds.
    pub mae: f64,
    /// Mean RMSE across folds.
    pub rmse: f64,
    /// Mean SMAPE across folds.
    pub smape: f64,
    /// Mean MAPE across folds (None if undefined in any fold).
    pub mape: Option<f64>,
    /// Standard deviation of fold MAEs.
    pub mae_std: f64,
    /// Standard deviation of fold RMSEs.
    pub rmse_std: f64,
}

/// Evaluate a model with rolling-origin cross-validation.
///
/// `model_factory` builds a fresh model for each fold; each fold trains on
/// the window ending at the fold origin and forecasts `config.horizon`
/// steps ahead.
///
/// # Example
/// ```
/// use expsmooth::core::TimeSeries;
/// use expsmooth::models::baseline::Naive;
/// use expsmooth::utils::cross_validation::{cross_validate, CVConfig};
/// use chrono::{Duration, TimeZone, Utc};
///
/// let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let timestamps: Vec<_> = (0..20).map(|i| base + Duration::hours(i)).collect();
/// let values: Vec<f64> = (0..20).map(|i| i as f64).collect();
/// let ts = TimeSeries::new(timestamps, values).unwrap();
///
/// let config = CVConfig::expanding(10, 1).with_step_size(2);
/// let results = cross_validate(&config, &ts, Naive::new).unwrap();
/// assert!(results.n_folds > 0);
/// ```
pub fn cross_validate<F, Factory>(
    config: &CVConfig,
    series: &TimeSeries,
    model_factory: Factory,
) -> Result<CVResults>
where
    F: Forecaster,
    Factory: Fn() -> F,
{
    let n = series.len();
    let mut fold_metrics = Vec::new();
    let mut all_actual = Vec::new();
    let mut all_predicted = Vec::new();

    let mut origin = config.initial_window;
    while origin + config.horizon <= n {
        let train_start = match config.strategy {
            CVStrategy::Rolling => origin.saturating_sub(config.initial_window),
            CVStrategy::Expanding => 0,
        };
        let train_series = series.slice(train_start, origin)?;

        let mut model = model_factory();
        model.fit(&train_series)?;

        let forecast = model.predict(config.horizon)?;
        let predictions = forecast.point();

        let actual = &series.values()[origin..origin + config.horizon];

        let metrics = calculate_metrics(actual, predictions, config.seasonal_period)?;
        fold_metrics.push(metrics);

        all_actual.extend_from_slice(actual);
        all_predicted.extend_from_slice(predictions);

        origin += config.step_size;
    }

    let n_folds = fold_metrics.len();
    if n_folds == 0 {
        return Ok(CVResults {
            n_folds: 0,
            aggregated: AggregatedMetrics {
                mae: f64::NAN,
                rmse: f64::NAN,
                smape: f64::NAN,
                mape: None,
                mae_std: f64::NAN,
                rmse_std: f64::NAN,
            },
            fold_metrics: vec![],
            actual_values: vec![],
            predicted_values: vec![],
        });
    }

    let mae_values: Vec<f64> = fold_metrics.iter().map(|m| m.mae).collect();
    let rmse_values: Vec<f64> = fold_metrics.iter().map(|m| m.rmse).collect();

    let mean = |xs: &[f64]| xs.iter().sum::<f64>() / xs.len() as f64;
    let smape_mean = mean(&fold_metrics.iter().map(|m| m.smape).collect::<Vec<_>>());

    // MAPE is only reported when every fold could compute it.
    let mape = if fold_metrics.iter().all(|m| m.mape.is_some()) {
        let mapes: Vec<f64> = fold_metrics.iter().filter_map(|m| m.mape).collect();
        Some(mean(&mapes))
    } else {
        None
    };

    Ok(CVResults {
        n_folds,
        aggregated: AggregatedMetrics {
            mae: mean(&mae_values),
            rmse: mean(&rmse_values),
            smape: smape_mean,
            mape,
            mae_std: fold_std_dev(&mae_values),
            rmse_std: fold_std_dev(&rmse_values),
        },
        fold_metrics,
        actual_values: all_actual,
        predicted_values: all_predicted,
    })
}

/// Split a series into a training head and a test tail of `test_len`
/// observations.
pub fn train_test_split(series: &TimeSeries, test_len: usize) -> Result<(TimeSeries, TimeSeries)> {
    let n = series.len();
    if test_len == 0 || test_len >= n {
        return Err(SmoothingError::InvalidParameter(format!(
            "test length must be in 1..{n}, got {test_len}"
        )));
    }
    let train = series.slice(0, n - test_len)?;
    let test = series.slice(n - test_len, n)?;
    Ok((train, test))
}

fn fold_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance =
        values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}
