//! Accuracy metrics for forecast evaluation.

use crate::error::{Result, SmoothingError};

/// Accuracy metrics for evaluating forecast performance.
#[derive(Debug, Clone)]
pub struct AccuracyMetrics {
    /// Mean Absolute Error
    pub mae: f64,
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Percentage Error (None if zeros in actual)
    pub mape: Option<f64>,
    /// Symmetric Mean Absolute Percentage Error
    pub smape: f64,
    /// Mean Absolute Scaled Error (None if insufficient data)
    pub mase: Option<f64>,
    /// R-squared (coefficient of determination)
    pub r_squared: f64,
}

/// Calculate accuracy metrics between actual and predicted values.
///
/// `seasonal_period` controls the naive benchmark used by MASE; `None`
/// scales against the one-step naive forecast.
pub fn calculate_metrics(
    actual: &[f64],
    predicted: &[f64],
    seasonal_period: Option<usize>,
) -> Result<AccuracyMetrics> {
    if actual.is_empty() || predicted.is_empty() {
        return Err(SmoothingError::EmptyData);
    }
    if actual.len() != predicted.len() {
        return Err(SmoothingError::DimensionMismatch {
            expected: actual.len(),
            got: predicted.len(),
        });
    }

    let n = actual.len() as f64;

    let mae: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).abs())
        .sum::<f64>()
        / n;
    let mse: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum::<f64>()
        / n;
    let rmse = mse.sqrt();

    let mape = if actual.contains(&0.0) {
        None
    } else {
        let sum: f64 = actual
            .iter()
            .zip(predicted)
            .map(|(a, p)| ((a - p) / a).abs())
            .sum();
        Some(100.0 * sum / n)
    };

    let smape: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| {
            let denom = a.abs() + p.abs();
            if denom == 0.0 {
                0.0
            } else {
                2.0 * (a - p).abs() / denom
            }
        })
        .sum::<f64>()
        * 100.0
        / n;

    let mase = calculate_mase(actual, mae, seasonal_period);

    let mean_actual = actual.iter().sum::<f64>() / n;
    let ss_tot: f64 = actual.iter().map(|a| (a - mean_actual).powi(2)).sum();
    let ss_res: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    let r_squared = if ss_tot == 0.0 {
        1.0
    } else {
        1.0 - ss_res / ss_tot
    };

    Ok(AccuracyMetrics {
        mae,
        mse,
        rmse,
        mape,
        smape,
        mase,
        r_squared,
    })
}

/// MASE = forecast MAE / MAE of the (seasonal) naive forecast on `actual`.
fn calculate_mase(actual: &[f64], forecast_mae: f64, seasonal_period: Option<usize>) -> Option<f64> {
    let n = actual.len();
    let period = seasonal_period.unwrap_or(1);
    if n <= period {
        return None;
    }

    let naive_mae: f64 = actual
        .iter()
        .skip(period)
        .zip(actual.iter())
        .map(|(curr, prev)| (curr - prev).abs())
        .sum::<f64>()
        / (n - period) as f64;

    if naive_mae == 0.0 {
        return None;
    }
    Some(forecast_mae / naive_mae)
}

/// Relative (multiplicative-form) forecast errors `(y_t - ŷ_t) / ŷ_t`.
///
/// The denominator is the fitted one-step prediction, so a zero fitted
/// value makes the relative error undefined and yields
/// [`SmoothingError::DegenerateDivision`]. Non-finite fitted values from a
/// model's warmup steps are skipped and reported as `NaN`.
pub fn relative_errors(actual: &[f64], fitted: &[f64]) -> Result<Vec<f64>> {
    if actual.len() != fitted.len() {
        return Err(SmoothingError::DimensionMismatch {
            expected: actual.len(),
            got: fitted.len(),
        });
    }

    actual
        .iter()
        .zip(fitted)
        .enumerate()
        .map(|(t, (y, f))| {
            if !f.is_finite() {
                Ok(f64::NAN)
            } else if *f == 0.0 {
                Err(SmoothingError::DegenerateDivision(format!(
                    "fitted value at step {t} is zero"
                )))
            } else {
                Ok((y - f) / f)
            }
        })
        .collect()
}

/// Mean absolute error between two equal-length slices.
pub fn mae(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }
    actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).abs())
        .sum::<f64>()
        / actual.len() as f64
}

/// Mean squared error between two equal-length slices.
pub fn mse(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }
    actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum::<f64>()
        / actual.len() as f64
}

/// Root mean squared error between two equal-length slices.
pub fn rmse(actual: &[f64], predicted: &[f64]) -> f64 {
    mse(actual, predicted).sqrt()
}

/// Symmetric MAPE (in percent) between two equal-length slices.
pub fn smape(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }
    actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| {
            let denom = a.abs() + p.abs();
            if denom == 0.0 {
                0.0
            } else {
                2.0 * (a - p).abs() / denom
            }
        })
        .sum::<f64>()
        * 100.0
        / actual.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn perfect_prediction_has_zero_errors() {
        let actual = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let metrics = calculate_metrics(&actual, &actual, None).unwrap();

        assert_relative_eq!(metrics.mae, 0.0, epsilon = 1e-12);
        assert_relative_eq!(metrics.rmse, 0.0, epsilon = 1e-12);
        assert_relative_eq!(metrics.smape, 0.0, epsilon = 1e-12);
        assert_relative_eq!(metrics.r_squared, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn known_error_values() {
        let actual = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let predicted = vec![1.5, 2.5, 2.5, 4.5, 4.5];
        let metrics = calculate_metrics(&actual, &predicted, None).unwrap();

        assert_relative_eq!(metrics.mae, 0.5, epsilon = 1e-12);
        assert_relative_eq!(metrics.mse, 0.25, epsilon = 1e-12);
        assert_relative_eq!(metrics.rmse, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn mape_undefined_with_zero_actuals() {
        let metrics = calculate_metrics(&[0.0, 1.0, 2.0], &[0.1, 1.1, 2.1], None).unwrap();
        assert!(metrics.mape.is_none());
        assert!(metrics.smape.is_finite());
    }

    #[test]
    fn dimension_mismatch_rejected() {
        let result = calculate_metrics(&[1.0, 2.0, 3.0], &[1.0, 2.0], None);
        assert!(matches!(
            result,
            Err(SmoothingError::DimensionMismatch { expected: 3, got: 2 })
        ));
    }

    #[test]
    fn empty_data_rejected() {
        assert!(matches!(
            calculate_metrics(&[], &[], None),
            Err(SmoothingError::EmptyData)
        ));
    }

    #[test]
    fn mase_with_seasonal_period() {
        let actual = vec![1.0, 2.0, 3.0, 4.0, 1.5, 2.5, 3.5, 4.5];
        let predicted = vec![1.1, 2.1, 3.1, 4.1, 1.6, 2.6, 3.6, 4.6];
        let metrics = calculate_metrics(&actual, &predicted, Some(4)).unwrap();

        let mase = metrics.mase.unwrap();
        assert!(mase.is_finite() && mase > 0.0);
    }

    #[test]
    fn relative_errors_match_definition() {
        let errors = relative_errors(&[11.0, 9.0], &[10.0, 10.0]).unwrap();
        assert_relative_eq!(errors[0], 0.1, epsilon = 1e-12);
        assert_relative_eq!(errors[1], -0.1, epsilon = 1e-12);
    }

    #[test]
    fn relative_errors_fail_on_zero_fitted() {
        let result = relative_errors(&[1.0, 2.0], &[1.0, 0.0]);
        assert!(matches!(result, Err(SmoothingError::DegenerateDivision(_))));
    }

    #[test]
    fn relative_errors_skip_warmup_nan() {
        let errors = relative_errors(&[1.0, 2.0], &[f64::NAN, 4.0]).unwrap();
        assert!(errors[0].is_nan());
        assert_relative_eq!(errors[1], -0.5, epsilon = 1e-12);
    }

    #[test]
    fn standalone_helpers() {
        assert_relative_eq!(mae(&[1.0, 2.0], &[1.5, 2.5]), 0.5, epsilon = 1e-12);
        assert_relative_eq!(rmse(&[1.0, 2.0], &[2.0, 3.0]), 1.0, epsilon = 1e-12);
        assert_relative_eq!(smape(&[1.0, 2.0], &[1.0, 2.0]), 0.0, epsilon = 1e-12);
        assert!(mae(&[1.0], &[1.0, 2.0]).is_nan());
    }

    #[test]
    fn r_squared_negative_for_poor_model() {
        let metrics = calculate_metrics(
            &[1.0, 2.0, 3.0, 4.0, 5.0],
            &[5.0, 4.0, 3.0, 2.0, 1.0],
            None,
        )
        .unwrap();
        assert!(metrics.r_squared < 0.0);
    }
}
