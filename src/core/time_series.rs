//! Univariate time series container.

use chrono::{DateTime, Utc};

use crate::error::{Result, SmoothingError};

/// An ordered sequence of real-valued observations with UTC timestamps.
///
/// Construction validates that timestamps and values have equal length and
/// that every value is finite; models can therefore assume a clean series.
///
/// # Example
/// ```
/// use expsmooth::core::TimeSeries;
/// use chrono::{Duration, TimeZone, Utc};
///
/// let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let timestamps: Vec<_> = (0..3).map(|i| base + Duration::days(i)).collect();
/// let ts = TimeSeries::new(timestamps, vec![10.0, 12.0, 14.0]).unwrap();
/// assert_eq!(ts.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    timestamps: Vec<DateTime<Utc>>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Create a series from timestamps and values.
    pub fn new(timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(SmoothingError::DimensionMismatch {
                expected: timestamps.len(),
                got: values.len(),
            });
        }
        if let Some(bad) = values.iter().position(|v| !v.is_finite()) {
            return Err(SmoothingError::NumericOverflow(format!(
                "non-finite observation at index {bad}"
            )));
        }
        Ok(Self { timestamps, values })
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether the series is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Observation values in time order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Observation timestamps in time order.
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// Extract the half-open range `[start, end)` as a new series.
    pub fn slice(&self, start: usize, end: usize) -> Result<TimeSeries> {
        if start > end || end > self.len() {
            return Err(SmoothingError::DimensionMismatch {
                expected: self.len(),
                got: end,
            });
        }
        Ok(TimeSeries {
            timestamps: self.timestamps[start..end].to_vec(),
            values: self.values[start..end].to_vec(),
        })
    }
}
