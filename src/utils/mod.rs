//! Utility functions for forecasting models.

pub mod cross_validation;
pub mod metrics;
pub mod stats;

pub use cross_validation::{cross_validate, train_test_split, CVConfig, CVResults, CVStrategy};
pub use metrics::{calculate_metrics, relative_errors, AccuracyMetrics};
pub use stats::quantile_normal;
