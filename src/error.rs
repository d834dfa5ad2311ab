//! Error types for the expsmooth library.

use thiserror::Error;

/// Result type alias for smoothing operations.
pub type Result<T> = std::result::Result<T, SmoothingError>;

/// Errors that can occur while fitting or forecasting.
///
/// All errors are local to a single fit/forecast call; computation is
/// deterministic and side-effect-free, so there is no partial-failure or
/// retry semantic.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SmoothingError {
    /// Input series contains no observations.
    #[error("empty input data")]
    EmptyData,

    /// Series is shorter than the initialization window of the model.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// A smoothing or damping parameter is outside its valid range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A multiplicative-form computation hit a zero denominator, or the
    /// input contains non-positive values a multiplicative model cannot fit.
    #[error("degenerate division: {0}")]
    DegenerateDivision(String),

    /// A state update or forecast produced a non-finite value.
    #[error("numeric overflow: {0}")]
    NumericOverflow(String),

    /// Model has not been fitted yet.
    #[error("model must be fitted before prediction")]
    FitRequired,

    /// Two sequences that must be aligned have different lengths.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}
