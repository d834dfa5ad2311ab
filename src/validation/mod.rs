//! Diagnostic tests for model residuals.
//!
//! # Example
//!
//! ```
//! use expsmooth::validation::{durbin_watson, ljung_box};
//!
//! let residuals = vec![0.1, -0.2, 0.15, -0.1, 0.05, -0.08, 0.12, -0.15, 0.1, -0.05];
//! let lb = ljung_box(&residuals, Some(5), 0);
//! if lb.is_white_noise(0.05) {
//!     println!("residuals look like white noise");
//! }
//!
//! let dw = durbin_watson(&residuals);
//! println!("Durbin-Watson statistic: {}", dw.statistic);
//! ```


pub use residual_tests::{
    box_pierce, durbin_watson, ljung_box, AutocorrelationType, DurbinWatsonResult, LjungBoxResult,
};
