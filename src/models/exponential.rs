//! Adaptive simple exponential smoothing.
//!
//! The level recurrence is `level_t = α × y_t + (1-α) × level_{t-1}` with
//! `level_0 = y_0`. The forecast is the final level; no trend is extrapolated.
//! α is picked from the coefficient of variation so noisier KPIs react faster.

use crate::error::Result;
use crate::models::Forecaster;
use crate::utils::stats::coefficient_of_variation;

/// Configuration for [`ExponentialSmoothingForecaster`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExponentialSmoothingConfig {
    /// Eligibility floor; the default requires a single point.
    pub min_data_points: usize,
    /// Points needed before α adapts to the coefficient of variation.
    pub adaptive_min_points: usize,
    /// CV above which `high_alpha` is used.
    pub high_cv: f64,
    /// CV above which `moderate_alpha` is used.
    pub moderate_cv: f64,
    pub high_alpha: f64,
    pub moderate_alpha: f64,
    /// α for calm or short series.
    pub base_alpha: f64,
}

impl Default for ExponentialSmoothingConfig {
    fn default() -> Self {
        Self {
            min_data_points: 0,
            adaptive_min_points: 3,
            high_cv: 0.5,
            moderate_cv: 0.3,
            high_alpha: 0.5,
            moderate_alpha: 0.4,
            base_alpha: 0.3,
        }
    }
}

impl ExponentialSmoothingConfig {
    pub fn with_min_data_points(mut self, min: usize) -> Self {
        self.min_data_points = min;
        self
    }

    /// Pin α to a single value regardless of dispersion.
    pub fn with_fixed_alpha(mut self, alpha: f64) -> Self {
        let alpha = alpha.clamp(0.0001, 0.9999);
        self.high_alpha = alpha;
        self.moderate_alpha = alpha;
        self.base_alpha = alpha;
        self
    }
}

/// Smoothing factor for a series under the given configuration.
pub fn select_alpha(values: &[f64], config: &ExponentialSmoothingConfig) -> f64 {
    if values.len() < config.adaptive_min_points {
        return config.base_alpha;
    }
    match coefficient_of_variation(values) {
        Some(cv) if cv > config.high_cv => config.high_alpha,
        Some(cv) if cv > config.moderate_cv => config.moderate_alpha,
        _ => config.base_alpha,
    }
}

/// Final smoothed level of a non-empty series. `NaN` for an empty slice.
pub fn smoothed_level(values: &[f64], alpha: f64) -> f64 {
    let Some((&first, rest)) = values.split_first() else {
        return f64::NAN;
    };
    rest.iter()
        .fold(first, |level, &y| alpha * y + (1.0 - alpha) * level)
}

/// Simple exponential smoothing with a dispersion-driven α.
#[derive(Debug, Clone, Default)]
pub struct ExponentialSmoothingForecaster {
    config: ExponentialSmoothingConfig,
}

impl ExponentialSmoothingForecaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ExponentialSmoothingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExponentialSmoothingConfig {
        &self.config
    }
}

impl Forecaster for ExponentialSmoothingForecaster {
    fn name(&self) -> &str {
        "ExponentialSmoothing"
    }

    fn min_data_points(&self) -> usize {
        self.config.min_data_points
    }

    fn predict_next(&self, values: &[f64]) -> Result<f64> {
        let alpha = select_alpha(values, &self.config);
        Ok(smoothed_level(values, alpha).max(0.0))
    }
}
