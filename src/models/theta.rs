//! Theta method: average of a smoothed level and an extrapolated trend line.

use crate::error::Result;
use crate::models::exponential::smoothed_level;
use crate::models::Forecaster;

/// Configuration for [`ThetaForecaster`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ThetaConfig {
    /// Eligibility floor; the default requires at least three points.
    pub min_data_points: usize,
    /// Fixed SES smoothing parameter for the level line.
    pub alpha: f64,
}

impl Default for ThetaConfig {
    fn default() -> Self {
        Self {
            min_data_points: 2,
            alpha: 0.2,
        }
    }
}

impl ThetaConfig {
    pub fn with_min_data_points(mut self, min: usize) -> Self {
        // The trend line divides by n - 1
        self.min_data_points = min.max(1);
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha.clamp(0.0001, 0.9999);
        self
    }
}

/// Theta forecaster.
///
/// Two lines are computed over the full series: a simple exponential
/// smoothing level with fixed α, and the straight line through the first and
/// last observations projected one step past the end. The forecast is their
/// mean.
#[derive(Debug, Clone, Default)]
pub struct ThetaForecaster {
    config: ThetaConfig,
}

impl ThetaForecaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ThetaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ThetaConfig {
        &self.config
    }
}

/// One-step trend projection `last + (last - first) / (n - 1)`.
pub fn endpoint_trend(values: &[f64]) -> Option<f64> {
    let (first, last) = (values.first()?, values.last()?);
    if values.len() < 2 {
        return None;
    }
    let slope = (last - first) / (values.len() - 1) as f64;
    Some(last + slope)
}

impl Forecaster for ThetaForecaster {
    fn name(&self) -> &str {
        "Theta"
    }

    fn min_data_points(&self) -> usize {
        self.config.min_data_points
    }

    fn predict_next(&self, values: &[f64]) -> Result<f64> {
        let level = smoothed_level(values, self.config.alpha);
        let trend = endpoint_trend(values).unwrap_or(level);
        Ok(((level + trend) / 2.0).max(0.0))
    }
}
