//! Linear trend extrapolation by ordinary least squares.

use crate::error::Result;
use crate::models::Forecaster;
use crate::utils::ols::ols_trend;

/// Configuration for [`LinearTrendForecaster`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LinearTrendConfig {
    /// Eligibility floor; the default requires at least two points.
    pub min_data_points: usize,
}

impl Default for LinearTrendConfig {
    fn default() -> Self {
        Self { min_data_points: 1 }
    }
}

impl LinearTrendConfig {
    pub fn with_min_data_points(mut self, min: usize) -> Self {
        self.min_data_points = min;
        self
    }
}

/// Fits `value = a*t + b` over `t = 0..n-1` and evaluates it at `t = n`.
///
/// # Example
/// ```
/// use kpi_forecast::core::HistoricalSeries;
/// use kpi_forecast::models::{Forecaster, LinearTrendForecaster};
///
/// let series = HistoricalSeries::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0], "atlas", "commits");
/// let result = LinearTrendForecaster::new().generate_forecast(&series);
/// assert!((result[0].predicted_value() - 6.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LinearTrendForecaster {
    config: LinearTrendConfig,
}

impl LinearTrendForecaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LinearTrendConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LinearTrendConfig {
        &self.config
    }
}

impl Forecaster for LinearTrendForecaster {
    fn name(&self) -> &str {
        "LinearTrend"
    }

    fn min_data_points(&self) -> usize {
        self.config.min_data_points
    }

    fn predict_next(&self, values: &[f64]) -> Result<f64> {
        let fit = ols_trend(values)?;
        Ok(fit.at(values.len() as f64).max(0.0))
    }
}
