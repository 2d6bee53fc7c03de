//! Seasonal index forecaster (SARIMA-lite).
//!
//! Detects a period, derives multiplicative seasonal indices, and scales the
//! recent level by the index of the next phase.

use crate::detection::{detect_period, SeasonalityConfig};
use crate::error::{ForecastError, Result};
use crate::models::Forecaster;
use crate::utils::stats::{mean, NEAR_ZERO};

/// Configuration for [`SeasonalForecaster`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SeasonalConfig {
    /// Eligibility floor; the default requires at least eight points.
    pub min_data_points: usize,
    /// Period detection settings.
    pub seasonality: SeasonalityConfig,
}

impl Default for SeasonalConfig {
    fn default() -> Self {
        Self {
            min_data_points: 7,
            seasonality: SeasonalityConfig::default(),
        }
    }
}

impl SeasonalConfig {
    pub fn with_min_data_points(mut self, min: usize) -> Self {
        self.min_data_points = min;
        self
    }

    pub fn with_seasonal_candidates(mut self, candidates: Vec<usize>) -> Self {
        self.seasonality = self.seasonality.with_candidates(candidates);
        self
    }

    pub fn with_correlation_threshold(mut self, threshold: f64) -> Self {
        self.seasonality = self.seasonality.with_threshold(threshold);
        self
    }

    pub fn with_default_period(mut self, period: usize) -> Self {
        self.seasonality = self.seasonality.with_default_period(period);
        self
    }
}

/// Multiplicative seasonal indices for `period` phases.
///
/// `index[k]` is the mean of `x[i] / mean(x)` over `i ≡ k (mod period)`,
/// rescaled so the indices sum to `period`. A zero-mean series, or one whose
/// raw indices sum to zero, gets a flat index of 1.0 everywhere.
pub fn seasonal_indices(series: &[f64], period: usize) -> Vec<f64> {
    if period == 0 {
        return Vec::new();
    }
    let overall = mean(series);
    if !overall.is_finite() || overall.abs() < NEAR_ZERO {
        return vec![1.0; period];
    }

    let mut sums = vec![0.0; period];
    let mut counts = vec![0usize; period];
    for (i, &x) in series.iter().enumerate() {
        sums[i % period] += x / overall;
        counts[i % period] += 1;
    }

    let raw: Vec<f64> = sums
        .iter()
        .zip(&counts)
        .map(|(&s, &c)| if c > 0 { s / c as f64 } else { 1.0 })
        .collect();

    let total: f64 = raw.iter().sum();
    if total.abs() < NEAR_ZERO {
        return vec![1.0; period];
    }
    let scale = period as f64 / total;
    raw.into_iter().map(|v| v * scale).collect()
}

/// Details of a seasonal fit.
#[derive(Debug, Clone)]
pub struct SeasonalFit {
    pub period: usize,
    pub detected: bool,
    pub indices: Vec<f64>,
    pub recent_mean: f64,
    pub forecast: f64,
}

/// Seasonal-naive level forecaster with multiplicative indices.
#[derive(Debug, Clone, Default)]
pub struct SeasonalForecaster {
    config: SeasonalConfig,
}

impl SeasonalForecaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SeasonalConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SeasonalConfig {
        &self.config
    }

    /// Detect the period, build indices and forecast the next value.
    pub fn fit(&self, values: &[f64]) -> Result<SeasonalFit> {
        let n = values.len();
        if n == 0 {
            return Err(ForecastError::EmptyData);
        }

        let detection = detect_period(values, &self.config.seasonality);
        let period = detection.period;
        let indices = seasonal_indices(values, period);

        let recent = &values[n - (2 * period).min(n)..];
        let recent_mean = mean(recent);
        let forecast = recent_mean * indices[n % period];

        Ok(SeasonalFit {
            period,
            detected: detection.detected,
            indices,
            recent_mean,
            forecast,
        })
    }
}

impl Forecaster for SeasonalForecaster {
    fn name(&self) -> &str {
        "Seasonal"
    }

    fn min_data_points(&self) -> usize {
        self.config.min_data_points
    }

    fn predict_next(&self, values: &[f64]) -> Result<f64> {
        Ok(self.fit(values)?.forecast.max(0.0))
    }
}
