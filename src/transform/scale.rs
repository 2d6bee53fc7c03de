//! Min-max scaling for the sequence model.

use crate::utils::stats::NEAR_ZERO;

/// Fitted min-max scaler mapping observed values into `[0, 1]`.
///
/// A constant series has no range to scale by; every value then maps to the
/// midpoint 0.5 and denormalizes back to the constant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMaxScaler {
    min: f64,
    max: f64,
}

impl MinMaxScaler {
    /// Fit the scaler on a series. Returns `None` for an empty slice.
    pub fn fit(series: &[f64]) -> Option<Self> {
        if series.is_empty() {
            return None;
        }
        let min = series.iter().copied().fold(f64::INFINITY, f64::min);
        let max = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Whether the fitted series was constant.
    pub fn is_degenerate(&self) -> bool {
        self.range().abs() < NEAR_ZERO
    }

    pub fn normalize(&self, x: f64) -> f64 {
        if self.is_degenerate() {
            0.5
        } else {
            (x - self.min) / self.range()
        }
    }

    /// Map a normalized value back: `x * (max - min) + min`.
    pub fn denormalize(&self, x: f64) -> f64 {
        x * self.range() + self.min
    }

    pub fn transform(&self, series: &[f64]) -> Vec<f64> {
        series.iter().map(|&x| self.normalize(x)).collect()
    }

    pub fn inverse(&self, series: &[f64]) -> Vec<f64> {
        series.iter().map(|&x| self.denormalize(x)).collect()
    }
}

/// Fit and apply min-max normalization in one call.
pub fn normalize(series: &[f64]) -> Option<(Vec<f64>, MinMaxScaler)> {
    let scaler = MinMaxScaler::fit(series)?;
    Some((scaler.transform(series), scaler))
}
