//! ARIMA-style trend model for short KPI series.

use crate::error::{ForecastError, Result};
use crate::models::arima::diff::{difference, integrate_step, variance_shift};
use crate::models::arima::model::{ArmaModel, ArmaOrder};
use crate::models::Forecaster;
use crate::utils::optimization::SimplexConfig;
use tracing::trace;

/// Configuration for [`TrendDecompositionForecaster`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrendDecompositionConfig {
    /// Eligibility floor; the default requires at least five points.
    pub min_data_points: usize,
    /// Half-series variance ratio at which the series is differenced.
    pub variance_shift_ratio: f64,
    /// Iteration cap for the ARMA parameter search.
    pub max_iter: usize,
}

impl Default for TrendDecompositionConfig {
    fn default() -> Self {
        Self {
            min_data_points: 4,
            variance_shift_ratio: 2.0,
            max_iter: 1000,
        }
    }
}

impl TrendDecompositionConfig {
    pub fn with_min_data_points(mut self, min: usize) -> Self {
        self.min_data_points = min;
        self
    }

    pub fn with_variance_shift_ratio(mut self, ratio: f64) -> Self {
        self.variance_shift_ratio = ratio.max(1.0);
        self
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter.max(1);
        self
    }
}

/// Decomposition of a fit, exposed for diagnostics and tests.
#[derive(Debug, Clone)]
pub struct TrendFit {
    /// Differencing order applied (0 or 1).
    pub d: usize,
    /// ARMA order chosen for the working series.
    pub order: ArmaOrder,
    /// Forecast on the working (possibly differenced) scale.
    pub raw_forecast: f64,
    /// Forecast on the original scale, before clamping.
    pub forecast: f64,
}

/// ARIMA-style forecaster.
///
/// 1. Classify the series with a half-versus-half variance test.
/// 2. Difference once if it looks non-stationary.
/// 3. Pick a small ARMA order from the working length.
/// 4. Fit, forecast one step, and re-integrate.
#[derive(Debug, Clone, Default)]
pub struct TrendDecompositionForecaster {
    config: TrendDecompositionConfig,
}

impl TrendDecompositionForecaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TrendDecompositionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrendDecompositionConfig {
        &self.config
    }

    /// Run the full pipeline on extracted values.
    pub fn fit(&self, values: &[f64]) -> Result<TrendFit> {
        let last = *values.last().ok_or(ForecastError::EmptyData)?;

        let shift = variance_shift(values, self.config.variance_shift_ratio);
        let d = usize::from(shift.non_stationary);
        let working = difference(values, d);
        trace!(
            first_half = shift.first_half,
            second_half = shift.second_half,
            d,
            "stationarity check"
        );

        let order = ArmaOrder::for_length(working.len());
        let simplex = SimplexConfig::default().with_max_iter(self.config.max_iter);
        let model = ArmaModel::fit(&working, order, &simplex)?;

        let raw_forecast = model.forecast_next(&working);
        if !raw_forecast.is_finite() {
            return Err(ForecastError::NonFiniteParameter(format!(
                "ARMA forecast = {raw_forecast}"
            )));
        }

        let forecast = if d == 1 {
            integrate_step(last, raw_forecast)
        } else {
            raw_forecast
        };

        Ok(TrendFit {
            d,
            order,
            raw_forecast,
            forecast,
        })
    }
}

impl Forecaster for TrendDecompositionForecaster {
    fn name(&self) -> &str {
        "TrendDecomposition"
    }

    fn min_data_points(&self) -> usize {
        self.config.min_data_points
    }

    fn predict_next(&self, values: &[f64]) -> Result<f64> {
        Ok(self.fit(values)?.forecast.max(0.0))
    }
}
