//! Running two independent sub-forecasts side by side.
//!
//! Composite strategies combine the outputs of two model runs (for example
//! a forecast of a KPI and of one of its components). The two runs share
//! nothing, so they are executed on a dedicated two-worker pool and joined.

use crate::core::{ForecastResult, HistoricalSeries};
use crate::models::Forecaster;
use rayon::ThreadPoolBuilder;
use tracing::debug;

/// Results of both branches of a [`forecast_pair`] call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairForecast {
    pub first: Vec<ForecastResult>,
    pub second: Vec<ForecastResult>,
}

impl PairForecast {
    /// True when both branches produced a result.
    pub fn is_complete(&self) -> bool {
        !self.first.is_empty() && !self.second.is_empty()
    }

    /// Sum of both predicted values, if both branches produced one.
    pub fn combined_value(&self) -> Option<f64> {
        match (self.first.first(), self.second.first()) {
            (Some(a), Some(b)) => Some(a.predicted_value() + b.predicted_value()),
            _ => None,
        }
    }
}

/// Forecast two jobs concurrently on a two-worker pool.
///
/// Each branch goes through [`Forecaster::generate_forecast`], so a failure
/// or panic in one branch leaves that branch empty and the other untouched.
/// If the pool cannot be created the jobs run one after the other.
pub fn forecast_pair<A, B>(
    first: (&A, &HistoricalSeries),
    second: (&B, &HistoricalSeries),
) -> PairForecast
where
    A: Forecaster + Sync + ?Sized,
    B: Forecaster + Sync + ?Sized,
{
    let (model_a, series_a) = first;
    let (model_b, series_b) = second;
    let run_a = || model_a.generate_forecast(series_a);
    let run_b = || model_b.generate_forecast(series_b);

    let (first, second) = match ThreadPoolBuilder::new().num_threads(2).build() {
        Ok(pool) => pool.join(run_a, run_b),
        Err(err) => {
            debug!(error = %err, "thread pool unavailable, forecasting sequentially");
            (run_a(), run_b())
        }
    };

    PairForecast { first, second }
}
