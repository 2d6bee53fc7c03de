//! Forecaster trait defining the common interface for all models.

use crate::core::{can_forecast, eligible_values, ForecastOutcome, ForecastResult, HistoricalSeries};
use crate::error::{ForecastError, Result};
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::debug;

/// Common interface for all forecasting models.
///
/// Implementors provide the eligibility floor and the numerical core
/// ([`predict_next`](Forecaster::predict_next)); the provided methods handle
/// extraction, labelling and failure containment. This trait is object-safe.
pub trait Forecaster {
    /// Display name attached to every result.
    fn name(&self) -> &str;

    /// The extracted value count must exceed this for the model to run.
    fn min_data_points(&self) -> usize;

    /// Predict the next value from already-extracted observations.
    ///
    /// The returned value may be negative; it is clamped when wrapped into a
    /// [`ForecastResult`].
    fn predict_next(&self, values: &[f64]) -> Result<f64>;

    /// Check whether the model may run on this series.
    fn can_forecast(&self, series: &HistoricalSeries) -> bool {
        can_forecast(series, self.min_data_points())
    }

    /// Run the model, returning the failure reason as an error.
    fn try_forecast(&self, series: &HistoricalSeries) -> Result<ForecastResult> {
        let values = eligible_values(series, self.min_data_points())?;
        let predicted = self.predict_next(&values)?;
        if !predicted.is_finite() {
            return Err(ForecastError::NonFiniteParameter(format!(
                "forecast = {predicted}"
            )));
        }
        Ok(ForecastResult::for_series(series, predicted, self.name()))
    }

    /// Run the model and never fail: any error or panic becomes a diagnostic.
    fn forecast(&self, series: &HistoricalSeries) -> ForecastOutcome {
        let attempt = catch_unwind(AssertUnwindSafe(|| self.try_forecast(series)));
        let outcome = match attempt {
            Ok(Ok(result)) => return ForecastOutcome::produced(result),
            Ok(Err(err)) => err,
            Err(payload) => ForecastError::Unexpected(panic_message(payload.as_ref())),
        };
        debug!(
            model = self.name(),
            kind = ?outcome.kind(),
            reason = %outcome,
            "forecast skipped"
        );
        ForecastOutcome::skipped(self.name(), outcome)
    }

    /// Zero or one results; absence is the complete failure signal.
    fn generate_forecast(&self, series: &HistoricalSeries) -> Vec<ForecastResult> {
        self.forecast(series).into_results()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic during forecast".to_string()
    }
}

/// Type alias for boxed forecaster trait objects.
pub type BoxedForecaster = Box<dyn Forecaster + Send + Sync>;
