//! Core data structures for KPI forecasting.

mod forecast;
mod series;

pub use forecast::{ForecastOutcome, ForecastResult};
pub(crate) use series::eligible_values;
pub use series::{
    can_forecast, extract_values, HistoricalSeries, HistoricalSeriesBuilder, Observation, RawValue,
};
