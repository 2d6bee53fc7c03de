//! # kpi-forecast
//!
//! One-step-ahead forecasting of project KPI histories.
//!
//! Six interchangeable models share one [`Forecaster`](models::Forecaster)
//! interface: linear trend, adaptive exponential smoothing, Theta, an
//! ARIMA-style trend decomposition, a seasonal index model and a small gated
//! recurrent sequence model. Every model returns zero or one result; a series
//! that is too short, degenerate or numerically hostile simply yields nothing,
//! with the reason available as a [`ForecastOutcome`](core::ForecastOutcome)
//! diagnostic.
//!
//! ```
//! use kpi_forecast::prelude::*;
//!
//! let series = HistoricalSeries::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0], "atlas", "commits");
//! let results = LinearTrendForecaster::new().generate_forecast(&series);
//! assert!((results[0].predicted_value() - 6.0).abs() < 1e-6);
//! ```

#![allow(clippy::needless_range_loop)]
#![allow(clippy::type_complexity)]

pub mod composite;
pub mod core;
pub mod detection;
pub mod error;
pub mod models;
pub mod transform;
pub mod utils;

pub use error::{FailureKind, ForecastError, Result};

pub mod prelude {
    pub use crate::composite::{forecast_pair, PairForecast};
    pub use crate::core::{ForecastOutcome, ForecastResult, HistoricalSeries, Observation};
    pub use crate::error::{FailureKind, ForecastError, Result};
    pub use crate::models::{
        ExponentialSmoothingForecaster, ForecastModel, Forecaster, LinearTrendForecaster,
        ModelKind, SeasonalForecaster, SequenceForecaster, ThetaForecaster,
        TrendDecompositionForecaster,
    };
}
