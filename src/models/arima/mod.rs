//! ARIMA-style trend decomposition.
//!
//! This module provides:
//! - differencing and a variance-shift stationarity heuristic
//! - a small ARMA(p, q) model fitted by conditional sum of squares
//! - [`TrendDecompositionForecaster`], which ties them into a one-step forecast

mod diff;
mod model;
mod trend;

pub use diff::{difference, integrate_step, variance_shift, VarianceShift};
pub use model::{ArmaModel, ArmaOrder};
pub use trend::{TrendDecompositionConfig, TrendDecompositionForecaster, TrendFit};
