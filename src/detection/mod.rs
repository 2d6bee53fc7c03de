//! Detection utilities for time series characteristics.

mod seasonality;

pub use seasonality::{detect_period, SeasonalityConfig, SeasonalityResult};
