//! Numerical helpers shared by the forecasting models.

pub mod ols;
pub mod optimization;
pub mod stats;

pub use ols::{ols_trend, LinearFit};
pub use optimization::{minimize, SimplexConfig, SimplexResult};
pub use stats::{coefficient_of_variation, lagged_correlation, mean, pearson_correlation};
