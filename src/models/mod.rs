//! Forecasting models.

mod traits;

pub mod arima;
pub mod exponential;
pub mod linear;
pub mod seasonal;
pub mod sequence;
pub mod strategy;
pub mod theta;

pub use arima::{TrendDecompositionConfig, TrendDecompositionForecaster};
pub use exponential::{ExponentialSmoothingConfig, ExponentialSmoothingForecaster};
pub use linear::{LinearTrendConfig, LinearTrendForecaster};
pub use seasonal::{SeasonalConfig, SeasonalForecaster};
pub use sequence::{SequenceConfig, SequenceForecaster};
pub use strategy::{ForecastModel, ModelKind};
pub use theta::{ThetaConfig, ThetaForecaster};
pub use traits::{BoxedForecaster, Forecaster};
