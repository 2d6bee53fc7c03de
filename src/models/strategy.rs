//! Closed set of forecasting strategies.
//!
//! [`ForecastModel`] lets a caller pick one of the six models at runtime
//! without boxing; it implements [`Forecaster`] by delegating to the chosen
//! variant.

use crate::error::Result;
use crate::models::arima::TrendDecompositionForecaster;
use crate::models::exponential::ExponentialSmoothingForecaster;
use crate::models::linear::LinearTrendForecaster;
use crate::models::seasonal::SeasonalForecaster;
use crate::models::sequence::SequenceForecaster;
use crate::models::theta::ThetaForecaster;
use crate::models::Forecaster;
use std::fmt;
use std::str::FromStr;

/// Identifies a strategy without carrying its configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModelKind {
    LinearTrend,
    ExponentialSmoothing,
    Theta,
    TrendDecomposition,
    Seasonal,
    Sequence,
}

impl ModelKind {
    /// Every kind, cheapest first.
    pub const ALL: [ModelKind; 6] = [
        ModelKind::LinearTrend,
        ModelKind::ExponentialSmoothing,
        ModelKind::Theta,
        ModelKind::TrendDecomposition,
        ModelKind::Seasonal,
        ModelKind::Sequence,
    ];

    /// The name attached to results produced by this kind.
    pub fn name(self) -> &'static str {
        match self {
            ModelKind::LinearTrend => "LinearTrend",
            ModelKind::ExponentialSmoothing => "ExponentialSmoothing",
            ModelKind::Theta => "Theta",
            ModelKind::TrendDecomposition => "TrendDecomposition",
            ModelKind::Seasonal => "Seasonal",
            ModelKind::Sequence => "Sequence",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelKind {
    type Err = crate::error::ForecastError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ModelKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| crate::error::ForecastError::InvalidParameter(format!("unknown model: {s}")))
    }
}

/// One of the six forecasting strategies, with its configuration.
#[derive(Debug, Clone)]
pub enum ForecastModel {
    LinearTrend(LinearTrendForecaster),
    ExponentialSmoothing(ExponentialSmoothingForecaster),
    Theta(ThetaForecaster),
    TrendDecomposition(TrendDecompositionForecaster),
    Seasonal(SeasonalForecaster),
    Sequence(SequenceForecaster),
}

impl ForecastModel {
    /// The default-configured model of the given kind.
    pub fn from_kind(kind: ModelKind) -> Self {
        match kind {
            ModelKind::LinearTrend => Self::LinearTrend(LinearTrendForecaster::new()),
            ModelKind::ExponentialSmoothing => {
                Self::ExponentialSmoothing(ExponentialSmoothingForecaster::new())
            }
            ModelKind::Theta => Self::Theta(ThetaForecaster::new()),
            ModelKind::TrendDecomposition => {
                Self::TrendDecomposition(TrendDecompositionForecaster::new())
            }
            ModelKind::Seasonal => Self::Seasonal(SeasonalForecaster::new()),
            ModelKind::Sequence => Self::Sequence(SequenceForecaster::new()),
        }
    }

    /// All six strategies with default configuration.
    pub fn all() -> Vec<Self> {
        ModelKind::ALL.into_iter().map(Self::from_kind).collect()
    }

    pub fn kind(&self) -> ModelKind {
        match self {
            Self::LinearTrend(_) => ModelKind::LinearTrend,
            Self::ExponentialSmoothing(_) => ModelKind::ExponentialSmoothing,
            Self::Theta(_) => ModelKind::Theta,
            Self::TrendDecomposition(_) => ModelKind::TrendDecomposition,
            Self::Seasonal(_) => ModelKind::Seasonal,
            Self::Sequence(_) => ModelKind::Sequence,
        }
    }

    fn inner(&self) -> &(dyn Forecaster + Send + Sync) {
        match self {
            Self::LinearTrend(m) => m,
            Self::ExponentialSmoothing(m) => m,
            Self::Theta(m) => m,
            Self::TrendDecomposition(m) => m,
            Self::Seasonal(m) => m,
            Self::Sequence(m) => m,
        }
    }
}

impl From<ModelKind> for ForecastModel {
    fn from(kind: ModelKind) -> Self {
        Self::from_kind(kind)
    }
}

impl From<LinearTrendForecaster> for ForecastModel {
    fn from(model: LinearTrendForecaster) -> Self {
        Self::LinearTrend(model)
    }
}

impl From<ExponentialSmoothingForecaster> for ForecastModel {
    fn from(model: ExponentialSmoothingForecaster) -> Self {
        Self::ExponentialSmoothing(model)
    }
}

impl From<ThetaForecaster> for ForecastModel {
    fn from(model: ThetaForecaster) -> Self {
        Self::Theta(model)
    }
}

impl From<TrendDecompositionForecaster> for ForecastModel {
    fn from(model: TrendDecompositionForecaster) -> Self {
        Self::TrendDecomposition(model)
    }
}

impl From<SeasonalForecaster> for ForecastModel {
    fn from(model: SeasonalForecaster) -> Self {
        Self::Seasonal(model)
    }
}

impl From<SequenceForecaster> for ForecastModel {
    fn from(model: SequenceForecaster) -> Self {
        Self::Sequence(model)
    }
}

impl Forecaster for ForecastModel {
    fn name(&self) -> &str {
        self.inner().name()
    }

    fn min_data_points(&self) -> usize {
        self.inner().min_data_points()
    }

    fn predict_next(&self, values: &[f64]) -> Result<f64> {
        self.inner().predict_next(values)
    }
}
