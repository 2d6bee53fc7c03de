//! Error types for the kpi-forecast library.
//!
//! None of these errors reach the caller of [`Forecaster::forecast`]; they are
//! folded into a [`ForecastOutcome`] diagnostic. They are still ordinary
//! `Result` errors inside the crate so the numerical code can use `?`.
//!
//! [`Forecaster::forecast`]: crate::models::Forecaster::forecast
//! [`ForecastOutcome`]: crate::core::ForecastOutcome

use thiserror::Error;

/// Result type alias for forecast operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Coarse classification of why a forecast was not produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Series too short, empty, or degenerate. An expected outcome.
    IneligibleInput,
    /// Non-finite parameters, too few degrees of freedom, guarded divisions.
    NumericalFailure,
    /// Anything else raised while fitting or predicting.
    UnexpectedFailure,
}

/// Errors that can occur during forecasting operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Input series is empty.
    #[error("empty input data")]
    EmptyData,

    /// Insufficient data points for the model.
    #[error("insufficient data: need more than {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Too few supervised windows for the sequence model.
    #[error("insufficient training windows: need at least {needed}, got {got}")]
    InsufficientWindows { needed: usize, got: usize },

    /// A fitted parameter was NaN or infinite.
    #[error("non-finite parameter: {0}")]
    NonFiniteParameter(String),

    /// The model has at least as many parameters as observations.
    #[error("insufficient degrees of freedom: {params} parameters for {observations} observations")]
    InsufficientDegreesOfFreedom { params: usize, observations: usize },

    /// Invalid configuration value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Computation error (e.g., numerical issues).
    #[error("computation error: {0}")]
    ComputationError(String),

    /// Training ran past the configured deadline.
    #[error("deadline exceeded after {epochs} epochs")]
    DeadlineExceeded { epochs: usize },

    /// A panic or other unexpected failure inside a model.
    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

impl ForecastError {
    /// Classify the error into the three caller-facing failure kinds.
    pub fn kind(&self) -> FailureKind {
        match self {
            ForecastError::EmptyData
            | ForecastError::InsufficientData { .. }
            | ForecastError::InsufficientWindows { .. } => FailureKind::IneligibleInput,
            ForecastError::NonFiniteParameter(_)
            | ForecastError::InsufficientDegreesOfFreedom { .. }
            | ForecastError::InvalidParameter(_)
            | ForecastError::ComputationError(_)
            | ForecastError::DeadlineExceeded { .. } => FailureKind::NumericalFailure,
            ForecastError::Unexpected(_) => FailureKind::UnexpectedFailure,
        }
    }

    /// Whether this is the normal "not enough data" outcome.
    pub fn is_ineligible(&self) -> bool {
        self.kind() == FailureKind::IneligibleInput
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = ForecastError::EmptyData;
        assert_eq!(err.to_string(), "empty input data");

        let err = ForecastError::InsufficientData { needed: 5, got: 3 };
        assert_eq!(err.to_string(), "insufficient data: need more than 5, got 3");

        let err = ForecastError::InsufficientDegreesOfFreedom {
            params: 3,
            observations: 2,
        };
        assert_eq!(
            err.to_string(),
            "insufficient degrees of freedom: 3 parameters for 2 observations"
        );

        let err = ForecastError::DeadlineExceeded { epochs: 12 };
        assert_eq!(err.to_string(), "deadline exceeded after 12 epochs");
    }

    #[test]
    fn errors_are_classified() {
        assert_eq!(ForecastError::EmptyData.kind(), FailureKind::IneligibleInput);
        assert_eq!(
            ForecastError::InsufficientWindows { needed: 2, got: 1 }.kind(),
            FailureKind::IneligibleInput
        );
        assert_eq!(
            ForecastError::NonFiniteParameter("slope".into()).kind(),
            FailureKind::NumericalFailure
        );
        assert_eq!(
            ForecastError::Unexpected("boom".into()).kind(),
            FailureKind::UnexpectedFailure
        );
        assert!(ForecastError::InsufficientData { needed: 1, got: 1 }.is_ineligible());
    }

    #[test]
    fn errors_are_clonable_and_comparable() {
        let err1 = ForecastError::ComputationError("x".into());
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
