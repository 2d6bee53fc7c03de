//! Recurrent sequence forecaster trained from scratch on every call.

use crate::error::{ForecastError, Result};
use crate::models::sequence::cell::CellParams;
use crate::models::Forecaster;
use crate::transform::{latest_window, normalize, sliding_windows, MinMaxScaler, Window};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Configuration for [`SequenceForecaster`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SequenceConfig {
    /// Eligibility floor; the default requires at least six points.
    pub min_data_points: usize,
    /// Upper bound on the lookback; the effective window is `min(this, n - 2)`.
    pub lookback_window: usize,
    /// Number of hidden units.
    pub hidden_size: usize,
    pub learning_rate: f64,
    /// Hard cap on training epochs.
    pub max_epochs: usize,
    /// Epoch budget per training window; the cap is `min(max_epochs, this × windows)`.
    pub epochs_per_window: usize,
    /// Consecutive near-flat epochs before stopping early.
    pub patience: usize,
    /// Loss change below which an epoch counts as flat.
    pub loss_tolerance: f64,
    /// Fewer windows than this makes the series ineligible.
    pub min_windows: usize,
    /// Half-width of the uniform weight initialisation.
    pub init_scale: f64,
    /// Seed for weight initialisation.
    pub seed: u64,
    /// Optional wall-clock budget for training.
    pub deadline: Option<Duration>,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            min_data_points: 5,
            lookback_window: 3,
            hidden_size: 8,
            learning_rate: 0.01,
            max_epochs: 100,
            epochs_per_window: 10,
            patience: 10,
            loss_tolerance: 1e-6,
            min_windows: 2,
            init_scale: 0.5,
            seed: 42,
            deadline: None,
        }
    }
}

impl SequenceConfig {
    pub fn with_min_data_points(mut self, min: usize) -> Self {
        self.min_data_points = min;
        self
    }

    pub fn with_lookback_window(mut self, lookback: usize) -> Self {
        self.lookback_window = lookback.max(1);
        self
    }

    pub fn with_hidden_size(mut self, hidden_size: usize) -> Self {
        self.hidden_size = hidden_size.max(1);
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_max_epochs(mut self, max_epochs: usize) -> Self {
        self.max_epochs = max_epochs;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    fn validate(&self) -> Result<()> {
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if self.hidden_size == 0 {
            return Err(ForecastError::InvalidParameter(
                "hidden_size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Summary of one training run.
#[derive(Debug, Clone)]
pub struct TrainingReport {
    pub params: CellParams,
    pub epochs: usize,
    pub final_loss: f64,
    pub stopped_early: bool,
}

/// Train the cell over the windows with per-window updates.
pub fn train(
    initial: CellParams,
    windows: &[Window<'_>],
    config: &SequenceConfig,
) -> Result<TrainingReport> {
    let started = Instant::now();
    let max_epochs = config
        .max_epochs
        .min(config.epochs_per_window.saturating_mul(windows.len()));

    let mut params = initial;
    let mut previous_loss: Option<f64> = None;
    let mut flat_epochs = 0;
    let mut final_loss = f64::NAN;
    let mut epochs = 0;

    while epochs < max_epochs {
        if let Some(deadline) = config.deadline {
            if started.elapsed() >= deadline {
                return Err(ForecastError::DeadlineExceeded { epochs });
            }
        }

        let mut total = 0.0;
        for window in windows {
            let state = params.run(window.inputs);
            let prediction = state.readout();
            let error = window.target - prediction;
            total += error * error;

            let last_input = window.inputs.last().copied().unwrap_or(0.0);
            params = params.updated(error, config.learning_rate, &state.hidden, &[last_input]);
        }
        epochs += 1;

        let loss = total / windows.len() as f64;
        if !loss.is_finite() {
            return Err(ForecastError::ComputationError(format!(
                "training loss diverged at epoch {epochs}"
            )));
        }
        trace!(epoch = epochs, loss, "sequence epoch");

        if let Some(prev) = previous_loss {
            if (loss - prev).abs() < config.loss_tolerance {
                flat_epochs += 1;
            } else {
                flat_epochs = 0;
            }
        }
        previous_loss = Some(loss);
        final_loss = loss;

        if flat_epochs >= config.patience {
            debug!(epochs, loss, "sequence training converged early");
            return Ok(TrainingReport {
                params,
                epochs,
                final_loss,
                stopped_early: true,
            });
        }
    }

    Ok(TrainingReport {
        params,
        epochs,
        final_loss,
        stopped_early: false,
    })
}

/// Details of a sequence fit.
#[derive(Debug, Clone)]
pub struct SequenceFit {
    pub scaler: MinMaxScaler,
    pub lookback: usize,
    pub windows: usize,
    pub epochs: usize,
    pub final_loss: f64,
    /// Prediction on the normalized scale.
    pub normalized_forecast: f64,
    /// Denormalized prediction, before clamping.
    pub forecast: f64,
}

/// Gated-recurrent forecaster.
///
/// Every call normalizes the series, builds lookback windows, initialises a
/// fresh cell from the configured seed, trains it, and predicts from the most
/// recent window. Nothing is kept between calls.
#[derive(Debug, Clone, Default)]
pub struct SequenceForecaster {
    config: SequenceConfig,
}

impl SequenceForecaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SequenceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SequenceConfig {
        &self.config
    }

    /// Effective lookback for a series of length `n`.
    pub fn lookback_for(&self, n: usize) -> usize {
        self.config.lookback_window.min(n.saturating_sub(2))
    }

    /// Run normalization, training and prediction on extracted values.
    pub fn fit(&self, values: &[f64]) -> Result<SequenceFit> {
        self.config.validate()?;
        let (scaled, scaler) = normalize(values).ok_or(ForecastError::EmptyData)?;

        let lookback = self.lookback_for(values.len());
        let windows = sliding_windows(&scaled, lookback);
        if windows.len() < self.config.min_windows.max(1) {
            return Err(ForecastError::InsufficientWindows {
                needed: self.config.min_windows.max(1),
                got: windows.len(),
            });
        }

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let initial = CellParams::random(self.config.hidden_size, 1, self.config.init_scale, &mut rng);
        let report = train(initial, &windows, &self.config)?;

        let recent = latest_window(&scaled, lookback).ok_or(ForecastError::InsufficientWindows {
            needed: self.config.min_windows,
            got: 0,
        })?;
        let normalized_forecast = report.params.predict(recent);
        let forecast = scaler.denormalize(normalized_forecast);

        Ok(SequenceFit {
            scaler,
            lookback,
            windows: windows.len(),
            epochs: report.epochs,
            final_loss: report.final_loss,
            normalized_forecast,
            forecast,
        })
    }
}

impl Forecaster for SequenceForecaster {
    fn name(&self) -> &str {
        "Sequence"
    }

    fn min_data_points(&self) -> usize {
        self.config.min_data_points
    }

    fn predict_next(&self, values: &[f64]) -> Result<f64> {
        Ok(self.fit(values)?.forecast.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::HistoricalSeries;
    use approx::assert_relative_eq;

    fn series(values: &[f64]) -> HistoricalSeries {
        HistoricalSeries::from_values(values, "atlas", "commits")
    }

    #[test]
    fn constant_series_forecasts_constant() {
        let fit = SequenceForecaster::new().fit(&[12.0; 8]).unwrap();
        assert!(fit.scaler.is_degenerate());
        assert_relative_eq!(fit.forecast, 12.0, epsilon = 1e-12);
    }

    #[test]
    fn forecast_stays_within_observed_range() {
        // the read-out is a sigmoid, so the denormalized value lies in [min, max]
        let values = [3.0, 8.0, 5.0, 9.0, 4.0, 10.0, 6.0];
        let fit = SequenceForecaster::new().fit(&values).unwrap();
        assert!(fit.forecast >= 3.0 && fit.forecast <= 10.0);
        assert_eq!(fit.lookback, 3);
        assert_eq!(fit.windows, 4);
        assert!(fit.epochs >= 1 && fit.epochs <= 40);
        assert!(fit.final_loss.is_finite());
    }

    #[test]
    fn same_seed_is_idempotent() {
        let values = [3.0, 8.0, 5.0, 9.0, 4.0, 10.0, 6.0, 7.0];
        let model = SequenceForecaster::new();
        let a = model.fit(&values).unwrap().forecast;
        let b = model.fit(&values).unwrap().forecast;
        assert_eq!(a, b);
    }

    #[test]
    fn epoch_cap_scales_with_windows() {
        // n = 6: lookback 3, three windows, at most 30 epochs
        let fit = SequenceForecaster::new().fit(&[1.0, 2.0, 4.0, 3.0, 5.0, 6.0]).unwrap();
        assert_eq!(fit.windows, 3);
        assert!(fit.epochs <= 30);
    }

    #[test]
    fn long_lookback_is_capped() {
        let model = SequenceForecaster::with_config(SequenceConfig::default().with_lookback_window(10));
        assert_eq!(model.lookback_for(6), 4);
        let fit = model.fit(&[1.0, 2.0, 4.0, 3.0, 5.0, 6.0]).unwrap();
        assert_eq!(fit.windows, 2);
    }

    #[test]
    fn too_few_windows_is_ineligible() {
        let model = SequenceForecaster::with_config(SequenceConfig::default().with_min_data_points(0));
        // two points leave no room for a lookback window
        let err = model.fit(&[1.0, 2.0]).unwrap_err();
        assert_eq!(err, ForecastError::InsufficientWindows { needed: 2, got: 0 });
    }

    #[test]
    fn needs_six_points() {
        let model = SequenceForecaster::new();
        let short = series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!(!model.can_forecast(&short));
        assert!(model.generate_forecast(&short).is_empty());
    }

    #[test]
    fn zero_deadline_is_reported() {
        let model = SequenceForecaster::with_config(
            SequenceConfig::default().with_deadline(Duration::ZERO),
        );
        let outcome = model.forecast(&series(&[1.0, 2.0, 4.0, 3.0, 5.0, 6.0]));
        assert_eq!(
            outcome.diagnostic(),
            Some(&ForecastError::DeadlineExceeded { epochs: 0 })
        );
    }

    #[test]
    fn invalid_learning_rate_is_rejected() {
        let model =
            SequenceForecaster::with_config(SequenceConfig::default().with_learning_rate(-1.0));
        assert!(matches!(
            model.fit(&[1.0, 2.0, 4.0, 3.0, 5.0, 6.0]),
            Err(ForecastError::InvalidParameter(_))
        ));
    }

    #[test]
    fn flat_loss_stops_early() {
        let data = [0.2, 0.4, 0.6, 0.8, 0.9, 0.95, 1.0, 1.0];
        let windows = sliding_windows(&data, 3);
        let config = SequenceConfig {
            loss_tolerance: 1.0,
            patience: 2,
            ..SequenceConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let initial = CellParams::random(4, 1, 0.5, &mut rng);
        let report = train(initial, &windows, &config).unwrap();
        assert!(report.stopped_early);
        assert_eq!(report.epochs, 3);
    }

    #[test]
    fn training_respects_epoch_cap() {
        let data = [0.0, 1.0, 0.0, 1.0, 0.0, 1.0];
        let windows = sliding_windows(&data, 2);
        let config = SequenceConfig::default().with_max_epochs(7);
        let mut rng = StdRng::seed_from_u64(5);
        let report = train(CellParams::random(3, 1, 0.5, &mut rng), &windows, &config).unwrap();
        assert!(report.epochs <= 7);
        assert!(report.final_loss.is_finite());
    }
}
