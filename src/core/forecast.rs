//! Forecast result structures.

use crate::core::HistoricalSeries;
use crate::error::{FailureKind, ForecastError};

/// A single one-step-ahead prediction for a KPI series.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForecastResult {
    predicted_value: f64,
    project_name: String,
    kpi_group: String,
    model_name: String,
}

impl ForecastResult {
    /// Create a result, clamping the prediction to be non-negative.
    pub fn new(
        predicted_value: f64,
        project_name: impl Into<String>,
        kpi_group: impl Into<String>,
        model_name: impl Into<String>,
    ) -> Self {
        Self {
            predicted_value: predicted_value.max(0.0),
            project_name: project_name.into(),
            kpi_group: kpi_group.into(),
            model_name: model_name.into(),
        }
    }

    /// Create a result labelled with the metadata of the series' latest observation.
    pub fn for_series(series: &HistoricalSeries, predicted_value: f64, model_name: &str) -> Self {
        let (project, group) = series
            .latest()
            .map(|o| (o.project_name(), o.kpi_group()))
            .unwrap_or(("", ""));
        Self::new(predicted_value, project, group, model_name)
    }

    pub fn predicted_value(&self) -> f64 {
        self.predicted_value
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn kpi_group(&self) -> &str {
        &self.kpi_group
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}

/// A forecast together with the reason it is missing, if it is.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastOutcome {
    model_name: String,
    result: Option<ForecastResult>,
    diagnostic: Option<ForecastError>,
}

impl ForecastOutcome {
    pub fn produced(result: ForecastResult) -> Self {
        Self {
            model_name: result.model_name().to_string(),
            result: Some(result),
            diagnostic: None,
        }
    }

    pub fn skipped(model_name: impl Into<String>, reason: ForecastError) -> Self {
        Self {
            model_name: model_name.into(),
            result: None,
            diagnostic: Some(reason),
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn result(&self) -> Option<&ForecastResult> {
        self.result.as_ref()
    }

    pub fn diagnostic(&self) -> Option<&ForecastError> {
        self.diagnostic.as_ref()
    }

    /// Failure classification, `None` when a forecast was produced.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.diagnostic.as_ref().map(ForecastError::kind)
    }

    pub fn is_produced(&self) -> bool {
        self.result.is_some()
    }

    /// Zero or one results, the shape consumers of the dashboard expect.
    pub fn into_results(self) -> Vec<ForecastResult> {
        self.result.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_predictions_are_clamped() {
        let result = ForecastResult::new(-3.2, "atlas", "issues", "LinearTrend");
        assert_eq!(result.predicted_value(), 0.0);
        assert_eq!(result.model_name(), "LinearTrend");
    }

    #[test]
    fn for_series_uses_latest_metadata() {
        let series = HistoricalSeries::from_values(&[1.0, 2.0], "atlas", "commits");
        let result = ForecastResult::for_series(&series, 4.5, "Theta");
        assert_eq!(result.project_name(), "atlas");
        assert_eq!(result.kpi_group(), "commits");
        assert_eq!(result.predicted_value(), 4.5);
    }

    #[test]
    fn outcome_shapes() {
        let produced =
            ForecastOutcome::produced(ForecastResult::new(1.0, "atlas", "commits", "Theta"));
        assert!(produced.is_produced());
        assert!(produced.failure_kind().is_none());
        assert_eq!(produced.clone().into_results().len(), 1);

        let skipped = ForecastOutcome::skipped("Theta", ForecastError::EmptyData);
        assert!(!skipped.is_produced());
        assert_eq!(skipped.failure_kind(), Some(FailureKind::IneligibleInput));
        assert!(skipped.into_results().is_empty());
    }
}
