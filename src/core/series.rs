//! Historical KPI series and value extraction.

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Utc};

/// A raw KPI value as delivered by the aggregation layer.
///
/// Values usually arrive as numbers, but some KPI sources hand over text
/// (`"12.5"`, `""`, `"n/a"`). Text is parsed leniently during extraction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Parse into a finite `f64`, or `None` if the value is unusable.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            RawValue::Number(v) => *v,
            RawValue::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

/// One historical data point of a KPI.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Observation {
    value: RawValue,
    /// Decomposed sub-values ("bubble points"); preferred over `value` when present.
    #[cfg_attr(feature = "serde", serde(default))]
    bubble_points: Vec<RawValue>,
    project_name: String,
    kpi_group: String,
    recorded_at: Option<DateTime<Utc>>,
}

impl Observation {
    /// Create an observation with a scalar value and metadata.
    pub fn new(
        value: impl Into<RawValue>,
        project_name: impl Into<String>,
        kpi_group: impl Into<String>,
    ) -> Self {
        Self {
            value: value.into(),
            bubble_points: Vec::new(),
            project_name: project_name.into(),
            kpi_group: kpi_group.into(),
            recorded_at: None,
        }
    }

    /// Attach decomposed sub-values.
    pub fn with_bubble_points<I, V>(mut self, points: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<RawValue>,
    {
        self.bubble_points = points.into_iter().map(Into::into).collect();
        self
    }

    /// Attach the period timestamp.
    pub fn with_recorded_at(mut self, recorded_at: DateTime<Utc>) -> Self {
        self.recorded_at = Some(recorded_at);
        self
    }

    pub fn value(&self) -> &RawValue {
        &self.value
    }

    pub fn bubble_points(&self) -> &[RawValue] {
        &self.bubble_points
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn kpi_group(&self) -> &str {
        &self.kpi_group
    }

    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        self.recorded_at
    }

    /// Numeric values contributed by this observation, in order.
    ///
    /// Bubble points win over the scalar value; unparsable entries are dropped.
    fn numeric_values(&self) -> impl Iterator<Item = f64> + '_ {
        let raw: &[RawValue] = if self.bubble_points.is_empty() {
            std::slice::from_ref(&self.value)
        } else {
            &self.bubble_points
        };
        raw.iter().filter_map(RawValue::as_f64)
    }
}

/// A chronologically ordered KPI history.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistoricalSeries {
    observations: Vec<Observation>,
}

impl HistoricalSeries {
    /// Wrap observations without further validation.
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    /// Build a series from plain numbers with shared metadata.
    pub fn from_values(
        values: &[f64],
        project_name: impl Into<String>,
        kpi_group: impl Into<String>,
    ) -> Self {
        let project_name = project_name.into();
        let kpi_group = kpi_group.into();
        Self::new(
            values
                .iter()
                .map(|&v| Observation::new(v, project_name.clone(), kpi_group.clone()))
                .collect(),
        )
    }

    pub fn builder() -> HistoricalSeriesBuilder {
        HistoricalSeriesBuilder::default()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// The most recent observation, whose metadata labels the forecast.
    pub fn latest(&self) -> Option<&Observation> {
        self.observations.last()
    }
}

impl FromIterator<Observation> for HistoricalSeries {
    fn from_iter<T: IntoIterator<Item = Observation>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Builder that checks timestamp ordering when timestamps are present.
#[derive(Debug, Clone, Default)]
pub struct HistoricalSeriesBuilder {
    observations: Vec<Observation>,
}

impl HistoricalSeriesBuilder {
    pub fn observation(mut self, observation: Observation) -> Self {
        self.observations.push(observation);
        self
    }

    pub fn observations<I: IntoIterator<Item = Observation>>(mut self, observations: I) -> Self {
        self.observations.extend(observations);
        self
    }

    /// Build the series.
    ///
    /// Timestamps are optional, but when every observation carries one they
    /// must be strictly increasing.
    pub fn build(self) -> Result<HistoricalSeries> {
        let stamps: Option<Vec<DateTime<Utc>>> =
            self.observations.iter().map(Observation::recorded_at).collect();
        if let Some(stamps) = stamps {
            if stamps.windows(2).any(|w| w[1] <= w[0]) {
                return Err(ForecastError::InvalidParameter(
                    "observation timestamps must be strictly increasing".to_string(),
                ));
            }
        }
        Ok(HistoricalSeries::new(self.observations))
    }
}

/// Flatten a series into its numeric observations.
///
/// Each observation contributes its bubble points if it has any, otherwise its
/// scalar value. Entries that do not parse to a finite number are skipped.
pub fn extract_values(series: &HistoricalSeries) -> Vec<f64> {
    series
        .observations
        .iter()
        .flat_map(Observation::numeric_values)
        .collect()
}

/// Whether a model with the given floor may run on this series.
///
/// False for an empty series, or when the extracted value count does not
/// exceed `min_data_points`.
pub fn can_forecast(series: &HistoricalSeries, min_data_points: usize) -> bool {
    !series.is_empty() && extract_values(series).len() > min_data_points
}

/// Extract values and enforce the eligibility floor in one step.
pub(crate) fn eligible_values(series: &HistoricalSeries, min_data_points: usize) -> Result<Vec<f64>> {
    if series.is_empty() {
        return Err(ForecastError::EmptyData);
    }
    let values = extract_values(series);
    if values.len() <= min_data_points {
        return Err(ForecastError::InsufficientData {
            needed: min_data_points,
            got: values.len(),
        });
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn obs(value: impl Into<RawValue>) -> Observation {
        Observation::new(value, "atlas", "commits")
    }

    #[test]
    fn raw_value_parsing() {
        assert_eq!(RawValue::Number(3.5).as_f64(), Some(3.5));
        assert_eq!(RawValue::from(" 12.25 ").as_f64(), Some(12.25));
        assert_eq!(RawValue::from("n/a").as_f64(), None);
        assert_eq!(RawValue::from("").as_f64(), None);
        assert_eq!(RawValue::Number(f64::NAN).as_f64(), None);
        assert_eq!(RawValue::from("inf").as_f64(), None);
    }

    #[test]
    fn extract_prefers_bubble_points() {
        let series = HistoricalSeries::new(vec![
            obs(1.0),
            obs(99.0).with_bubble_points([2.0, 3.0]),
            obs(4.0),
        ]);
        assert_eq!(extract_values(&series), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn extract_skips_unparsable_entries() {
        let series = HistoricalSeries::new(vec![
            obs("5"),
            obs("garbage"),
            obs(0.0).with_bubble_points(vec![RawValue::from("7"), RawValue::from("?")]),
        ]);
        assert_eq!(extract_values(&series), vec![5.0, 7.0]);
    }

    #[test]
    fn can_forecast_uses_strict_floor() {
        let series = HistoricalSeries::from_values(&[1.0, 2.0, 3.0], "atlas", "commits");
        assert!(can_forecast(&series, 2));
        assert!(!can_forecast(&series, 3));
        assert!(!can_forecast(&HistoricalSeries::default(), 0));
    }

    #[test]
    fn eligible_values_reports_reason() {
        assert_eq!(
            eligible_values(&HistoricalSeries::default(), 0),
            Err(ForecastError::EmptyData)
        );
        let series = HistoricalSeries::from_values(&[1.0, 2.0], "atlas", "commits");
        assert_eq!(
            eligible_values(&series, 2),
            Err(ForecastError::InsufficientData { needed: 2, got: 2 })
        );
        assert_eq!(eligible_values(&series, 1).unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn builder_rejects_unordered_timestamps() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let result = HistoricalSeries::builder()
            .observation(obs(1.0).with_recorded_at(base + Duration::days(7)))
            .observation(obs(2.0).with_recorded_at(base))
            .build();
        assert!(matches!(result, Err(ForecastError::InvalidParameter(_))));

        let ordered = HistoricalSeries::builder()
            .observations((0..4).map(|i| obs(i as f64).with_recorded_at(base + Duration::days(i))))
            .build()
            .unwrap();
        assert_eq!(ordered.len(), 4);
    }

    #[test]
    fn builder_accepts_missing_timestamps() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let series = HistoricalSeries::builder()
            .observation(obs(1.0).with_recorded_at(base))
            .observation(obs(2.0))
            .build()
            .unwrap();
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn latest_carries_metadata() {
        let series = HistoricalSeries::new(vec![
            Observation::new(1.0, "old", "issues"),
            Observation::new(2.0, "atlas", "commits"),
        ]);
        let latest = series.latest().unwrap();
        assert_eq!(latest.project_name(), "atlas");
        assert_eq!(latest.kpi_group(), "commits");
    }
}
