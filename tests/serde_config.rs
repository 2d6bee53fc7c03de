//! Loading model configuration and histories from JSON.

#![cfg(feature = "serde")]

use kpi_forecast::core::{extract_values, HistoricalSeries};
use kpi_forecast::models::{
    Forecaster, SeasonalConfig, SequenceConfig, SequenceForecaster, TrendDecompositionConfig,
};

#[test]
fn partial_config_falls_back_to_defaults() {
    let config: SequenceConfig =
        serde_json::from_str(r#"{ "hidden_size": 4, "seed": 7 }"#).unwrap();
    assert_eq!(config.hidden_size, 4);
    assert_eq!(config.seed, 7);
    assert_eq!(config.lookback_window, SequenceConfig::default().lookback_window);

    let model = SequenceForecaster::with_config(config);
    assert_eq!(model.min_data_points(), 5);
}

#[test]
fn nested_seasonality_settings() {
    let config: SeasonalConfig = serde_json::from_str(
        r#"{ "seasonality": { "candidates": [7], "threshold": 0.5 } }"#,
    )
    .unwrap();
    assert_eq!(config.seasonality.candidates, vec![7]);
    assert_eq!(config.min_data_points, 7);
}

#[test]
fn config_round_trips() {
    let config = TrendDecompositionConfig::default().with_variance_shift_ratio(3.0);
    let json = serde_json::to_string(&config).unwrap();
    let back: TrendDecompositionConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn history_accepts_numbers_and_text() {
    let history: HistoricalSeries = serde_json::from_str(
        r#"{ "observations": [
            { "value": 4, "project_name": "atlas", "kpi_group": "deploys" },
            { "value": "5.5", "project_name": "atlas", "kpi_group": "deploys" },
            { "value": 0, "bubble_points": [1, "2", "x"], "project_name": "atlas",
              "kpi_group": "deploys", "recorded_at": "2024-03-04T00:00:00Z" }
        ] }"#,
    )
    .unwrap();
    assert_eq!(extract_values(&history), vec![4.0, 5.5, 1.0, 2.0]);
    assert!(history.latest().unwrap().recorded_at().is_some());
}
