//! Seasonal period detection over a fixed list of candidate periods.

use crate::utils::stats::lagged_correlation;

/// Result of period detection.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalityResult {
    /// Whether a candidate passed the correlation threshold.
    pub detected: bool,
    /// The accepted period, or the configured default when nothing passed.
    pub period: usize,
    /// Lag correlation of the accepted candidate (0.0 when defaulted).
    pub correlation: f64,
    /// Every candidate that was long enough to test, with its correlation.
    pub candidates: Vec<(usize, f64)>,
}

/// Configuration for seasonality detection.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SeasonalityConfig {
    /// Periods tried in order; the first to qualify wins.
    pub candidates: Vec<usize>,
    /// Lag correlation a candidate must exceed.
    pub threshold: f64,
    /// Period used when no candidate qualifies.
    pub default_period: usize,
}

impl Default for SeasonalityConfig {
    fn default() -> Self {
        Self {
            candidates: vec![3, 4, 6, 12],
            threshold: 0.3,
            default_period: 4,
        }
    }
}

impl SeasonalityConfig {
    /// Set the candidate periods.
    pub fn with_candidates(mut self, candidates: Vec<usize>) -> Self {
        self.candidates = candidates;
        self
    }

    /// Set detection threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.clamp(-1.0, 1.0);
        self
    }

    /// Set the fallback period.
    pub fn with_default_period(mut self, period: usize) -> Self {
        self.default_period = period.max(1);
        self
    }
}

/// Detect the seasonal period of a series.
///
/// A candidate `p` qualifies when the series holds at least two full cycles
/// (`n >= 2p`) and the Pearson correlation between `x[i]` and `x[i-p]`
/// exceeds the threshold. Candidates are tested in order and the first
/// qualifying one is returned.
pub fn detect_period(series: &[f64], config: &SeasonalityConfig) -> SeasonalityResult {
    let mut candidates = Vec::new();

    for &period in &config.candidates {
        if period == 0 || series.len() < 2 * period {
            continue;
        }
        let correlation = lagged_correlation(series, period);
        candidates.push((period, correlation));
        if correlation > config.threshold {
            return SeasonalityResult {
                detected: true,
                period,
                correlation,
                candidates,
            };
        }
    }

    SeasonalityResult {
        detected: false,
        period: config.default_period.max(1),
        correlation: 0.0,
        candidates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle(pattern: &[f64], n: usize) -> Vec<f64> {
        (0..n).map(|i| pattern[i % pattern.len()]).collect()
    }

    #[test]
    fn detects_period_three() {
        let series = cycle(&[10.0, 20.0, 30.0], 12);
        let result = detect_period(&series, &SeasonalityConfig::default());
        assert!(result.detected);
        assert_eq!(result.period, 3);
        assert!(result.correlation > 0.99);
    }

    #[test]
    fn detects_period_four_after_rejecting_three() {
        let series = cycle(&[5.0, 1.0, 9.0, 3.0], 16);
        let result = detect_period(&series, &SeasonalityConfig::default());
        assert!(result.detected);
        assert_eq!(result.period, 4);
        assert_eq!(result.candidates[0].0, 3);
        assert!(result.candidates[0].1 <= 0.3);
    }

    #[test]
    fn falls_back_to_default() {
        let series = vec![4.0; 10];
        let result = detect_period(&series, &SeasonalityConfig::default());
        assert!(!result.detected);
        assert_eq!(result.period, 4);
    }

    #[test]
    fn skips_candidates_without_two_cycles() {
        let series = cycle(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 11);
        let config = SeasonalityConfig::default().with_candidates(vec![6, 12]);
        let result = detect_period(&series, &config);
        assert!(!result.detected);
        assert!(result.candidates.is_empty());
    }

    #[test]
    fn custom_default_period() {
        let config = SeasonalityConfig::default()
            .with_candidates(vec![])
            .with_default_period(6);
        assert_eq!(detect_period(&[1.0, 2.0], &config).period, 6);
    }
}
