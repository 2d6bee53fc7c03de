//! Differencing and the variance-shift stationarity heuristic.

use crate::utils::stats::{population_variance, NEAR_ZERO};

/// Apply differencing `d` times.
pub fn difference(series: &[f64], d: usize) -> Vec<f64> {
    let mut result = series.to_vec();
    for _ in 0..d {
        if result.len() <= 1 {
            break;
        }
        result = result.windows(2).map(|w| w[1] - w[0]).collect();
    }
    result
}

/// Undo a single order of differencing for a one-step forecast.
pub fn integrate_step(last_observed: f64, forecast_delta: f64) -> f64 {
    last_observed + forecast_delta
}

/// Variances of the two halves of a series and the resulting verdict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarianceShift {
    pub first_half: f64,
    pub second_half: f64,
    pub non_stationary: bool,
}

/// Compare the variance of `x[..n/2]` against `x[n/2..]`.
///
/// The series is classified non-stationary when exactly one half is flat
/// while the other is not, or when the larger variance is at least `ratio`
/// times the smaller one. Two flat halves are stationary.
pub fn variance_shift(series: &[f64], ratio: f64) -> VarianceShift {
    let mid = series.len() / 2;
    let first_half = population_variance(&series[..mid]);
    let second_half = population_variance(&series[mid..]);

    let first_flat = first_half < NEAR_ZERO;
    let second_flat = second_half < NEAR_ZERO;

    let non_stationary = match (first_flat, second_flat) {
        (true, true) => false,
        (true, false) | (false, true) => true,
        (false, false) => first_half.max(second_half) >= ratio * first_half.min(second_half),
    };

    VarianceShift {
        first_half,
        second_half,
        non_stationary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn difference_orders() {
        let series = vec![1.0, 3.0, 6.0, 10.0, 15.0];
        assert_eq!(difference(&series, 0), series);
        assert_eq!(difference(&series, 1), vec![2.0, 3.0, 4.0, 5.0]);
        assert_eq!(difference(&series, 2), vec![1.0, 1.0, 1.0]);
        assert!(difference(&[], 1).is_empty());
    }

    #[test]
    fn integrate_continues_from_last_value() {
        assert_relative_eq!(integrate_step(24.0, 6.0), 30.0, epsilon = 1e-12);
    }

    #[test]
    fn linear_trend_is_non_stationary() {
        // halves [100, 105] and [110, 115, 120]: 6.25 vs 16.67
        let shift = variance_shift(&[100.0, 105.0, 110.0, 115.0, 120.0], 2.0);
        assert!(shift.non_stationary);
    }

    #[test]
    fn flat_series_is_stationary() {
        let shift = variance_shift(&[5.0; 8], 2.0);
        assert!(!shift.non_stationary);
        assert_eq!(shift.first_half, 0.0);
    }

    #[test]
    fn one_flat_half_is_non_stationary() {
        let shift = variance_shift(&[5.0, 5.0, 5.0, 1.0, 9.0, 3.0], 2.0);
        assert!(shift.non_stationary);
    }

    #[test]
    fn similar_spread_is_stationary() {
        let shift = variance_shift(&[10.0, 12.0, 9.0, 11.0, 10.0, 12.0, 9.0, 11.0], 2.0);
        assert!(!shift.non_stationary);
    }
}
