//! Statistical utility functions.

/// Values below this magnitude are treated as zero in guarded divisions.
pub const NEAR_ZERO: f64 = 1e-10;

/// Calculate the mean of a slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Calculate the variance of a slice (sample variance with n-1 denominator).
pub fn variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|x| (x - m).powi(2)).sum();
    sum_sq / (values.len() - 1) as f64
}

/// Population variance (n denominator). Zero for fewer than two values.
pub fn population_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Calculate the standard deviation of a slice.
pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Coefficient of variation (population std dev / mean).
///
/// Returns `None` when the mean is zero or the slice is empty, since the ratio
/// is undefined there.
pub fn coefficient_of_variation(values: &[f64]) -> Option<f64> {
    let m = mean(values);
    if !m.is_finite() || m.abs() < NEAR_ZERO {
        return None;
    }
    Some(population_variance(values).sqrt() / m.abs())
}

/// Pearson correlation between two equally long slices.
///
/// Returns 0.0 when either side has no variance or the lengths differ.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.len() < 2 {
        return 0.0;
    }
    let mx = mean(x);
    let my = mean(y);

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mx;
        let dy = b - my;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom < NEAR_ZERO {
        return 0.0;
    }
    cov / denom
}

/// Pearson correlation between `x[lag..]` and `x[..n-lag]`.
pub fn lagged_correlation(values: &[f64], lag: usize) -> f64 {
    if lag == 0 || values.len() <= lag {
        return 0.0;
    }
    pearson_correlation(&values[lag..], &values[..values.len() - lag])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mean_calculates_correctly() {
        assert_relative_eq!(mean(&[1.0, 2.0, 3.0, 4.0, 5.0]), 3.0, epsilon = 1e-10);
        assert_relative_eq!(mean(&[10.0]), 10.0, epsilon = 1e-10);
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn variance_calculates_correctly() {
        // Sample variance of [1, 2, 3, 4, 5] = 2.5
        assert_relative_eq!(variance(&[1.0, 2.0, 3.0, 4.0, 5.0]), 2.5, epsilon = 1e-10);
        assert!(variance(&[1.0]).is_nan());
        assert_relative_eq!(
            population_variance(&[1.0, 2.0, 3.0, 4.0, 5.0]),
            2.0,
            epsilon = 1e-10
        );
        assert_eq!(population_variance(&[7.0]), 0.0);
    }

    #[test]
    fn std_dev_calculates_correctly() {
        assert_relative_eq!(
            std_dev(&[1.0, 2.0, 3.0, 4.0, 5.0]),
            2.5_f64.sqrt(),
            epsilon = 1e-10
        );
    }

    #[test]
    fn coefficient_of_variation_known_values() {
        // population std of [2, 4] is 1, mean 3
        assert_relative_eq!(
            coefficient_of_variation(&[2.0, 4.0]).unwrap(),
            1.0 / 3.0,
            epsilon = 1e-10
        );
        assert_eq!(coefficient_of_variation(&[10.0, 10.0, 10.0]), Some(0.0));
        assert!(coefficient_of_variation(&[0.0, 0.0]).is_none());
        assert!(coefficient_of_variation(&[]).is_none());
    }

    #[test]
    fn pearson_perfect_and_inverse() {
        let x = [1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(pearson_correlation(&x, &[2.0, 4.0, 6.0, 8.0]), 1.0, epsilon = 1e-10);
        assert_relative_eq!(pearson_correlation(&x, &[8.0, 6.0, 4.0, 2.0]), -1.0, epsilon = 1e-10);
        assert_eq!(pearson_correlation(&x, &[5.0, 5.0, 5.0, 5.0]), 0.0);
        assert_eq!(pearson_correlation(&x, &[1.0]), 0.0);
    }

    #[test]
    fn lagged_correlation_detects_cycle() {
        let values: Vec<f64> = (0..12).map(|i| [1.0, 5.0, 9.0][i % 3]).collect();
        assert_relative_eq!(lagged_correlation(&values, 3), 1.0, epsilon = 1e-10);
        assert!(lagged_correlation(&values, 1) < 0.0);
        assert_eq!(lagged_correlation(&values, 0), 0.0);
        assert_eq!(lagged_correlation(&values, 12), 0.0);
    }
}
