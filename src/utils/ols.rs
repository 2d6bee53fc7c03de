//! Ordinary least squares against a time index.

use crate::error::{ForecastError, Result};

/// Fitted straight line `y = slope * t + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Evaluate the line at index `t`.
    pub fn at(&self, t: f64) -> f64 {
        self.slope * t + self.intercept
    }
}

/// Fit `y = a*t + b` by ordinary least squares with `t = 0..n-1`.
///
/// Uses the closed-form normal equations. Fails with
/// [`ForecastError::NonFiniteParameter`] when the solution is not finite,
/// which is what a single point (zero index variance) produces.
pub fn ols_trend(y: &[f64]) -> Result<LinearFit> {
    let n = y.len();
    if n == 0 {
        return Err(ForecastError::EmptyData);
    }

    let n_f = n as f64;
    let mut sum_t = 0.0;
    let mut sum_y = 0.0;
    let mut sum_tt = 0.0;
    let mut sum_ty = 0.0;
    for (t, &v) in y.iter().enumerate() {
        let t = t as f64;
        sum_t += t;
        sum_y += v;
        sum_tt += t * t;
        sum_ty += t * v;
    }

    let denom = n_f * sum_tt - sum_t * sum_t;
    let slope = (n_f * sum_ty - sum_t * sum_y) / denom;
    let intercept = (sum_y - slope * sum_t) / n_f;

    if !slope.is_finite() {
        return Err(ForecastError::NonFiniteParameter(format!("slope = {slope}")));
    }
    if !intercept.is_finite() {
        return Err(ForecastError::NonFiniteParameter(format!(
            "intercept = {intercept}"
        )));
    }

    Ok(LinearFit { slope, intercept })
}
