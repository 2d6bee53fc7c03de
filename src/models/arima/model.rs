//! ARMA(p, q) with intercept, fitted by conditional sum of squares.

use crate::error::{ForecastError, Result};
use crate::utils::optimization::{minimize, SimplexConfig};

/// ARMA order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmaOrder {
    /// AR order (p)
    pub p: usize,
    /// MA order (q)
    pub q: usize,
}

impl ArmaOrder {
    pub fn new(p: usize, q: usize) -> Self {
        Self { p, q }
    }

    /// Order used for short KPI series: `p = 2` above 8 points, `q = 1` above 4.
    pub fn for_length(n: usize) -> Self {
        Self {
            p: if n > 8 { 2 } else { 1 },
            q: if n > 4 { 1 } else { 0 },
        }
    }

    /// Number of ARMA coefficients (the intercept is not counted).
    pub fn coefficient_count(&self) -> usize {
        self.p + self.q
    }
}

/// Fitted ARMA model.
///
/// Prediction at `t` is
/// `μ + Σ φ_i (x_{t-1-i} - μ) + Σ θ_j e_{t-1-j}`
/// with in-sample innovations `e` and future innovations set to zero.
#[derive(Debug, Clone)]
pub struct ArmaModel {
    order: ArmaOrder,
    intercept: f64,
    ar: Vec<f64>,
    ma: Vec<f64>,
    residuals: Vec<f64>,
    css: f64,
}

/// One-step predictions and residuals for given parameters.
fn residuals_for(series: &[f64], order: ArmaOrder, intercept: f64, ar: &[f64], ma: &[f64]) -> Vec<f64> {
    let start = order.p.max(order.q);
    let mut residuals = vec![0.0; series.len()];
    for t in start..series.len() {
        let pred = one_step(series, &residuals, t, intercept, ar, ma);
        residuals[t] = series[t] - pred;
    }
    residuals
}

fn one_step(series: &[f64], residuals: &[f64], t: usize, intercept: f64, ar: &[f64], ma: &[f64]) -> f64 {
    let ar_part: f64 = ar
        .iter()
        .enumerate()
        .filter(|(i, _)| t > *i)
        .map(|(i, phi)| phi * (series[t - 1 - i] - intercept))
        .sum();
    let ma_part: f64 = ma
        .iter()
        .enumerate()
        .filter(|(j, _)| t > *j)
        .map(|(j, theta)| theta * residuals[t - 1 - j])
        .sum();
    intercept + ar_part + ma_part
}

fn sum_of_squares(residuals: &[f64], start: usize) -> f64 {
    residuals[start..].iter().map(|e| e * e).sum()
}

impl ArmaModel {
    /// Fit the model to a (possibly differenced) series.
    ///
    /// Fails when the series does not leave any degrees of freedom for the
    /// requested order, or when the optimiser ends on non-finite parameters.
    pub fn fit(series: &[f64], order: ArmaOrder, config: &SimplexConfig) -> Result<Self> {
        let n = series.len();
        if n == 0 {
            return Err(ForecastError::EmptyData);
        }
        if order.coefficient_count() >= n {
            return Err(ForecastError::InsufficientDegreesOfFreedom {
                params: order.coefficient_count(),
                observations: n,
            });
        }

        let (p, q) = (order.p, order.q);
        let start = p.max(q);
        let mean = series.iter().sum::<f64>() / n as f64;

        let (intercept, ar, ma) = if p == 0 && q == 0 {
            (mean, Vec::new(), Vec::new())
        } else {
            let mut initial = Vec::with_capacity(1 + p + q);
            initial.push(mean);
            initial.extend((0..p).map(|i| 0.1 / (i + 1) as f64));
            initial.extend((0..q).map(|j| 0.1 / (j + 1) as f64));

            let mut bounds = vec![(f64::NEG_INFINITY, f64::INFINITY)];
            bounds.extend(std::iter::repeat((-0.99, 0.99)).take(p + q));

            let result = minimize(
                |params| {
                    let residuals =
                        residuals_for(series, order, params[0], &params[1..1 + p], &params[1 + p..]);
                    sum_of_squares(&residuals, start)
                },
                &initial,
                Some(&bounds),
                config,
            );
            let point = result.point;
            (point[0], point[1..1 + p].to_vec(), point[1 + p..].to_vec())
        };

        if !intercept.is_finite() || ar.iter().chain(&ma).any(|c| !c.is_finite()) {
            return Err(ForecastError::NonFiniteParameter(
                "ARMA coefficients".to_string(),
            ));
        }

        let residuals = residuals_for(series, order, intercept, &ar, &ma);
        let css = sum_of_squares(&residuals, start);

        Ok(Self {
            order,
            intercept,
            ar,
            ma,
            residuals,
            css,
        })
    }

    /// Forecast the value following the fitted series.
    pub fn forecast_next(&self, series: &[f64]) -> f64 {
        let t = series.len();
        let mut extended = series.to_vec();
        extended.push(0.0);
        let mut residuals = self.residuals.clone();
        residuals.push(0.0);
        one_step(&extended, &residuals, t, self.intercept, &self.ar, &self.ma)
    }

    pub fn order(&self) -> ArmaOrder {
        self.order
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn ar_coefficients(&self) -> &[f64] {
        &self.ar
    }

    pub fn ma_coefficients(&self) -> &[f64] {
        &self.ma
    }

    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// Conditional sum of squares at the fitted parameters.
    pub fn css(&self) -> f64 {
        self.css
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn order_for_length() {
        assert_eq!(ArmaOrder::for_length(4), ArmaOrder::new(1, 0));
        assert_eq!(ArmaOrder::for_length(5), ArmaOrder::new(1, 1));
        assert_eq!(ArmaOrder::for_length(9), ArmaOrder::new(2, 1));
    }

    #[test]
    fn constant_increments_forecast_exactly() {
        let diffs = [5.0, 5.0, 5.0, 5.0];
        let model = ArmaModel::fit(&diffs, ArmaOrder::new(1, 0), &SimplexConfig::default()).unwrap();
        assert_relative_eq!(model.intercept(), 5.0, epsilon = 1e-9);
        assert_relative_eq!(model.forecast_next(&diffs), 5.0, epsilon = 1e-9);
        assert_relative_eq!(model.css(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn ar1_process_is_recovered() {
        let mut values = vec![10.0];
        for i in 1..60 {
            values.push(0.7 * values[i - 1] + (i as f64 * 0.9).sin());
        }
        let model = ArmaModel::fit(&values, ArmaOrder::new(1, 0), &SimplexConfig::default()).unwrap();
        assert!(model.ar_coefficients()[0] > 0.3);
        assert!(model.forecast_next(&values).is_finite());
    }

    #[test]
    fn coefficients_stay_in_bounds() {
        let values: Vec<f64> = (0..20).map(|i| 10.0 + (i as f64 * 0.4).sin()).collect();
        let model = ArmaModel::fit(&values, ArmaOrder::new(2, 1), &SimplexConfig::default()).unwrap();
        for c in model.ar_coefficients().iter().chain(model.ma_coefficients()) {
            assert!(c.abs() <= 0.99);
        }
        assert_eq!(model.residuals().len(), values.len());
    }

    #[test]
    fn rejects_too_few_degrees_of_freedom() {
        let err = ArmaModel::fit(&[1.0, 2.0], ArmaOrder::new(1, 1), &SimplexConfig::default()).unwrap_err();
        assert_eq!(
            err,
            ForecastError::InsufficientDegreesOfFreedom {
                params: 2,
                observations: 2
            }
        );
    }

    #[test]
    fn white_noise_order_is_mean() {
        let model = ArmaModel::fit(&[1.0, 3.0, 2.0], ArmaOrder::new(0, 0), &SimplexConfig::default()).unwrap();
        assert_relative_eq!(model.forecast_next(&[1.0, 3.0, 2.0]), 2.0, epsilon = 1e-12);
    }
}
