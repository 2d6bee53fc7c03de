//! Bounded Nelder-Mead simplex minimisation for small parameter vectors.

use std::cmp::Ordering;

/// Configuration for the simplex search.
#[derive(Debug, Clone)]
pub struct SimplexConfig {
    /// Maximum number of iterations.
    pub max_iter: usize,
    /// Stop once the spread of objective values falls below this.
    pub tolerance: f64,
    /// Reflection coefficient.
    pub reflection: f64,
    /// Expansion coefficient.
    pub expansion: f64,
    /// Contraction coefficient.
    pub contraction: f64,
    /// Shrink coefficient.
    pub shrink: f64,
    /// Initial step used to build the simplex.
    pub initial_step: f64,
}

impl Default for SimplexConfig {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            tolerance: 1e-8,
            reflection: 1.0,
            expansion: 2.0,
            contraction: 0.5,
            shrink: 0.5,
            initial_step: 0.05,
        }
    }
}

impl SimplexConfig {
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

/// Outcome of a simplex search.
#[derive(Debug, Clone)]
pub struct SimplexResult {
    pub point: Vec<f64>,
    pub value: f64,
    pub iterations: usize,
    pub converged: bool,
}

#[derive(Debug, Clone)]
struct Vertex {
    point: Vec<f64>,
    value: f64,
}

/// Clamp each coordinate into its `(lo, hi)` bound, where one is given.
fn clamp_to(point: Vec<f64>, bounds: Option<&[(f64, f64)]>) -> Vec<f64> {
    let Some(bounds) = bounds else {
        return point;
    };
    point
        .into_iter()
        .enumerate()
        .map(|(i, x)| match bounds.get(i) {
            Some(&(lo, hi)) => x.clamp(lo, hi),
            None => x,
        })
        .collect()
}

/// `from + coef * (towards - from)` coordinate-wise.
fn lerp(from: &[f64], towards: &[f64], coef: f64) -> Vec<f64> {
    from.iter()
        .zip(towards)
        .map(|(f, t)| f + coef * (t - f))
        .collect()
}

fn by_value(a: &Vertex, b: &Vertex) -> Ordering {
    a.value.partial_cmp(&b.value).unwrap_or(Ordering::Equal)
}

/// Minimise `objective` starting from `initial`.
///
/// Non-finite objective values are treated as `f64::MAX` so a diverging
/// candidate never wins. Bounds, when given, are enforced on every vertex.
pub fn minimize<F>(
    objective: F,
    initial: &[f64],
    bounds: Option<&[(f64, f64)]>,
    config: &SimplexConfig,
) -> SimplexResult
where
    F: Fn(&[f64]) -> f64,
{
    let dim = initial.len();
    if dim == 0 {
        return SimplexResult {
            point: Vec::new(),
            value: f64::NAN,
            iterations: 0,
            converged: false,
        };
    }

    let eval = |point: Vec<f64>| {
        let point = clamp_to(point, bounds);
        let value = objective(&point);
        Vertex {
            point,
            value: if value.is_finite() { value } else { f64::MAX },
        }
    };

    let mut simplex: Vec<Vertex> = Vec::with_capacity(dim + 1);
    simplex.push(eval(initial.to_vec()));
    for i in 0..dim {
        let mut point = initial.to_vec();
        point[i] += if initial[i].abs() > 1e-10 {
            config.initial_step * initial[i].abs()
        } else {
            config.initial_step
        };
        simplex.push(eval(point));
    }

    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iter {
        iterations += 1;
        simplex.sort_by(by_value);

        let best = simplex[0].value;
        let worst = simplex[dim].value;
        if (worst - best).abs() < config.tolerance {
            converged = true;
            break;
        }

        let mut centroid = vec![0.0; dim];
        for vertex in &simplex[..dim] {
            for (c, x) in centroid.iter_mut().zip(&vertex.point) {
                *c += x / dim as f64;
            }
        }

        let reflected = eval(lerp(&centroid, &simplex[dim].point, -config.reflection));

        if reflected.value < best {
            let expanded = eval(lerp(&centroid, &reflected.point, config.expansion));
            simplex[dim] = if expanded.value < reflected.value {
                expanded
            } else {
                reflected
            };
            continue;
        }

        if reflected.value < simplex[dim - 1].value {
            simplex[dim] = reflected;
            continue;
        }

        let (target, threshold) = if reflected.value < worst {
            (&reflected.point, reflected.value)
        } else {
            (&simplex[dim].point, worst)
        };
        let contracted = eval(lerp(&centroid, target, config.contraction));
        if contracted.value < threshold {
            simplex[dim] = contracted;
            continue;
        }

        let anchor = simplex[0].point.clone();
        for vertex in simplex.iter_mut().skip(1) {
            *vertex = eval(lerp(&anchor, &vertex.point, config.shrink));
        }
    }

    simplex.sort_by(by_value);
    let best = simplex.swap_remove(0);
    SimplexResult {
        point: best.point,
        value: best.value,
        iterations,
        converged,
    }
}
