//! Supervised lookback windows.

/// One training pair: `lookback` consecutive inputs and the value that follows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window<'a> {
    pub inputs: &'a [f64],
    pub target: f64,
}

/// Build `(x[i-L..i], x[i])` pairs for `i = L..n-1`.
///
/// Returns an empty vector when `lookback` is zero or not shorter than the series.
pub fn sliding_windows(series: &[f64], lookback: usize) -> Vec<Window<'_>> {
    if lookback == 0 || series.len() <= lookback {
        return Vec::new();
    }
    (lookback..series.len())
        .map(|i| Window {
            inputs: &series[i - lookback..i],
            target: series[i],
        })
        .collect()
}

/// The last `lookback` values, used as the prediction input.
pub fn latest_window(series: &[f64], lookback: usize) -> Option<&[f64]> {
    if lookback == 0 || series.len() < lookback {
        return None;
    }
    Some(&series[series.len() - lookback..])
}
