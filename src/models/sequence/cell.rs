//! Gated recurrent cell with value-type parameters and state.
//!
//! For hidden unit `i`, with `hc = W_h[i]·h` and `xi = W_x[i]·x`:
//!
//! ```text
//! input     = σ(xi + hc + b[i])
//! forget    = σ(xi + 0.5·hc + 0.5·b[i])
//! output    = σ(xi + 0.8·hc + 0.8·b[i])
//! candidate = tanh(xi + 0.3·hc)
//! c'[i] = forget·c[i] + input·candidate
//! h'[i] = output·tanh(c'[i])
//! ```
//!
//! The three gates share one weight set and differ only by how strongly the
//! recurrent term and bias enter them.

use rand::Rng;

const FORGET_SCALE: f64 = 0.5;
const OUTPUT_SCALE: f64 = 0.8;
const CANDIDATE_SCALE: f64 = 0.3;
/// Input-weight updates are damped relative to bias updates.
const INPUT_UPDATE_SCALE: f64 = 0.1;

/// Logistic function with its argument clamped to `[-500, 500]`.
pub fn sigmoid(x: f64) -> f64 {
    let x = x.clamp(-500.0, 500.0);
    1.0 / (1.0 + (-x).exp())
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Hidden and cell state after some number of timesteps.
#[derive(Debug, Clone, PartialEq)]
pub struct CellState {
    pub hidden: Vec<f64>,
    pub cell: Vec<f64>,
}

impl CellState {
    pub fn zeros(hidden_size: usize) -> Self {
        Self {
            hidden: vec![0.0; hidden_size],
            cell: vec![0.0; hidden_size],
        }
    }

    /// `σ(mean(hidden))`, the cell's scalar read-out.
    pub fn readout(&self) -> f64 {
        if self.hidden.is_empty() {
            return sigmoid(0.0);
        }
        sigmoid(self.hidden.iter().sum::<f64>() / self.hidden.len() as f64)
    }
}

/// Trainable parameters of the cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellParams {
    /// `hidden_size × input_size`
    input_weights: Vec<Vec<f64>>,
    /// `hidden_size × hidden_size`
    hidden_weights: Vec<Vec<f64>>,
    bias: Vec<f64>,
}

impl CellParams {
    /// Draw weights uniformly from `[-scale, scale]`; biases start at zero.
    pub fn random<R: Rng>(
        hidden_size: usize,
        input_size: usize,
        scale: f64,
        rng: &mut R,
    ) -> Self {
        let mut draw = |len: usize| -> Vec<f64> {
            (0..len).map(|_| rng.gen_range(-scale..=scale)).collect()
        };
        let input_weights = (0..hidden_size).map(|_| draw(input_size)).collect();
        let hidden_weights = (0..hidden_size).map(|_| draw(hidden_size)).collect();
        Self {
            input_weights,
            hidden_weights,
            bias: vec![0.0; hidden_size],
        }
    }

    pub fn hidden_size(&self) -> usize {
        self.bias.len()
    }

    pub fn bias(&self) -> &[f64] {
        &self.bias
    }

    pub fn input_weights(&self) -> &[Vec<f64>] {
        &self.input_weights
    }

    /// Advance one timestep.
    pub fn step(&self, state: &CellState, input: &[f64]) -> CellState {
        let h = self.hidden_size();
        let mut hidden = Vec::with_capacity(h);
        let mut cell = Vec::with_capacity(h);

        for i in 0..h {
            let xi = dot(&self.input_weights[i], input);
            let hc = dot(&self.hidden_weights[i], &state.hidden);
            let b = self.bias[i];

            let input_gate = sigmoid(xi + hc + b);
            let forget_gate = sigmoid(xi + FORGET_SCALE * hc + FORGET_SCALE * b);
            let output_gate = sigmoid(xi + OUTPUT_SCALE * hc + OUTPUT_SCALE * b);
            let candidate = (xi + CANDIDATE_SCALE * hc).tanh();

            let c = forget_gate * state.cell[i] + input_gate * candidate;
            cell.push(c);
            hidden.push(output_gate * c.tanh());
        }

        CellState { hidden, cell }
    }

    /// Fold a window of scalar inputs through the cell from a zero state.
    pub fn run(&self, window: &[f64]) -> CellState {
        window
            .iter()
            .fold(CellState::zeros(self.hidden_size()), |state, &x| {
                self.step(&state, &[x])
            })
    }

    /// Scalar prediction for a window.
    pub fn predict(&self, window: &[f64]) -> f64 {
        self.run(window).readout()
    }

    /// Parameters after one gradient-style update.
    ///
    /// `bias[i] += lr·error·h[i]` and `W_x[i][j] += lr·error·x[j]·0.1`, where
    /// `h` is the final hidden state and `x` the last input of the window.
    pub fn updated(&self, error: f64, learning_rate: f64, hidden: &[f64], last_input: &[f64]) -> Self {
        let step = learning_rate * error;
        let bias = self
            .bias
            .iter()
            .zip(hidden)
            .map(|(b, h)| b + step * h)
            .collect();
        let input_weights = self
            .input_weights
            .iter()
            .map(|row| {
                row.iter()
                    .zip(last_input)
                    .map(|(w, x)| w + step * x * INPUT_UPDATE_SCALE)
                    .collect()
            })
            .collect();
        Self {
            input_weights,
            hidden_weights: self.hidden_weights.clone(),
            bias,
        }
    }
}
