use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::{math::matrix::Matrix, activation::activation::ActivationFunction};

/// Values produced by one layer during a forward pass.
#[derive(Debug, Clone)]
pub struct LayerOutput {
    /// Pre-activation `z = xW + b`, needed for the derivative.
    pub pre_activation: Vec<f64>,
    pub activation: Vec<f64>,
}

/// Fully connected layer. `weights` is `input_size x size`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    pub size: usize,
    pub weights: Matrix,
    pub biases: Vec<f64>,
    pub activator: ActivationFunction,
}

impl Layer {
    pub fn new<R: Rng>(
        size: usize,
        input_size: usize,
        activation: ActivationFunction,
        rng: &mut R,
    ) -> Layer {
        let weights = if activation.prefers_he_init() {
            Matrix::he(input_size, size, rng)
        } else {
            Matrix::xavier(input_size, size, rng)
        };

        Layer {
            size,
            weights,
            biases: vec![0.0; size],
            activator: activation,
        }
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    pub fn feed(&self, input: &[f64]) -> LayerOutput {
        let mut z = self.weights.vec_mul(input);
        for (zi, b) in z.iter_mut().zip(&self.biases) {
            *zi += b;
        }
        let a = z.iter().map(|&x| self.activator.function(x)).collect();
        LayerOutput { pre_activation: z, activation: a }
    }

    /// δ = upstream ⊙ σ'(z), where `upstream` is ∂L/∂a for this layer.
    pub fn compute_delta(&self, upstream: &[f64], pre_activation: &[f64]) -> Vec<f64> {
        upstream
            .iter()
            .zip(pre_activation)
            .map(|(g, &z)| g * self.activator.derivative(z))
            .collect()
    }

    /// ∂L/∂a of the previous layer: `W δ`.
    pub fn backpropagate(&self, delta: &[f64]) -> Vec<f64> {
        self.weights.mul_vec(delta)
    }

    /// Applies `W -= lr · xᵀδ` and `b -= lr · δ`.
    pub fn apply_gradients(&mut self, input: &[f64], delta: &[f64], lr: f64) {
        self.weights.add_outer_scaled(input, delta, -lr);
        for (b, d) in self.biases.iter_mut().zip(delta) {
            *b -= lr * d;
        }
    }
}
