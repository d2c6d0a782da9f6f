use serde::{Serialize, Deserialize};

use crate::layers::dense::Layer;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies one SGD weight update to a layer given its input and delta.
    pub fn step(&self, layer: &mut Layer, input: &[f64], delta: &[f64]) {
        layer.apply_gradients(input, delta, self.learning_rate);
    }
}
