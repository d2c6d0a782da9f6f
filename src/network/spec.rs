use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::error::ClassifierError;

/// Describes one layer in a network specification.
///
/// Fields:
/// - `size`       — number of neurons in this layer
/// - `input_size` — output size of the previous layer, or the raw input
///                  dimension for the first layer
/// - `activation` — activation function applied after the linear transform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub size: usize,
    pub input_size: usize,
    pub activation: ActivationFunction,
}

/// Everything needed to configure a [`Network`](crate::network::Network):
/// input width, hidden layer sizes in order, output width, learning rate and
/// the activation (which carries its own derivative).
///
/// Every layer, including the output layer, uses the same activation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub input_size: usize,
    pub hidden_layers: Vec<usize>,
    pub output_size: usize,
    pub learning_rate: f64,
    pub activation: ActivationFunction,
    /// Seed for weight initialisation; `None` draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl NetworkSpec {
    pub fn validate(&self) -> Result<(), ClassifierError> {
        if self.input_size == 0 || self.output_size == 0 {
            return Err(ClassifierError::InvalidSpec(format!(
                "input and output sizes must be non-zero (got {} and {})",
                self.input_size, self.output_size
            )));
        }
        if let Some(pos) = self.hidden_layers.iter().position(|&n| n == 0) {
            return Err(ClassifierError::InvalidSpec(format!(
                "hidden layer {} has zero neurons",
                pos + 1
            )));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(ClassifierError::InvalidSpec(format!(
                "learning rate must be positive and finite, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }

    /// Expands the spec into per-layer (size, input_size) descriptions,
    /// input → output.
    pub fn layer_specs(&self) -> Vec<LayerSpec> {
        let mut specs = Vec::with_capacity(self.hidden_layers.len() + 1);
        let mut input_size = self.input_size;
        for &size in self.hidden_layers.iter().chain(std::iter::once(&self.output_size)) {
            specs.push(LayerSpec { size, input_size, activation: self.activation });
            input_size = size;
        }
        specs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> NetworkSpec {
        NetworkSpec {
            input_size: 784,
            hidden_layers: vec![400, 2000],
            output_size: 10,
            learning_rate: 0.009831415,
            activation: ActivationFunction::Tanh,
            seed: None,
        }
    }

    #[test]
    fn layer_chain() {
        let sizes: Vec<(usize, usize)> = spec()
            .layer_specs()
            .iter()
            .map(|l| (l.input_size, l.size))
            .collect();
        assert_eq!(sizes, vec![(784, 400), (400, 2000), (2000, 10)]);
    }

    #[test]
    fn rejects_bad_values() {
        let mut s = spec();
        s.hidden_layers = vec![400, 0];
        assert!(s.validate().is_err());

        let mut s = spec();
        s.learning_rate = 0.0;
        assert!(s.validate().is_err());

        let mut s = spec();
        s.input_size = 0;
        assert!(s.validate().is_err());

        assert!(spec().validate().is_ok());
    }
}
