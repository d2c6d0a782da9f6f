use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use rand::{rngs::StdRng, SeedableRng};
use serde::{Serialize, Deserialize};

use crate::error::{ClassifierError, Error, Result};
use crate::layers::dense::{Layer, LayerOutput};
use crate::loss::mse::MseLoss;
use crate::network::spec::NetworkSpec;
use crate::optim::sgd::Sgd;
use crate::train::classifier::Classifier;

/// Dense multi-layer perceptron trained one sample at a time with SGD on
/// MSE loss.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    pub layers: Vec<Layer>,
    pub optimizer: Sgd,
}

impl Network {
    /// Builds a freshly initialised network from `spec`.
    pub fn configure(spec: &NetworkSpec) -> std::result::Result<Network, ClassifierError> {
        spec.validate()?;

        let mut rng = match spec.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let layers = spec.layer_specs().into_iter()
            .map(|l| Layer::new(l.size, l.input_size, l.activation, &mut rng))
            .collect();

        Ok(Network { layers, optimizer: Sgd::new(spec.learning_rate) })
    }

    fn check_input(&self, input: &[f64]) -> std::result::Result<(), ClassifierError> {
        let expected = self.input_size();
        if input.len() != expected {
            return Err(ClassifierError::ShapeMismatch { expected, got: input.len() });
        }
        Ok(())
    }

    /// Forward pass without touching any state.
    pub fn forward(&self, input: &[f64]) -> Vec<f64> {
        self.layers.iter().fold(input.to_vec(), |current, layer| layer.feed(&current).activation)
    }

    /// One forward + backward pass and SGD update. Returns the sample's MSE.
    pub fn train_sample(
        &mut self,
        input: &[f64],
        expected: &[f64],
    ) -> std::result::Result<f64, ClassifierError> {
        self.check_input(input)?;
        if expected.len() != self.output_size() {
            return Err(ClassifierError::ShapeMismatch {
                expected: self.output_size(),
                got: expected.len(),
            });
        }

        // ── Forward, keeping each layer's input and output ─────────────────
        let mut inputs: Vec<Vec<f64>> = Vec::with_capacity(self.layers.len());
        let mut outputs: Vec<LayerOutput> = Vec::with_capacity(self.layers.len());
        let mut current = input.to_vec();
        for layer in &self.layers {
            let out = layer.feed(&current);
            inputs.push(current);
            current = out.activation.clone();
            outputs.push(out);
        }

        let loss = MseLoss::loss(&current, expected);
        let mut upstream = MseLoss::derivative(&current, expected);

        // ── Backward ───────────────────────────────────────────────────────
        // The delta for layer i-1 must be taken before layer i's weights move.
        for i in (0..self.layers.len()).rev() {
            let delta = self.layers[i].compute_delta(&upstream, &outputs[i].pre_activation);
            if i > 0 {
                upstream = self.layers[i].backpropagate(&delta);
            }
            self.optimizer.step(&mut self.layers[i], &inputs[i], &delta);
        }

        Ok(loss)
    }

    /// Writes the network (weights and learning rate) as pretty-printed JSON.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Reads a network previously written by `save_json`.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Network> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

impl Classifier for Network {
    fn input_size(&self) -> usize {
        self.layers.first().map(|l| l.input_size()).unwrap_or(0)
    }

    fn output_size(&self) -> usize {
        self.layers.last().map(|l| l.size).unwrap_or(0)
    }

    fn train(&mut self, features: &[f64], target: &[f64]) -> std::result::Result<f64, ClassifierError> {
        self.train_sample(features, target)
    }

    fn guess(&self, features: &[f64]) -> std::result::Result<Vec<f64>, ClassifierError> {
        self.check_input(features)?;
        Ok(self.forward(features))
    }
}
