use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{Error, Result};
use crate::network::spec::NetworkSpec;
use crate::train::train_config::TrainConfig;

/// Hidden topology and optimisation settings. Input and output widths come
/// from the dataset, see [`NetworkConfig::to_spec`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub hidden_layers: Vec<usize>,
    pub learning_rate: f64,
    pub activation: ActivationFunction,
    pub seed: Option<u64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            hidden_layers: vec![400, 2000],
            learning_rate: 0.009831415,
            activation: ActivationFunction::Tanh,
            seed: None,
        }
    }
}

impl NetworkConfig {
    pub fn to_spec(&self, input_size: usize, output_size: usize) -> NetworkSpec {
        NetworkSpec {
            input_size,
            hidden_layers: self.hidden_layers.clone(),
            output_size,
            learning_rate: self.learning_rate,
            activation: self.activation,
            seed: self.seed,
        }
    }
}

/// Settings for one run of the `ferrite-mnist` binary.
///
/// Every field has a default, so a config file only needs the values it
/// changes:
///
/// ```json
/// { "iterations": 20000, "network": { "hidden_layers": [64], "seed": 7 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub train_images: PathBuf,
    pub train_labels: PathBuf,
    /// Iteration budget passed to `TrainingOrchestrator::run`.
    pub iterations: usize,
    /// Samples guessed after training finishes.
    pub final_eval_count: usize,
    pub final_eval_start: usize,
    pub network: NetworkConfig,
    pub training: TrainConfig,
    /// Where to write the trained network as JSON, if anywhere.
    pub model_out: Option<PathBuf>,
    /// Directory for PNG snapshots of the final evaluation's samples.
    pub snapshot_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            train_images: PathBuf::from("train-images.idx3-ubyte"),
            train_labels: PathBuf::from("train-labels.idx1-ubyte"),
            iterations: 10_000_000,
            final_eval_count: 200,
            final_eval_start: 1000,
            network: NetworkConfig::default(),
            training: TrainConfig::default(),
            model_out: None,
            snapshot_dir: None,
        }
    }
}

impl AppConfig {
    /// Reads a JSON config file; missing fields take their defaults.
    pub fn load_json(path: impl AsRef<Path>) -> Result<AppConfig> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig = serde_json::from_reader(std::io::BufReader::new(file))?;
        config.training.validate()?;
        Ok(config)
    }
}
