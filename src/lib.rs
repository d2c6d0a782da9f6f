pub mod error;
pub mod data;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;
pub mod render;
pub mod config;

// Convenience re-exports
pub use error::{Error, Result, FormatError, IndexError, EncodingError, ClassifierError};
pub use data::{ImageDataset, LabelDataset, SampleEncoder, RawBuffer, read_buffer};
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use network::{Network, NetworkSpec};
pub use loss::mse::MseLoss;
pub use optim::sgd::Sgd;
pub use train::{Classifier, TrainConfig, TrainingOrchestrator, TrainingEvent, argmax};
pub use config::{AppConfig, NetworkConfig};
