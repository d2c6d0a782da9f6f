pub mod classifier;
pub mod train_config;
pub mod state;
pub mod report;
pub mod orchestrator;

pub use classifier::Classifier;
pub use train_config::TrainConfig;
pub use state::TrainingState;
pub use report::{Evaluation, Guess, ProgressReport, RunSummary, TrainingEvent};
pub use orchestrator::{argmax, TrainingOrchestrator};
