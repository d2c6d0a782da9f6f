use serde::{Serialize, Deserialize};

/// Moving-average error emitted every `report_every` iterations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    /// Iteration at which the report was taken.
    pub iteration: usize,
    /// Accumulated error since the previous report divided by `error_divisor`.
    pub average_error: f64,
}

/// One classifier prediction made during a qualitative evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guess {
    /// Dataset index of the sample.
    pub index: usize,
    pub predicted: usize,
    /// Label stored in the dataset for this sample.
    pub expected: u8,
    /// Raw classifier scores, one per class.
    pub output: Vec<f64>,
}

impl Guess {
    pub fn is_correct(&self) -> bool {
        self.predicted == self.expected as usize
    }
}

/// Result of a `test_guess` pass over consecutive samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Iteration the evaluation started from (before the modulo).
    pub start: usize,
    pub guesses: Vec<Guess>,
}

impl Evaluation {
    pub fn correct(&self) -> usize {
        self.guesses.iter().filter(|g| g.is_correct()).count()
    }

    /// Fraction of correct guesses in [0, 1]; `0.0` for an empty evaluation.
    pub fn accuracy(&self) -> f64 {
        if self.guesses.is_empty() {
            return 0.0;
        }
        self.correct() as f64 / self.guesses.len() as f64
    }
}

/// Sent over the orchestrator's progress channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TrainingEvent {
    Progress(ProgressReport),
    Evaluation(Evaluation),
}

/// Totals returned by `TrainingOrchestrator::run`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Number of training steps performed (`iterations - 1`, index 0 is never used).
    pub iterations_run: usize,
    pub reports: usize,
    pub evaluations: usize,
    pub last_average_error: Option<f64>,
}
