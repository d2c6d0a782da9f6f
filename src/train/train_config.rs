use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};

/// Reporting and evaluation cadence for a
/// [`TrainingOrchestrator`](crate::train::TrainingOrchestrator) run.
///
/// # Fields
/// - `report_every`  — iterations per moving-average error report (default 100)
/// - `error_divisor` — the accumulated error is divided by this fixed value when
///                     reported, independent of `report_every` (default 100.0)
/// - `batch_size`    — iterations between qualitative evaluations (default 1000)
/// - `eval_count`    — samples guessed per evaluation (default 10)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub report_every: usize,
    pub error_divisor: f64,
    pub batch_size: usize,
    pub eval_count: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            report_every: 100,
            error_divisor: 100.0,
            batch_size: 1000,
            eval_count: 10,
        }
    }
}

impl TrainConfig {
    pub fn validate(&self) -> Result<()> {
        if self.report_every == 0 {
            return Err(Error::Config("report_every must be at least 1".into()));
        }
        if self.batch_size == 0 {
            return Err(Error::Config("batch_size must be at least 1".into()));
        }
        if !(self.error_divisor.is_finite() && self.error_divisor != 0.0) {
            return Err(Error::Config(format!(
                "error_divisor must be finite and non-zero, got {}",
                self.error_divisor
            )));
        }
        Ok(())
    }
}
