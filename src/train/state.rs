/// Mutable counters of a training run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingState {
    /// Error accumulated since the last report.
    pub running_error: f64,
    /// Index of the iteration currently being processed.
    pub iteration: usize,
}

impl TrainingState {
    pub fn new() -> Self {
        TrainingState::default()
    }

    pub fn record(&mut self, iteration: usize, error: f64) {
        self.iteration = iteration;
        self.running_error += error;
    }

    /// Returns the accumulated error divided by `divisor` and resets it.
    pub fn take_average(&mut self, divisor: f64) -> f64 {
        let average = self.running_error / divisor;
        self.running_error = 0.0;
        average
    }
}
