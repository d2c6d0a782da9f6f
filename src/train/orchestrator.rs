use std::sync::mpsc;

use crate::data::encoder::{SampleEncoder, NUM_CLASSES};
use crate::data::images::ImageDataset;
use crate::data::labels::LabelDataset;
use crate::error::{ClassifierError, Error, Result};
use crate::render::ascii::render_features;
use crate::train::classifier::Classifier;
use crate::train::report::{Evaluation, Guess, ProgressReport, RunSummary, TrainingEvent};
use crate::train::state::TrainingState;
use crate::train::train_config::TrainConfig;

/// Cycles through a decoded image/label pair, training a classifier one
/// sample at a time and periodically reporting error and sample guesses.
///
/// Sample selection is `iteration mod dataset_size`; there is no shuffling,
/// so a run is fully determined by the data and the classifier.
pub struct TrainingOrchestrator<C> {
    images: ImageDataset,
    labels: LabelDataset,
    classifier: C,
    config: TrainConfig,
    state: TrainingState,
    progress_tx: Option<mpsc::Sender<TrainingEvent>>,
}

impl<C: Classifier> TrainingOrchestrator<C> {
    /// # Errors
    /// - `Error::Config` if a window in `config` is zero
    /// - `Error::DatasetMismatch` if image and label counts differ
    /// - `Error::EmptyDataset` if there is nothing to cycle through
    /// - `Error::Classifier` if the classifier's input or output width does
    ///   not match the record length or the number of classes
    pub fn new(
        images: ImageDataset,
        labels: LabelDataset,
        classifier: C,
        config: TrainConfig,
    ) -> Result<Self> {
        config.validate()?;

        if images.count() != labels.count() {
            return Err(Error::DatasetMismatch {
                images: images.count(),
                labels: labels.count(),
            });
        }
        if images.is_empty() {
            return Err(Error::EmptyDataset);
        }
        if classifier.input_size() != images.record_len() {
            return Err(ClassifierError::ShapeMismatch {
                expected: classifier.input_size(),
                got: images.record_len(),
            }
            .into());
        }
        if classifier.output_size() != NUM_CLASSES {
            return Err(ClassifierError::ShapeMismatch {
                expected: NUM_CLASSES,
                got: classifier.output_size(),
            }
            .into());
        }

        Ok(TrainingOrchestrator {
            images,
            labels,
            classifier,
            config,
            state: TrainingState::new(),
            progress_tx: None,
        })
    }

    /// Sends every report and evaluation to `tx` as well as to the log.
    pub fn with_progress(mut self, tx: mpsc::Sender<TrainingEvent>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn dataset_size(&self) -> usize {
        self.images.count()
    }

    pub fn images(&self) -> &ImageDataset {
        &self.images
    }

    pub fn labels(&self) -> &LabelDataset {
        &self.labels
    }

    pub fn state(&self) -> &TrainingState {
        &self.state
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    pub fn into_classifier(self) -> C {
        self.classifier
    }

    // -----------------------------------------------------------------------
    // Training
    // -----------------------------------------------------------------------

    /// Trains for iterations `1..iterations`.
    ///
    /// Iteration 0 is never executed, so a budget of `n` performs `n - 1`
    /// training steps. Every `report_every` iterations the accumulated error
    /// divided by `error_divisor` is reported and reset; every `batch_size`
    /// iterations `test_guess(eval_count, i)` runs.
    ///
    /// Any failure stops the run immediately.
    pub fn run(&mut self, iterations: usize) -> Result<RunSummary> {
        let n = self.dataset_size();
        let mut summary = RunSummary::default();

        log::info!(
            "training for {} iterations over {} samples",
            iterations.saturating_sub(1),
            n
        );

        for i in 1..iterations {
            let idx = i % n;

            let features = SampleEncoder::to_feature_vector(self.images.image(idx)?);
            let target = SampleEncoder::to_target_vector(self.labels.label(idx)?)?;
            let error = self.classifier.train(&features, &target)?;
            self.state.record(i, error);
            summary.iterations_run += 1;

            // ── Moving-average error ───────────────────────────────────────
            if i % self.config.report_every == 0 {
                let average_error = self.state.take_average(self.config.error_divisor);
                log::info!("iteration {}: average error {:.6}", i, average_error);
                summary.reports += 1;
                summary.last_average_error = Some(average_error);
                self.emit(TrainingEvent::Progress(ProgressReport { iteration: i, average_error }));
            }

            // ── Qualitative evaluation ─────────────────────────────────────
            if i % self.config.batch_size == 0 {
                let eval_count = self.config.eval_count;
                self.test_guess(eval_count, i)?;
                summary.evaluations += 1;
            }
        }

        Ok(summary)
    }

    // -----------------------------------------------------------------------
    // Evaluation
    // -----------------------------------------------------------------------

    /// Guesses `amount` consecutive samples starting at `starting_point`
    /// (wrapping around the dataset) without updating the classifier.
    ///
    /// Indices are reduced modulo the dataset size before stepping, so any
    /// `starting_point` up to `usize::MAX` is valid.
    pub fn test_guess(&mut self, amount: usize, starting_point: usize) -> Result<Evaluation> {
        let n = self.dataset_size();
        let base = starting_point % n;
        let mut guesses = Vec::with_capacity(amount);

        for k in 0..amount {
            let idx = (base + k % n) % n;
            let features = SampleEncoder::to_feature_vector(self.images.image(idx)?);
            let output = self.classifier.guess(&features)?;
            let guess = Guess {
                index: idx,
                predicted: argmax(&output),
                expected: self.labels.label(idx)?,
                output,
            };

            if log::log_enabled!(log::Level::Debug) {
                log::debug!(
                    "sample {}:\n{}guess: {} (label {})",
                    idx,
                    render_features(&features, self.images.width()),
                    guess.predicted,
                    guess.expected
                );
            }
            guesses.push(guess);
        }

        let evaluation = Evaluation { start: starting_point, guesses };
        log::info!(
            "evaluation at {}: {}/{} correct ({:.1}%)",
            starting_point,
            evaluation.correct(),
            evaluation.guesses.len(),
            evaluation.accuracy() * 100.0
        );
        if self.progress_tx.is_some() {
            self.emit(TrainingEvent::Evaluation(evaluation.clone()));
        }
        Ok(evaluation)
    }

    fn emit(&mut self, event: TrainingEvent) {
        let detached = match self.progress_tx {
            Some(ref tx) => tx.send(event).is_err(),
            None => false,
        };
        // A dropped receiver only detaches the channel; training goes on.
        if detached {
            log::debug!("progress receiver dropped, detaching channel");
            self.progress_tx = None;
        }
    }
}

/// Index of the first maximal entry. Ties keep the lowest index; an empty
/// slice yields 0.
pub fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmax_unique_maximum() {
        assert_eq!(argmax(&[0.1, 0.9, -0.3]), 1);
    }

    #[test]
    fn argmax_ties_pick_lowest_index() {
        assert_eq!(argmax(&[0.2, 0.7, 0.7, 0.1]), 1);
    }

    #[test]
    fn argmax_all_negative_picks_least_negative() {
        assert_eq!(argmax(&[-0.9, -0.8, -0.1, -0.5]), 2);
    }

    #[test]
    fn argmax_empty_is_zero() {
        assert_eq!(argmax(&[]), 0);
    }
}
