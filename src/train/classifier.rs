use crate::error::ClassifierError;

/// The contract the training loop drives.
///
/// Feature and target vectors are bipolar; the output of `guess` holds one
/// score per class.
pub trait Classifier {
    fn input_size(&self) -> usize;

    fn output_size(&self) -> usize;

    /// Performs one parameter update and returns the sample's loss.
    fn train(&mut self, features: &[f64], target: &[f64]) -> Result<f64, ClassifierError>;

    /// Inference only; must not change any parameters.
    fn guess(&self, features: &[f64]) -> Result<Vec<f64>, ClassifierError>;
}
