use crate::error::EncodingError;

/// Pixels at or above this intensity become `+1.0`, everything below `-1.0`.
pub const BINARIZE_THRESHOLD: u8 = 180;

/// Number of digit classes; also the length of every target vector.
pub const NUM_CLASSES: usize = 10;

/// Turns raw records into bipolar network inputs and targets.
pub struct SampleEncoder;

impl SampleEncoder {
    /// Thresholds each pixel to `-1.0` / `+1.0`.
    pub fn to_feature_vector(pixels: &[u8]) -> Vec<f64> {
        pixels
            .iter()
            .map(|&p| if p < BINARIZE_THRESHOLD { -1.0 } else { 1.0 })
            .collect()
    }

    /// Bipolar one-hot: `+1.0` at `label`, `-1.0` elsewhere.
    pub fn to_target_vector(label: u8) -> Result<Vec<f64>, EncodingError> {
        let class = label as usize;
        if class >= NUM_CLASSES {
            return Err(EncodingError::LabelOutOfRange { label });
        }
        let mut target = vec![-1.0; NUM_CLASSES];
        target[class] = 1.0;
        Ok(target)
    }
}
