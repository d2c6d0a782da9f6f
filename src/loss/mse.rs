/// Mean-squared error between classifier output and a bipolar target.
pub struct MseLoss;

impl MseLoss {
    /// mean((predicted - expected)²). With ±1 targets a fully wrong class
    /// contributes 4.0 before averaging.
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        if predicted.is_empty() {
            return 0.0;
        }
        let sum: f64 = predicted.iter().zip(expected).map(|(p, y)| (p - y) * (p - y)).sum();
        sum / predicted.len() as f64
    }

    /// ∂L/∂p used as the output-layer upstream gradient. The 2/n factor is
    /// folded into the learning rate.
    pub fn derivative(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        predicted.iter().zip(expected).map(|(p, y)| p - y).collect()
    }
}
