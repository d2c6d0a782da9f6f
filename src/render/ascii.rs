/// Draws a bipolar feature vector as text: `##` for ink, two spaces for
/// background, one line per `width` entries.
pub fn render_features(features: &[f64], width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let mut out = String::with_capacity(features.len() * 2 + features.len() / width + 1);
    for row in features.chunks(width) {
        for &v in row {
            out.push_str(if v > 0.0 { "##" } else { "  " });
        }
        out.push('\n');
    }
    out
}
