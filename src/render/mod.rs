pub mod ascii;
pub mod snapshot;

pub use ascii::render_features;
pub use snapshot::save_png;
