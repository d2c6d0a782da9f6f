pub mod reader;
pub mod header;
pub mod images;
pub mod labels;
pub mod encoder;

pub use reader::{read_buffer, RawBuffer};
pub use header::{validate_magic, read_u32_be};
pub use images::ImageDataset;
pub use labels::LabelDataset;
pub use encoder::{SampleEncoder, BINARIZE_THRESHOLD, NUM_CLASSES};
