//! Error types shared across decoding, encoding, and training.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Malformed IDX buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Byte 2 is not the unsigned-byte type tag (0x08) or byte 3 is not the
    /// expected rank.
    #[error(
        "bad IDX magic: expected type 0x08 rank {expected_rank}, \
         found type 0x{found_type:02X} rank {found_rank}"
    )]
    BadMagic {
        expected_rank: u8,
        found_type: u8,
        found_rank: u8,
    },

    /// Buffer is shorter than the header says it must be.
    #[error("IDX buffer truncated: need {needed} bytes, got {actual}")]
    Truncated { needed: usize, actual: usize },

    #[error("IDX image geometry must be non-zero, got {width}x{height}")]
    ZeroDimension { width: usize, height: usize },

    #[error("IDX header sizes overflow usize")]
    SizeOverflow,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    #[error("index {index} out of range for dataset of {count} items")]
    OutOfRange { index: usize, count: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("label {label} is outside the digit range 0..=9")]
    LabelOutOfRange { label: u8 },
}

/// Failures reported by a [`Classifier`](crate::train::Classifier).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifierError {
    #[error("shape mismatch: expected {expected} values, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("invalid network spec: {0}")]
    InvalidSpec(String),
}

/// Top-level error for the crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Classifier(#[from] ClassifierError),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("{pixels} pixels do not fill a {width}x{height} image")]
    Geometry { pixels: usize, width: usize, height: usize },

    #[error("dataset mismatch: {images} images but {labels} labels")]
    DatasetMismatch { images: usize, labels: usize },

    #[error("dataset is empty, nothing to train on")]
    EmptyDataset,

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
