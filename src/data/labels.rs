use std::path::Path;

use crate::data::header::{self, LABEL_RANK};
use crate::data::reader::read_buffer;
use crate::error::{FormatError, IndexError, Result};

pub const LABEL_HEADER_LEN: usize = 8;

/// A decoded IDX1 label file.
///
/// # Layout
/// ```text
/// bytes  0-1:   reserved
/// byte   2:     0x08        (dtype = uint8)
/// byte   3:     0x01        (number of dimensions = 1)
/// bytes  4-7:   N           (number of labels, big-endian u32)
/// bytes  8..:   N bytes, one class index each
/// ```
///
/// Label values are not range-checked here; that happens when a label is
/// turned into a target vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelDataset {
    labels: Vec<u8>,
}

impl LabelDataset {
    pub fn decode(bytes: &[u8]) -> std::result::Result<LabelDataset, FormatError> {
        header::validate_magic(bytes, LABEL_RANK)?;

        let count = header::read_u32_be(bytes, 4)? as usize;
        let needed = count
            .checked_add(LABEL_HEADER_LEN)
            .ok_or(FormatError::SizeOverflow)?;

        if bytes.len() < needed {
            return Err(FormatError::Truncated { needed, actual: bytes.len() });
        }

        Ok(LabelDataset { labels: bytes[LABEL_HEADER_LEN..needed].to_vec() })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<LabelDataset> {
        let path = path.as_ref();
        let buffer = read_buffer(path)?;
        let dataset = LabelDataset::decode(&buffer)?;
        log::info!("decoded {} labels from {}", dataset.count(), path.display());
        Ok(dataset)
    }

    pub fn count(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn label(&self, index: usize) -> std::result::Result<u8, IndexError> {
        self.labels
            .get(index)
            .copied()
            .ok_or(IndexError::OutOfRange { index, count: self.labels.len() })
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.labels.iter().copied()
    }

    pub fn to_idx_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(LABEL_HEADER_LEN + self.labels.len());
        out.extend_from_slice(&header::magic(LABEL_RANK));
        out.extend_from_slice(&(self.labels.len() as u32).to_be_bytes());
        out.extend_from_slice(&self.labels);
        out
    }
}
