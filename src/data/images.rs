use std::path::Path;

use crate::data::header::{self, IMAGE_RANK};
use crate::data::reader::read_buffer;
use crate::error::{FormatError, IndexError, Result};

/// Size in bytes of the IDX3 header.
pub const IMAGE_HEADER_LEN: usize = 16;

/// A decoded IDX3 image file.
///
/// # Layout
/// ```text
/// bytes  0-1:   reserved
/// byte   2:     0x08        (dtype = uint8)
/// byte   3:     0x03        (number of dimensions = 3)
/// bytes  4-7:   N           (number of images, big-endian u32)
/// bytes  8-11:  height      (rows, big-endian u32)
/// bytes 12-15:  width       (cols, big-endian u32)
/// bytes 16..:   N * height * width bytes, row-major, uint8
/// ```
///
/// Pixels are kept in one flat buffer; each record is a `width * height`
/// slice of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDataset {
    width: usize,
    height: usize,
    count: usize,
    pixels: Vec<u8>,
}

impl ImageDataset {
    /// Decodes an IDX3 buffer.
    ///
    /// Bytes past the last declared record are ignored.
    pub fn decode(bytes: &[u8]) -> std::result::Result<ImageDataset, FormatError> {
        header::validate_magic(bytes, IMAGE_RANK)?;

        let count = header::read_u32_be(bytes, 4)? as usize;
        let height = header::read_u32_be(bytes, 8)? as usize;
        let width = header::read_u32_be(bytes, 12)? as usize;

        if width == 0 || height == 0 {
            return Err(FormatError::ZeroDimension { width, height });
        }

        let record_len = width.checked_mul(height).ok_or(FormatError::SizeOverflow)?;
        let needed = count
            .checked_mul(record_len)
            .and_then(|payload| payload.checked_add(IMAGE_HEADER_LEN))
            .ok_or(FormatError::SizeOverflow)?;

        if bytes.len() < needed {
            return Err(FormatError::Truncated { needed, actual: bytes.len() });
        }

        Ok(ImageDataset {
            width,
            height,
            count,
            pixels: bytes[IMAGE_HEADER_LEN..needed].to_vec(),
        })
    }

    /// Reads and decodes the IDX3 file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<ImageDataset> {
        let path = path.as_ref();
        let buffer = read_buffer(path)?;
        let dataset = ImageDataset::decode(&buffer)?;
        log::info!(
            "decoded {} images of {}x{} from {}",
            dataset.count,
            dataset.height,
            dataset.width,
            path.display()
        );
        Ok(dataset)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Pixels per record (`width * height`).
    pub fn record_len(&self) -> usize {
        self.width * self.height
    }

    /// Returns the pixels of record `index`.
    pub fn image(&self, index: usize) -> std::result::Result<&[u8], IndexError> {
        if index >= self.count {
            return Err(IndexError::OutOfRange { index, count: self.count });
        }
        let start = index * self.record_len();
        Ok(&self.pixels[start..start + self.record_len()])
    }

    /// Iterates over records in file order.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.pixels.chunks_exact(self.record_len())
    }

    /// Re-encodes the 16-byte header (reserved bytes zeroed).
    pub fn header(&self) -> [u8; IMAGE_HEADER_LEN] {
        let mut out = [0u8; IMAGE_HEADER_LEN];
        out[..4].copy_from_slice(&header::magic(IMAGE_RANK));
        out[4..8].copy_from_slice(&(self.count as u32).to_be_bytes());
        out[8..12].copy_from_slice(&(self.height as u32).to_be_bytes());
        out[12..16].copy_from_slice(&(self.width as u32).to_be_bytes());
        out
    }

    /// Serializes the dataset back to IDX3 bytes.
    pub fn to_idx_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(IMAGE_HEADER_LEN + self.pixels.len());
        out.extend_from_slice(&self.header());
        out.extend_from_slice(&self.pixels);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idx3(count: u32, height: u32, width: u32, payload: &[u8]) -> Vec<u8> {
        let mut bytes = vec![0, 0, 0x08, 0x03];
        bytes.extend_from_slice(&count.to_be_bytes());
        bytes.extend_from_slice(&height.to_be_bytes());
        bytes.extend_from_slice(&width.to_be_bytes());
        bytes.extend_from_slice(payload);
        bytes
    }

    #[test]
    fn decodes_single_two_by_two_record() {
        let ds = ImageDataset::decode(&idx3(1, 2, 2, &[10, 200, 50, 250])).unwrap();
        assert_eq!((ds.count(), ds.height(), ds.width()), (1, 2, 2));
        assert_eq!(ds.image(0).unwrap(), &[10, 200, 50, 250]);
    }

    #[test]
    fn records_follow_file_order() {
        let ds = ImageDataset::decode(&idx3(3, 1, 2, &[1, 2, 3, 4, 5, 6])).unwrap();
        let records: Vec<&[u8]> = ds.iter().collect();
        assert_eq!(records, vec![&[1, 2][..], &[3, 4][..], &[5, 6][..]]);
        assert_eq!(ds.image(2).unwrap(), &[5, 6]);
    }

    #[test]
    fn count_comes_from_header() {
        // Extra trailing bytes must not turn into extra records.
        let ds = ImageDataset::decode(&idx3(2, 1, 1, &[7, 8, 9, 9, 9])).unwrap();
        assert_eq!(ds.count(), 2);
        assert_eq!(ds.iter().count(), 2);
    }

    #[test]
    fn zero_count_is_empty_dataset() {
        let ds = ImageDataset::decode(&idx3(0, 28, 28, &[])).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.iter().count(), 0);
        assert_eq!(ds.record_len(), 784);
    }

    #[test]
    fn short_payload_is_truncated() {
        let err = ImageDataset::decode(&idx3(2, 2, 2, &[0; 7])).unwrap_err();
        assert_eq!(err, FormatError::Truncated { needed: 24, actual: 23 });
    }

    #[test]
    fn short_header_is_truncated() {
        let err = ImageDataset::decode(&[0, 0, 8, 3, 0, 0, 0, 1, 0, 0]).unwrap_err();
        assert!(matches!(err, FormatError::Truncated { .. }));
    }

    #[test]
    fn zero_width_is_rejected() {
        let err = ImageDataset::decode(&idx3(1, 2, 0, &[])).unwrap_err();
        assert_eq!(err, FormatError::ZeroDimension { width: 0, height: 2 });
    }

    #[test]
    fn mismatched_type_tag_is_bad_magic() {
        let mut bytes = idx3(1, 2, 2, &[10, 200, 50, 250]);
        bytes[2] = 0x09;
        assert!(matches!(
            ImageDataset::decode(&bytes),
            Err(FormatError::BadMagic { found_type: 0x09, .. })
        ));
    }

    #[test]
    fn out_of_range_index() {
        let ds = ImageDataset::decode(&idx3(1, 1, 1, &[0])).unwrap();
        assert_eq!(ds.image(1).unwrap_err(), IndexError::OutOfRange { index: 1, count: 1 });
    }

    #[test]
    fn header_reencodes_geometry() {
        let bytes = idx3(2, 3, 1, &[1, 2, 3, 4, 5, 6]);
        let ds = ImageDataset::decode(&bytes).unwrap();
        assert_eq!(&ds.header()[..], &bytes[..16]);
        assert_eq!(ds.to_idx_bytes(), bytes);
    }
}
