//! Decoding and encoding of IDX buffers, end to end.

use proptest::collection::vec as prop_vec;
use proptest::prelude::*;

use ferrite_mnist::data::{ImageDataset, LabelDataset, SampleEncoder};
use ferrite_mnist::{EncodingError, Error, FormatError};

fn idx3(count: u32, height: u32, width: u32, payload: &[u8]) -> Vec<u8> {
    let mut bytes = vec![0x00, 0x00, 0x08, 0x03];
    bytes.extend_from_slice(&count.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(payload);
    bytes
}

fn idx1(labels: &[u8]) -> Vec<u8> {
    let mut bytes = vec![0x00, 0x00, 0x08, 0x01];
    bytes.extend_from_slice(&(labels.len() as u32).to_be_bytes());
    bytes.extend_from_slice(labels);
    bytes
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn two_by_two_image_scenario() {
    let bytes = [0, 0, 8, 3, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 2, 10, 200, 50, 250];
    let ds = ImageDataset::decode(&bytes).unwrap();

    assert_eq!(ds.count(), 1);
    assert_eq!((ds.height(), ds.width()), (2, 2));
    assert_eq!(
        SampleEncoder::to_feature_vector(ds.image(0).unwrap()),
        vec![-1.0, 1.0, -1.0, 1.0]
    );
}

#[test]
fn count_last_header_reads_as_two_columns() {
    // Height, width, count order: under the standard layout the fields read
    // as count 2, height 2, width 1.
    let bytes = [0, 0, 8, 3, 0, 0, 0, 2, 0, 0, 0, 2, 0, 0, 0, 1, 10, 200, 50, 250];
    let ds = ImageDataset::decode(&bytes).unwrap();

    assert_eq!(ds.count(), 2);
    assert_eq!((ds.height(), ds.width()), (2, 1));
    assert_eq!(ds.image(0).unwrap(), &[10, 200]);
    assert_eq!(ds.image(1).unwrap(), &[50, 250]);
    let features: Vec<f64> = ds.iter().flat_map(|r| SampleEncoder::to_feature_vector(r)).collect();
    assert_eq!(features, vec![-1.0, 1.0, -1.0, 1.0]);
}

#[test]
fn single_label_scenario() {
    let ds = LabelDataset::decode(&[0, 0, 8, 1, 0, 0, 0, 1, 3]).unwrap();

    assert_eq!(ds.count(), 1);
    assert_eq!(ds.label(0).unwrap(), 3);
    assert_eq!(
        SampleEncoder::to_target_vector(3).unwrap(),
        vec![-1.0, -1.0, -1.0, 1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0]
    );
}

#[test]
fn mismatched_type_tag_returns_no_dataset() {
    let bytes = [0, 0, 9, 3, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 2, 10, 200, 50, 250];
    assert!(matches!(
        ImageDataset::decode(&bytes),
        Err(FormatError::BadMagic { expected_rank: 3, found_type: 9, found_rank: 3 })
    ));
}

#[test]
fn load_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let images = dir.path().join("train-images.idx3-ubyte");
    let labels = dir.path().join("train-labels.idx1-ubyte");
    std::fs::write(&images, idx3(2, 1, 3, &[0, 255, 0, 255, 0, 255])).unwrap();
    std::fs::write(&labels, idx1(&[4, 2])).unwrap();

    let images = ImageDataset::load(&images).unwrap();
    let labels = LabelDataset::load(&labels).unwrap();
    assert_eq!(images.image(1).unwrap(), &[255, 0, 255]);
    assert_eq!(labels.iter().collect::<Vec<_>>(), vec![4, 2]);
}

#[test]
fn load_propagates_format_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("labels");
    std::fs::write(&path, [0, 0, 8, 1, 0, 0, 0, 5, 1]).unwrap();

    match LabelDataset::load(&path) {
        Err(Error::Format(FormatError::Truncated { needed: 13, actual: 9 })) => {}
        other => panic!("expected truncation, got {other:?}"),
    }
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn header_round_trips(count in 0u32..6, height in 1u32..5, width in 1u32..5, seed in any::<u8>()) {
        let n = (count * height * width) as usize;
        let payload: Vec<u8> = (0..n).map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed)).collect();
        let bytes = idx3(count, height, width, &payload);

        let ds = ImageDataset::decode(&bytes).unwrap();
        prop_assert_eq!(&ds.header()[..], &bytes[..16]);
        prop_assert_eq!(ds.iter().count(), count as usize);
        prop_assert!(ds.iter().all(|r| r.len() == (height * width) as usize));
    }

    #[test]
    fn any_shortfall_is_truncated(count in 1u32..5, side in 1u32..4, missing in 1usize..4) {
        let n = (count * side * side) as usize;
        let missing = missing.min(n);
        let bytes = idx3(count, side, side, &vec![0u8; n - missing]);
        let is_truncated = matches!(ImageDataset::decode(&bytes), Err(FormatError::Truncated { .. }));
        prop_assert!(is_truncated);
    }

    #[test]
    fn features_are_bipolar(pixels in prop_vec(any::<u8>(), 0..64)) {
        let features = SampleEncoder::to_feature_vector(&pixels);
        prop_assert_eq!(features.len(), pixels.len());
        for (&p, &f) in pixels.iter().zip(&features) {
            prop_assert_eq!(f, if p >= 180 { 1.0 } else { -1.0 });
        }
    }

    #[test]
    fn labels_above_nine_fail(label in 10u8..=255) {
        prop_assert_eq!(
            SampleEncoder::to_target_vector(label),
            Err(EncodingError::LabelOutOfRange { label })
        );
    }

    #[test]
    fn label_bytes_survive_decode(labels in prop_vec(any::<u8>(), 0..50)) {
        let ds = LabelDataset::decode(&idx1(&labels)).unwrap();
        prop_assert_eq!(ds.iter().collect::<Vec<_>>(), labels);
    }
}
