//! IDX header primitives.
//!
//! ```text
//! byte   0-1:   reserved (not inspected)
//! byte   2:     0x08        (dtype = unsigned byte)
//! byte   3:     rank        (1 for labels, 3 for images)
//! bytes  4..:   rank big-endian u32 dimension sizes
//! ```

use crate::error::FormatError;

/// Type tag for unsigned-byte payloads.
pub const UBYTE_TAG: u8 = 0x08;
pub const LABEL_RANK: u8 = 0x01;
pub const IMAGE_RANK: u8 = 0x03;

/// Checks the type tag at byte 2 and the rank tag at byte 3.
pub fn validate_magic(bytes: &[u8], rank: u8) -> Result<(), FormatError> {
    if bytes.len() < 4 {
        return Err(FormatError::Truncated { needed: 4, actual: bytes.len() });
    }
    if bytes[2] != UBYTE_TAG || bytes[3] != rank {
        return Err(FormatError::BadMagic {
            expected_rank: rank,
            found_type: bytes[2],
            found_rank: bytes[3],
        });
    }
    Ok(())
}

/// Reads a big-endian u32 at `offset`.
pub fn read_u32_be(bytes: &[u8], offset: usize) -> Result<u32, FormatError> {
    let end = offset + 4;
    let field = bytes.get(offset..end).ok_or(FormatError::Truncated {
        needed: end,
        actual: bytes.len(),
    })?;
    Ok(u32::from_be_bytes([field[0], field[1], field[2], field[3]]))
}

/// Writes the four magic bytes for a payload of the given rank.
pub(crate) fn magic(rank: u8) -> [u8; 4] {
    [0x00, 0x00, UBYTE_TAG, rank]
}
