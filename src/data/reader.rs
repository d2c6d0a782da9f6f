use std::ops::Deref;
use std::path::Path;

use crate::error::{Error, Result};

/// An immutable, fully loaded file image. Decoders borrow it while parsing
/// and it is dropped once the decoded dataset exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBuffer(Vec<u8>);

impl RawBuffer {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Deref for RawBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

/// Reads the whole file at `path` in one open/read/close pass.
pub fn read_buffer(path: impl AsRef<Path>) -> Result<RawBuffer> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("read {} bytes from {}", bytes.len(), path.display());
    Ok(RawBuffer(bytes))
}
