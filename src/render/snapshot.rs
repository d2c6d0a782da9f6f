use std::path::Path;

use image::GrayImage;

use crate::error::{Error, Result};

/// Writes an image record as a grayscale PNG.
pub fn save_png(pixels: &[u8], width: usize, height: usize, path: impl AsRef<Path>) -> Result<()> {
    let geometry = || Error::Geometry { pixels: pixels.len(), width, height };
    let w = u32::try_from(width).map_err(|_| geometry())?;
    let h = u32::try_from(height).map_err(|_| geometry())?;
    let img = GrayImage::from_raw(w, h, pixels.to_vec()).ok_or_else(geometry)?;
    img.save(path.as_ref())?;
    log::debug!("wrote snapshot {}", path.as_ref().display());
    Ok(())
}
