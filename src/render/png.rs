//! PNG output for composited codes.

use std::io::Cursor;

use image::{ImageFormat, RgbImage};

use crate::error::{PlateError, Result};

/// Encode an image as PNG bytes.
pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| PlateError::Render {
            message: format!("Failed to encode PNG: {}", e),
        })?;
    Ok(bytes)
}
