//! Matrix rasterizer - converts a module matrix into an RGB canvas.

use image::{Rgb, RgbImage};

use crate::error::{PlateError, Result};
use crate::types::{is_position_pattern, Colour, ModuleMatrix};

/// Quiet zone around the symbol, in modules.
pub const BORDER_MODULES: u32 = 1;

/// Colour for finder pattern modules, regardless of the chosen foreground.
pub const FINDER_COLOUR: Colour = Colour::BLACK;

/// Pixels per module for a requested output size.
///
/// Truncates, so the canvas can come out slightly smaller than requested.
/// Never less than one.
pub fn module_scale(side: usize, output_size: u32) -> u32 {
    (output_size / side.max(1) as u32).max(1)
}

/// Rasterize a module matrix.
///
/// The canvas is `(side + 2) * scale` pixels square: a one-module border of
/// `background`, light modules in `background`, dark modules in
/// `foreground`, except the three finder regions which always use
/// [`FINDER_COLOUR`].
///
/// Fails when the canvas side does not fit in a `u32`.
pub fn rasterize(
    matrix: &ModuleMatrix,
    foreground: Colour,
    background: Colour,
    output_size: u32,
) -> Result<RgbImage> {
    let side = matrix.side();
    let scale = module_scale(side, output_size);
    let size = u32::try_from(side)
        .ok()
        .and_then(|side| side.checked_add(BORDER_MODULES * 2))
        .and_then(|modules| modules.checked_mul(scale))
        .ok_or_else(|| PlateError::Render {
            message: format!(
                "Canvas for {} modules at {} px per module is too large",
                side, scale
            ),
        })?;

    let mut img = RgbImage::from_pixel(size, size, background.into());

    let fg: Rgb<u8> = foreground.into();
    let finder: Rgb<u8> = FINDER_COLOUR.into();

    for (x, y) in matrix.iter_dark() {
        let colour = if is_position_pattern(x, y, side) {
            finder
        } else {
            fg
        };

        let px = (x as u32 + BORDER_MODULES) * scale;
        let py = (y as u32 + BORDER_MODULES) * scale;

        // Fill scaled block
        for sy in 0..scale {
            for sx in 0..scale {
                img.put_pixel(px + sx, py + sy, colour);
            }
        }
    }

    Ok(img)
}
