//! Logo normalizer - turns SVG or raster logo bytes into a fixed-size RGBA asset.

use image::imageops::FilterType;
use image::{ImageFormat, RgbaImage};
use resvg::{tiny_skia, usvg};
use tracing::debug;

use crate::error::{PlateError, Result};
use crate::types::{Logo, LogoKind};

/// Normalize a logo to fit within `target_size` x `target_size`.
///
/// SVG logos are rasterized onto an exact `target_size` square. Raster
/// logos are decoded and resampled, keeping their aspect ratio, so the
/// longer side equals `target_size`.
pub fn normalize(logo: &Logo, target_size: u32) -> Result<RgbaImage> {
    match logo.kind {
        LogoKind::Svg => rasterize_svg(&logo.bytes, target_size, target_size),
        LogoKind::Png => resize_raster(&logo.bytes, ImageFormat::Png, target_size),
        LogoKind::Jpeg => resize_raster(&logo.bytes, ImageFormat::Jpeg, target_size),
    }
}

/// Rasterize SVG markup into a `width` x `height` RGBA image.
///
/// The drawing is scaled uniformly and centred, like the SVG default
/// `preserveAspectRatio="xMidYMid meet"`.
pub fn rasterize_svg(svg: &[u8], width: u32, height: u32) -> Result<RgbaImage> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_data(svg, &options).map_err(|e| PlateError::LogoDecode {
        message: format!("Invalid SVG: {}", e),
    })?;

    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| PlateError::Render {
        message: format!("Cannot allocate {}x{} logo", width, height),
    })?;

    let svg_size = tree.size();
    let scale = (width as f32 / svg_size.width()).min(height as f32 / svg_size.height());
    let dx = (width as f32 - svg_size.width() * scale) / 2.0;
    let dy = (height as f32 - svg_size.height() * scale) / 2.0;

    resvg::render(
        &tree,
        tiny_skia::Transform::from_row(scale, 0.0, 0.0, scale, dx, dy),
        &mut pixmap.as_mut(),
    );

    debug!(width, height, "Rasterized SVG logo");

    Ok(pixmap_to_rgba(&pixmap))
}

/// Compute fitted dimensions for a raster logo.
///
/// The longer side becomes `target`; the other side is truncated and
/// clamped to one pixel.
pub fn fit_dimensions(width: u32, height: u32, target: u32) -> (u32, u32) {
    let aspect = width as f64 / height.max(1) as f64;

    let (w, h) = if aspect > 1.0 {
        (target, (target as f64 / aspect) as u32)
    } else {
        ((target as f64 * aspect) as u32, target)
    };

    (w.max(1), h.max(1))
}

/// Decode a raster logo and resample it to fit `target`.
fn resize_raster(bytes: &[u8], format: ImageFormat, target: u32) -> Result<RgbaImage> {
    let original =
        image::load_from_memory_with_format(bytes, format).map_err(|e| PlateError::LogoDecode {
            message: format!("Failed to read {:?} logo: {}", format, e),
        })?;

    let (w, h) = fit_dimensions(original.width(), original.height(), target);
    debug!(
        from_width = original.width(),
        from_height = original.height(),
        width = w,
        height = h,
        "Resizing raster logo"
    );

    // Catmull-Rom is a bicubic filter; nearest would alias against the code
    Ok(original.resize_exact(w, h, FilterType::CatmullRom).to_rgba8())
}

/// Convert a premultiplied pixmap into a straight-alpha image.
pub(crate) fn pixmap_to_rgba(pixmap: &tiny_skia::Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    img
}
