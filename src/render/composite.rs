//! Compositor - overlays a logo on the rendered code with a rounded backplate.
//!
//! Drawing happens on an antialiased tiny-skia pixmap in four passes:
//! shadow, white plate, black border, then the logo itself.

use image::{RgbImage, RgbaImage};
use resvg::tiny_skia::{
    FillRule, IntSize, Paint, Path, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PlateError, Result};

use super::logo::pixmap_to_rgba;

/// Cubic Bezier control distance for a quarter circle.
const KAPPA: f32 = 0.552_284_8;

/// Backplate appearance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackplateStyle {
    /// Padding between the logo and the plate edge, in pixels.
    pub margin: u32,

    /// Corner radius, in pixels.
    pub corner_radius: f32,

    /// Shadow shift right and down, in pixels.
    pub shadow_offset: i32,

    /// Shadow opacity (0-255).
    pub shadow_alpha: u8,

    /// Border stroke width, in pixels.
    pub border_width: f32,
}

impl Default for BackplateStyle {
    fn default() -> Self {
        Self {
            margin: 8,
            corner_radius: 6.0,
            shadow_offset: 2,
            shadow_alpha: 30,
            border_width: 2.0,
        }
    }
}

/// Where the logo and its plate land on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Logo top-left corner.
    pub x: i32,
    pub y: i32,

    /// Plate top-left corner and size.
    pub plate_x: i32,
    pub plate_y: i32,
    pub plate_width: u32,
    pub plate_height: u32,
}

impl Placement {
    /// Centre a logo on a canvas. Odd remainders go to the right and bottom.
    pub fn centred(canvas: (u32, u32), logo: (u32, u32), margin: u32) -> Self {
        let x = ((canvas.0 as i64 - logo.0 as i64) / 2) as i32;
        let y = ((canvas.1 as i64 - logo.1 as i64) / 2) as i32;
        let inset = i32::try_from(margin).unwrap_or(i32::MAX);
        let pad = margin.saturating_mul(2);

        Self {
            x,
            y,
            plate_x: x.saturating_sub(inset),
            plate_y: y.saturating_sub(inset),
            plate_width: logo.0.saturating_add(pad),
            plate_height: logo.1.saturating_add(pad),
        }
    }
}

/// Composite a logo over the centre of a canvas.
///
/// Returns an opaque image the same size as `canvas`. Logos larger than
/// the canvas are clipped.
pub fn composite(canvas: &RgbImage, logo: &RgbaImage, style: &BackplateStyle) -> Result<RgbImage> {
    let mut pixmap = rgb_to_pixmap(canvas)?;
    let logo_pixmap = rgba_to_pixmap(logo)?;

    let place = Placement::centred(canvas.dimensions(), logo.dimensions(), style.margin);
    debug!(x = place.x, y = place.y, "Placing logo");

    let (x, y) = (place.plate_x as f32, place.plate_y as f32);
    let (w, h) = (place.plate_width as f32, place.plate_height as f32);
    let offset = style.shadow_offset as f32;

    // Shadow
    if let Some(path) = rounded_rect(x + offset, y + offset, w, h, style.corner_radius) {
        pixmap.fill_path(
            &path,
            &solid_paint(0, 0, 0, style.shadow_alpha),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    if let Some(path) = rounded_rect(x, y, w, h, style.corner_radius) {
        // Plate
        pixmap.fill_path(
            &path,
            &solid_paint(255, 255, 255, 255),
            FillRule::Winding,
            Transform::identity(),
            None,
        );

        // Border
        if style.border_width > 0.0 {
            let stroke = Stroke {
                width: style.border_width,
                ..Stroke::default()
            };
            pixmap.stroke_path(
                &path,
                &solid_paint(0, 0, 0, 255),
                &stroke,
                Transform::identity(),
                None,
            );
        }
    }

    pixmap.draw_pixmap(
        place.x,
        place.y,
        logo_pixmap.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );

    Ok(pixmap_to_rgb(&pixmap))
}

/// Build a rounded rectangle path.
///
/// The radius is clamped to half the shorter side. Returns `None` for an
/// empty rectangle.
pub fn rounded_rect(x: f32, y: f32, w: f32, h: f32, radius: f32) -> Option<Path> {
    if w <= 0.0 || h <= 0.0 {
        return None;
    }

    let r = radius.clamp(0.0, w.min(h) / 2.0);
    let k = r * KAPPA;
    let (right, bottom) = (x + w, y + h);

    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(right - r, y);
    pb.cubic_to(right - r + k, y, right, y + r - k, right, y + r);
    pb.line_to(right, bottom - r);
    pb.cubic_to(right, bottom - r + k, right - r + k, bottom, right - r, bottom);
    pb.line_to(x + r, bottom);
    pb.cubic_to(x + r - k, bottom, x, bottom - r + k, x, bottom - r);
    pb.line_to(x, y + r);
    pb.cubic_to(x, y + r - k, x + r - k, y, x + r, y);
    pb.close();
    pb.finish()
}

fn solid_paint(r: u8, g: u8, b: u8, a: u8) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

/// Opaque RGB is already premultiplied once an alpha of 255 is added.
fn rgb_to_pixmap(img: &RgbImage) -> Result<Pixmap> {
    let data = img
        .pixels()
        .flat_map(|p| [p.0[0], p.0[1], p.0[2], 255])
        .collect();
    pixmap_from_vec(data, img.width(), img.height())
}

fn rgba_to_pixmap(img: &RgbaImage) -> Result<Pixmap> {
    let data = img
        .pixels()
        .flat_map(|p| {
            let [r, g, b, a] = p.0;
            [premultiply(r, a), premultiply(g, a), premultiply(b, a), a]
        })
        .collect();
    pixmap_from_vec(data, img.width(), img.height())
}

fn pixmap_from_vec(data: Vec<u8>, width: u32, height: u32) -> Result<Pixmap> {
    IntSize::from_wh(width, height)
        .and_then(|size| Pixmap::from_vec(data, size))
        .ok_or_else(|| PlateError::Render {
            message: format!("Cannot create {}x{} pixmap", width, height),
        })
}

/// Drop the alpha channel; the canvas stays opaque throughout.
fn pixmap_to_rgb(pixmap: &Pixmap) -> RgbImage {
    image::DynamicImage::ImageRgba8(pixmap_to_rgba(pixmap)).to_rgb8()
}

fn premultiply(channel: u8, alpha: u8) -> u8 {
    ((channel as u16 * alpha as u16 + 127) / 255) as u8
}
