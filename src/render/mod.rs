//! Rendering module for qrplate.
//!
//! This module handles rasterizing module matrices, normalizing logos,
//! compositing them with a backplate and encoding PNG output.

mod composite;
mod logo;
mod matrix;
mod png;

pub use composite::{composite, rounded_rect, BackplateStyle, Placement};
pub use logo::{fit_dimensions, normalize, rasterize_svg};
pub use matrix::{module_scale, rasterize, BORDER_MODULES, FINDER_COLOUR};
pub use png::encode_png;
