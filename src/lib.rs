//! qrplate - Styled QR code renderer
//!
//! A library for rendering QR codes in custom colours with a logo centred
//! on a rounded, shadowed backplate. Finder patterns always stay black so
//! the code remains scannable whatever the foreground colour.

pub mod cli;
pub mod config;
pub mod encode;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod types;

pub use config::{RenderConfig, CONFIG_FILENAME, DEFAULT_LOGO_SVG};
pub use encode::{encode, EccLevel};
pub use error::{PlateError, Result};
pub use pipeline::{GenerateRequest, GeneratedImage, Pipeline};
pub use render::{
    composite, encode_png, fit_dimensions, normalize, rasterize, rasterize_svg,
    BackplateStyle, Placement, FINDER_COLOUR,
};
pub use types::{is_position_pattern, Colour, Logo, LogoKind, LogoUpload, ModuleMatrix};
