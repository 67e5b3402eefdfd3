//! Core types for qrplate.

mod colour;
mod logo;
mod matrix;

pub use colour::Colour;
pub use logo::{Logo, LogoKind, LogoUpload, DEFAULT_MAX_LOGO_BYTES};
pub use matrix::{is_position_pattern, ModuleMatrix, FINDER_SIZE};
