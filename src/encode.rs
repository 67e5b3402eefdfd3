//! Symbol encoding - turns payload text into a module matrix.
//!
//! Error correction and symbol layout are delegated to the `qrcode` crate.

use qrcode::{EcLevel, QrCode};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::ModuleMatrix;

/// Error correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EccLevel {
    /// ~7% recovery.
    Low,
    /// ~15% recovery.
    Medium,
    /// ~25% recovery.
    Quartile,
    /// ~30% recovery. Leaves room for a logo over the centre.
    #[default]
    High,
}

impl From<EccLevel> for EcLevel {
    fn from(level: EccLevel) -> Self {
        match level {
            EccLevel::Low => EcLevel::L,
            EccLevel::Medium => EcLevel::M,
            EccLevel::Quartile => EcLevel::Q,
            EccLevel::High => EcLevel::H,
        }
    }
}

/// Encode text into a module matrix at the given error correction level.
///
/// The smallest symbol version that fits is chosen.
pub fn encode(text: &str, ecc: EccLevel) -> Result<ModuleMatrix> {
    let code = QrCode::with_error_correction_level(text.as_bytes(), ecc.into())?;
    let side = code.width();
    let modules = code
        .to_colors()
        .into_iter()
        .map(|c| c == qrcode::Color::Dark)
        .collect();

    ModuleMatrix::new(side, modules)
}
