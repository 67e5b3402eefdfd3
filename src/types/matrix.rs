//! Module matrix - the square grid of dark/light modules of an encoded symbol.

use crate::error::{PlateError, Result};

/// Side length of a position-detection (finder) pattern, in modules.
pub const FINDER_SIZE: usize = 7;

/// A square grid of modules, `true` = dark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMatrix {
    /// Side length in modules.
    side: usize,

    /// Modules in row-major order (`modules[y * side + x]`).
    modules: Vec<bool>,
}

impl ModuleMatrix {
    /// Create a matrix from row-major modules.
    pub fn new(side: usize, modules: Vec<bool>) -> Result<Self> {
        if side == 0 {
            return Err(PlateError::Render {
                message: "Module matrix must have at least one module".to_string(),
            });
        }
        if modules.len() != side * side {
            return Err(PlateError::Render {
                message: format!(
                    "Module matrix of side {} needs {} modules, got {}",
                    side,
                    side * side,
                    modules.len()
                ),
            });
        }

        Ok(Self { side, modules })
    }

    /// Create a matrix by evaluating `f(x, y)` for every module.
    pub fn from_fn(side: usize, mut f: impl FnMut(usize, usize) -> bool) -> Result<Self> {
        let modules = (0..side * side).map(|i| f(i % side, i / side)).collect();
        Self::new(side, modules)
    }

    /// Get the side length in modules.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Get a module. Out-of-range coordinates are light.
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.side && y < self.side && self.modules[y * self.side + x]
    }

    /// Iterate over the coordinates of all dark modules.
    pub fn iter_dark(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.modules
            .iter()
            .enumerate()
            .filter(|&(_, &dark)| dark)
            .map(|(i, _)| (i % self.side, i / self.side))
    }
}

/// Check whether a module lies in one of the three finder pattern regions.
///
/// The 7x7 blocks at the top-left, top-right and bottom-left corners hold
/// the finder patterns. The bottom-right corner never does.
pub fn is_position_pattern(x: usize, y: usize, side: usize) -> bool {
    let far = side.saturating_sub(FINDER_SIZE);

    // Top-left
    if x < FINDER_SIZE && y < FINDER_SIZE {
        return true;
    }
    // Top-right
    if x >= far && y < FINDER_SIZE {
        return true;
    }
    // Bottom-left
    x < FINDER_SIZE && y >= far
}
