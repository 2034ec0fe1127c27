//! Color mapping for cells

use crate::cell::VoronoiCell;

/// RGBA color type
pub type CellColor = [f32; 4];

/// Trait for mapping cells to colors
pub trait ColorMapper {
    /// Map a cell to an RGBA color
    fn map_color(&self, cell: &VoronoiCell) -> CellColor;
}

/// Fixed palette indexed by cell ID
///
/// Neighboring IDs get different colors, which is usually enough to tell
/// adjacent cells apart in a debug render.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicColorMapper;

impl BasicColorMapper {
    pub const PALETTE: [CellColor; 8] = [
        [0.90, 0.30, 0.24, 1.0], // Red
        [0.20, 0.60, 0.86, 1.0], // Blue
        [0.18, 0.80, 0.44, 1.0], // Green
        [0.95, 0.77, 0.06, 1.0], // Yellow
        [0.61, 0.35, 0.71, 1.0], // Purple
        [0.90, 0.49, 0.13, 1.0], // Orange
        [0.10, 0.74, 0.61, 1.0], // Teal
        [0.58, 0.65, 0.65, 1.0], // Gray
    ];
}

impl ColorMapper for BasicColorMapper {
    fn map_color(&self, cell: &VoronoiCell) -> CellColor {
        Self::PALETTE[cell.id % Self::PALETTE.len()]
    }
}

/// Two-tone mapper: interior cells vs cells of hull sites
#[derive(Debug, Clone)]
pub struct CustomColorMapper {
    pub interior: CellColor,
    pub hull: CellColor,
}

impl Default for CustomColorMapper {
    fn default() -> Self {
        Self {
            interior: [0.2, 0.6, 0.2, 1.0],
            hull: [0.1, 0.3, 0.7, 1.0],
        }
    }
}

impl ColorMapper for CustomColorMapper {
    fn map_color(&self, cell: &VoronoiCell) -> CellColor {
        if cell.unclosed {
            self.hull
        } else {
            self.interior
        }
    }
}
