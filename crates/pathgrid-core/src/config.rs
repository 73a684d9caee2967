//! Run configuration shared by front-ends.

use crate::error::GridError;
use crate::geom::Pos;

/// Grid and display settings.
///
/// `window_size` is the side, in pixels, of the square drawing surface a
/// pixel-based front-end renders into; terminal front-ends ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Cells per side.
    pub dimension: i32,
    /// Drawing surface side in pixels.
    pub window_size: i32,
    /// Pause after each search checkpoint, in milliseconds.
    pub step_delay_ms: u64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            dimension: 50,
            window_size: 800,
            step_delay_ms: 0,
        }
    }
}

impl GridConfig {
    /// Check that the grid can be built and that every cell gets at least
    /// one pixel.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.dimension <= 0 || self.window_size < self.dimension {
            return Err(GridError::InvalidDimension(self.dimension));
        }
        Ok(())
    }

    /// Pixel width of one cell.
    pub fn cell_size(&self) -> i32 {
        if self.dimension <= 0 {
            return 0;
        }
        self.window_size / self.dimension
    }

    /// Map a pixel coordinate (x to the right, y downwards) to the cell
    /// under it, or `None` if it falls outside the grid.
    pub fn cell_at_pixel(&self, x: i32, y: i32) -> Option<Pos> {
        let size = self.cell_size();
        if size == 0 || x < 0 || y < 0 {
            return None;
        }
        let pos = Pos::new(y / size, x / size);
        (pos.row < self.dimension && pos.col < self.dimension).then_some(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = GridConfig::default();
        assert_eq!(c.dimension, 50);
        assert_eq!(c.window_size, 800);
        assert_eq!(c.cell_size(), 16);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_sizes() {
        let c = GridConfig {
            dimension: 0,
            ..GridConfig::default()
        };
        assert_eq!(c.validate(), Err(GridError::InvalidDimension(0)));
        let c = GridConfig {
            dimension: 100,
            window_size: 50,
            ..GridConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn pixel_to_cell() {
        let c = GridConfig::default();
        assert_eq!(c.cell_at_pixel(0, 0), Some(Pos::new(0, 0)));
        assert_eq!(c.cell_at_pixel(17, 40), Some(Pos::new(2, 1)));
        assert_eq!(c.cell_at_pixel(799, 799), Some(Pos::new(49, 49)));
        assert_eq!(c.cell_at_pixel(800, 10), None);
        assert_eq!(c.cell_at_pixel(-1, 10), None);
    }
}
