//! Mapping between grid cells and drawing-surface regions.
//!
//! The same mapping serves the 20 px canvas reference and the terminal,
//! where one cell is two columns wide and one row tall.

use crate::config::{CELL_PIXELS, GridSize, TERMINAL_CELL_COLUMNS, TERMINAL_CELL_ROWS};
use crate::snake::Position;

/// Surface units spanned by one grid cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct CellMetrics {
    pub width: u16,
    pub height: u16,
}

impl CellMetrics {
    /// Square canvas pixels.
    pub const CANVAS: Self = Self {
        width: CELL_PIXELS,
        height: CELL_PIXELS,
    };

    /// Terminal character cells.
    pub const TERMINAL: Self = Self {
        width: TERMINAL_CELL_COLUMNS,
        height: TERMINAL_CELL_ROWS,
    };
}

/// Axis-aligned rectangle on the drawing surface, relative to its origin.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Region {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

/// Returns the surface region covered by `cell`, or `None` off the grid.
#[must_use]
pub fn cell_region(grid: GridSize, metrics: CellMetrics, cell: Position) -> Option<Region> {
    if !cell.is_within_bounds(grid) {
        return None;
    }

    let column = u16::try_from(cell.x).ok()?;
    let row = u16::try_from(cell.y).ok()?;

    Some(Region {
        x: column.checked_mul(metrics.width)?,
        y: row.checked_mul(metrics.height)?,
        width: metrics.width,
        height: metrics.height,
    })
}

/// Total surface size `(width, height)` of the grid.
#[must_use]
pub fn surface_size(grid: GridSize, metrics: CellMetrics) -> (u16, u16) {
    (
        grid.count().saturating_mul(metrics.width),
        grid.count().saturating_mul(metrics.height),
    )
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::snake::Position;

    use super::{CellMetrics, Region, cell_region, surface_size};

    #[test]
    fn canvas_is_four_hundred_pixels_square() {
        assert_eq!(surface_size(GridSize::default(), CellMetrics::CANVAS), (400, 400));
        assert_eq!(surface_size(GridSize::default(), CellMetrics::TERMINAL), (40, 20));
    }

    #[test]
    fn cell_maps_to_scaled_region() {
        let region = cell_region(GridSize::default(), CellMetrics::CANVAS, Position::new(3, 7));

        assert_eq!(
            region,
            Some(Region {
                x: 60,
                y: 140,
                width: 20,
                height: 20,
            })
        );
    }

    #[test]
    fn off_grid_cell_has_no_region() {
        let grid = GridSize::default();

        assert_eq!(cell_region(grid, CellMetrics::TERMINAL, Position::new(-1, 0)), None);
        assert_eq!(cell_region(grid, CellMetrics::TERMINAL, Position::new(0, 20)), None);
    }
}
