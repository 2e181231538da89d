//! Offset-hex grid layout: cell enumeration, cell centers, and total extent.
//!
//! Rows are spaced at three quarters of the cell width and odd rows are
//! shifted by half a cell depth, the usual brick-offset approximation of
//! hex packing. The whole grid is centered on the origin.

use glam::DVec2;

use crate::error::ConfigurationError;
use crate::geometry::CellFootprint;

/// Default number of rows and columns.
pub const DEFAULT_GRID_SIZE: u32 = 32;

/// Row pitch as a fraction of cell width.
pub const ROW_PITCH: f64 = 0.75;

/// Number of rows and columns in the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridDimensions {
    pub rows: u32,
    pub cols: u32,
}

impl GridDimensions {
    /// Create dimensions, rejecting an empty grid.
    pub fn new(rows: u32, cols: u32) -> Result<Self, ConfigurationError> {
        if rows == 0 || cols == 0 {
            return Err(ConfigurationError::EmptyGrid { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }
}

impl Default for GridDimensions {
    fn default() -> Self {
        Self {
            rows: DEFAULT_GRID_SIZE,
            cols: DEFAULT_GRID_SIZE,
        }
    }
}

/// Address of one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GridCoord {
    pub row: u32,
    pub col: u32,
}

impl GridCoord {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Odd rows are shifted by half a cell depth.
    pub fn is_odd_row(&self) -> bool {
        self.row % 2 == 1
    }
}

/// Total bounding size of the placed grid on the XZ plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridExtent {
    /// Extent along X (`cell_width * rows * 0.75`).
    pub width: f64,
    /// Extent along Z (`cell_depth * cols`).
    pub height: f64,
}

impl GridExtent {
    /// Radius of the circular island boundary: half the shorter side.
    pub fn boundary_radius(&self) -> f64 {
        self.width.min(self.height) / 2.0
    }

    /// The longer side.
    pub fn max_side(&self) -> f64 {
        self.width.max(self.height)
    }

    /// Distance from the origin at which viewers place their reference
    /// marker (the sun prop), proportional to world size.
    pub fn reference_distance(&self) -> f64 {
        self.max_side() / 3.0
    }
}

/// A validated footprint plus dimensions, with the derived extent cached.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    footprint: CellFootprint,
    dimensions: GridDimensions,
    extent: GridExtent,
}

impl GridLayout {
    /// Build the layout for `dimensions` cells of size `footprint`.
    pub fn new(
        footprint: CellFootprint,
        dimensions: GridDimensions,
    ) -> Result<Self, ConfigurationError> {
        let dimensions = GridDimensions::new(dimensions.rows, dimensions.cols)?;
        let extent = GridExtent {
            width: footprint.width() * dimensions.rows as f64 * ROW_PITCH,
            height: footprint.depth() * dimensions.cols as f64,
        };
        if !extent.width.is_finite() || !extent.height.is_finite() {
            return Err(ConfigurationError::InvalidExtent {
                width: extent.width,
                height: extent.height,
            });
        }
        Ok(Self {
            footprint,
            dimensions,
            extent,
        })
    }

    pub fn footprint(&self) -> CellFootprint {
        self.footprint
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    pub fn extent(&self) -> GridExtent {
        self.extent
    }

    /// World-space center of a cell on the XZ plane (`x` = world X, `y` = world Z).
    pub fn cell_center(&self, coord: GridCoord) -> DVec2 {
        let w = self.footprint.width();
        let d = self.footprint.depth();
        let stagger = if coord.is_odd_row() { d * 0.5 } else { 0.0 };
        DVec2::new(
            w * coord.row as f64 * ROW_PITCH - self.extent.width / 2.0,
            d * coord.col as f64 + stagger - self.extent.height / 2.0,
        )
    }

    /// Every coordinate, sweeping all rows of a column before advancing to
    /// the next column.
    pub fn coords(&self) -> impl Iterator<Item = GridCoord> {
        let GridDimensions { rows, cols } = self.dimensions;
        (0..cols).flat_map(move |col| (0..rows).map(move |row| GridCoord::new(row, col)))
    }

    /// Every coordinate paired with its center.
    pub fn cells(&self) -> impl Iterator<Item = (GridCoord, DVec2)> + '_ {
        self.coords().map(|c| (c, self.cell_center(c)))
    }
}
