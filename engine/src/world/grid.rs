//! Grid Geometry Module
//!
//! Maps world-space positions onto a bounded planar grid and back.
//!
//! ## Layout
//! The grid lies on the XZ plane and is centred on the ground reference
//! (or on the sandbox anchor when no ground is set).
//! - Rows run along world Z, columns along world X: an index is `(row, col)`
//! - `x_min = center.x - width * cell_size.x / 2`
//! - `z_min = center.z - height * cell_size.y / 2`
//! - `y_level` is the ground's height, or 0 without a ground reference
//!
//! Bounds are cached in [`GridGeometry`] and recomputed explicitly whenever
//! the configuration, anchor or ground changes.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Height of the cursor cell highlight box.
pub const CELL_HIGHLIGHT_HEIGHT: f32 = 0.1;

/// Rejected grid configurations.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GridConfigError {
    #[error("grid width must be at least one cell")]
    ZeroWidth,
    #[error("grid height must be at least one cell")]
    ZeroHeight,
    #[error("grid width {0} exceeds the largest cell index")]
    TooWide(u32),
    #[error("grid height {0} exceeds the largest cell index")]
    TooTall(u32),
    #[error("cell size must be positive and finite, got ({x}, {y})")]
    InvalidCellSize { x: f32, y: f32 },
    #[error("block y offset must be finite, got {0}")]
    InvalidBlockOffset(f32),
}

/// Grid dimensions and block offset, fixed for a sandbox session.
///
/// Fields are private so a constructed config always satisfies
/// `width > 0`, `height > 0` and a strictly positive cell size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridConfig {
    width: u32,
    height: u32,
    cell_size: Vec2,
    block_y_offset: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            cell_size: Vec2::ONE,
            block_y_offset: 0.0,
        }
    }
}

impl GridConfig {
    /// Create a validated grid configuration.
    ///
    /// # Arguments
    /// * `width` - Number of columns (world X)
    /// * `height` - Number of rows (world Z)
    /// * `cell_size` - Cell extent along world X (`x`) and world Z (`y`)
    pub fn new(width: u32, height: u32, cell_size: Vec2) -> Result<Self, GridConfigError> {
        if width == 0 {
            return Err(GridConfigError::ZeroWidth);
        }
        if height == 0 {
            return Err(GridConfigError::ZeroHeight);
        }
        // Cell indices are i32
        if width > i32::MAX as u32 {
            return Err(GridConfigError::TooWide(width));
        }
        if height > i32::MAX as u32 {
            return Err(GridConfigError::TooTall(height));
        }
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(cell_size.x) || !valid(cell_size.y) {
            return Err(GridConfigError::InvalidCellSize {
                x: cell_size.x,
                y: cell_size.y,
            });
        }

        Ok(Self {
            width,
            height,
            cell_size,
            block_y_offset: 0.0,
        })
    }

    /// Set the vertical offset applied to placed blocks and the preview.
    pub fn with_block_y_offset(mut self, offset: f32) -> Result<Self, GridConfigError> {
        if !offset.is_finite() {
            return Err(GridConfigError::InvalidBlockOffset(offset));
        }
        self.block_y_offset = offset;
        Ok(self)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_size(&self) -> Vec2 {
        self.cell_size
    }

    pub fn block_y_offset(&self) -> f32 {
        self.block_y_offset
    }

    /// World-space size of the whole grid (X extent, Z extent).
    pub fn extent(&self) -> Vec2 {
        Vec2::new(
            self.width as f32 * self.cell_size.x,
            self.height as f32 * self.cell_size.y,
        )
    }
}

/// A `(row, col)` cell address.
///
/// The library passes cells around as `Option<GridIndex>`; [`GridIndex::SENTINEL`]
/// only exists for callers that need the flat "no cell" encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridIndex {
    pub row: i32,
    pub col: i32,
}

impl GridIndex {
    /// Flat encoding of "no valid cell".
    pub const SENTINEL: GridIndex = GridIndex {
        row: i32::MIN,
        col: i32::MIN,
    };

    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn is_sentinel(&self) -> bool {
        *self == Self::SENTINEL
    }

    /// Encode an optional index, using the sentinel for `None`.
    pub fn from_option(index: Option<GridIndex>) -> Self {
        index.unwrap_or(Self::SENTINEL)
    }

    /// Decode the flat encoding back into an option.
    pub fn into_option(self) -> Option<GridIndex> {
        if self.is_sentinel() { None } else { Some(self) }
    }
}

impl fmt::Display for GridIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// World-space anchor of the grid's minimum corner plus the ground level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridBounds {
    pub x_min: f32,
    pub z_min: f32,
    pub y_level: f32,
}

impl GridBounds {
    /// Derive bounds from a configuration and its references.
    ///
    /// `ground` wins over `anchor` as the grid centre; only the ground
    /// contributes a vertical level.
    pub fn compute(config: &GridConfig, anchor: Vec3, ground: Option<Vec3>) -> Self {
        let center = ground.unwrap_or(anchor);
        let extent = config.extent();
        Self {
            x_min: center.x - extent.x / 2.0,
            z_min: center.z - extent.y / 2.0,
            y_level: ground.map_or(0.0, |g| g.y),
        }
    }
}

/// Bidirectional mapping between world positions and grid cells.
#[derive(Clone, Debug)]
pub struct GridGeometry {
    config: GridConfig,
    anchor: Vec3,
    ground: Option<Vec3>,
    bounds: GridBounds,
}

impl GridGeometry {
    /// Create a resolver for `config`, anchored at `anchor` unless a ground
    /// reference position is given.
    pub fn new(config: GridConfig, anchor: Vec3, ground: Option<Vec3>) -> Self {
        Self {
            config,
            anchor,
            ground,
            bounds: GridBounds::compute(&config, anchor, ground),
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn anchor(&self) -> Vec3 {
        self.anchor
    }

    pub fn ground(&self) -> Option<Vec3> {
        self.ground
    }

    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Point the grid is centred on: the ground reference, else the anchor.
    pub fn center(&self) -> Vec3 {
        self.ground.unwrap_or(self.anchor)
    }

    pub fn set_config(&mut self, config: GridConfig) {
        self.config = config;
        self.recompute_bounds();
    }

    pub fn set_anchor(&mut self, anchor: Vec3) {
        self.anchor = anchor;
        self.recompute_bounds();
    }

    pub fn set_ground(&mut self, ground: Option<Vec3>) {
        self.ground = ground;
        self.recompute_bounds();
    }

    /// Refresh the cached bounds from the current config and references.
    pub fn recompute_bounds(&mut self) {
        self.bounds = GridBounds::compute(&self.config, self.anchor, self.ground);
    }

    /// Whether `index` addresses a cell inside the grid.
    pub fn contains(&self, index: GridIndex) -> bool {
        index.row >= 0
            && index.col >= 0
            && (index.row as i64) < self.config.height as i64
            && (index.col as i64) < self.config.width as i64
    }

    /// Resolve a world position to the cell containing it.
    ///
    /// Column comes from world X, row from world Z. Positions on the far
    /// edge (`x == x_min + width * cell_size.x`) are outside the grid.
    pub fn to_grid_index(&self, world: Vec3) -> Option<GridIndex> {
        let cell = self.config.cell_size;
        let col = ((world.x - self.bounds.x_min) / cell.x).floor();
        let row = ((world.z - self.bounds.z_min) / cell.y).floor();

        // Range checks also reject NaN.
        if !(0.0..self.config.width as f32).contains(&col)
            || !(0.0..self.config.height as f32).contains(&row)
        {
            return None;
        }

        Some(GridIndex::new(row as i32, col as i32))
    }

    /// Centre of a cell at ground level.
    pub fn to_world_position(&self, index: GridIndex) -> Vec3 {
        let cell = self.config.cell_size;
        Vec3::new(
            self.bounds.x_min + index.col as f32 * cell.x + cell.x / 2.0,
            self.bounds.y_level,
            self.bounds.z_min + index.row as f32 * cell.y + cell.y / 2.0,
        )
    }

    /// Centre of a cell raised by the block offset.
    pub fn block_position(&self, index: GridIndex) -> Vec3 {
        self.to_world_position(index) + Vec3::Y * self.config.block_y_offset
    }

    /// Grid lines at ground level as `(start, end)` segments.
    ///
    /// Column boundaries come first (`width + 1` segments along Z), then row
    /// boundaries (`height + 1` segments along X).
    pub fn grid_lines(&self) -> Vec<(Vec3, Vec3)> {
        let GridBounds {
            x_min,
            z_min,
            y_level: y,
        } = self.bounds;
        let cell = self.config.cell_size;
        let extent = self.config.extent();

        let columns = (0..=self.config.width).map(|i| {
            let x = x_min + i as f32 * cell.x;
            (Vec3::new(x, y, z_min), Vec3::new(x, y, z_min + extent.y))
        });
        let rows = (0..=self.config.height).map(|i| {
            let z = z_min + i as f32 * cell.y;
            (Vec3::new(x_min, y, z), Vec3::new(x_min + extent.x, y, z))
        });

        columns.chain(rows).collect()
    }

    /// Centre and size of the wire box outlining `index`, if it is on the grid.
    pub fn cell_highlight(&self, index: GridIndex) -> Option<(Vec3, Vec3)> {
        if !self.contains(index) {
            return None;
        }
        let cell = self.config.cell_size;
        Some((
            self.to_world_position(index),
            Vec3::new(cell.x, CELL_HIGHLIGHT_HEIGHT, cell.y),
        ))
    }
}
