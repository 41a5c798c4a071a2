//! World Module
//!
//! World-space grid layout: where the placement grid sits and how positions
//! map onto its cells.

pub mod grid;

pub use grid::{GridBounds, GridConfig, GridConfigError, GridGeometry, GridIndex};
