//! Sandbox Configuration
//!
//! Grid layout, preview look and key bindings for a sandbox session, loaded
//! from JSON. Every field has a default, so a config file only needs the
//! values it changes. `Default` matches a 10x10 grid of 1m cells with a
//! half-transparent preview.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::game::sandbox::{DEFAULT_PREVIEW_ALPHA, PlacementGate, PlacementSettings};
use crate::input::KeyCode;
use crate::world::{GridConfig, GridConfigError, GridGeometry};

/// Errors from loading or validating a [`SandboxConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid grid: {0}")]
    Grid(#[from] GridConfigError),
    #[error("preview alpha must be within [0, 1], got {0}")]
    PreviewAlpha(f32),
    #[error("anchor and ground positions must be finite")]
    NonFiniteReference,
}

/// Grid dimensions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridSection {
    /// Columns along world X
    pub width: u32,
    /// Rows along world Z
    pub height: u32,
    /// Cell extent along X and Z
    pub cell_size: Vec2,
}

impl Default for GridSection {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            cell_size: Vec2::ONE,
        }
    }
}

/// Debug drawing toggles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DebugSection {
    pub show_grid_lines: bool,
    pub highlight_cursor_cell: bool,
}

impl Default for DebugSection {
    fn default() -> Self {
        Self {
            show_grid_lines: true,
            highlight_cursor_cell: true,
        }
    }
}

/// Keys switching the demo between placing and removing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoBindings {
    pub place_mode: KeyCode,
    pub remove_mode: KeyCode,
}

impl Default for DemoBindings {
    fn default() -> Self {
        Self {
            place_mode: KeyCode::E,
            remove_mode: KeyCode::R,
        }
    }
}

/// Complete sandbox session configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SandboxConfig {
    pub grid: GridSection,
    /// Height of placed blocks above the ground level
    pub block_y_offset: f32,
    /// Alpha of the placement preview, in [0, 1]
    pub preview_alpha: f32,
    /// Grid centre when no ground reference is set
    pub anchor: Vec3,
    /// Ground reference position: grid centre and ground level
    pub ground: Option<Vec3>,
    pub placement_gate: PlacementGate,
    pub debug: DebugSection,
    pub bindings: DemoBindings,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            grid: GridSection::default(),
            block_y_offset: 0.0,
            preview_alpha: DEFAULT_PREVIEW_ALPHA,
            anchor: Vec3::ZERO,
            ground: None,
            placement_gate: PlacementGate::default(),
            debug: DebugSection::default(),
            bindings: DemoBindings::default(),
        }
    }
}

impl SandboxConfig {
    /// Parse and validate a config from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        tracing::info!(
            path = %path.display(),
            width = config.grid.width,
            height = config.grid.height,
            "loaded sandbox config"
        );
        Ok(config)
    }

    /// Check every value the grid and preview rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid_config()?;
        if !(0.0..=1.0).contains(&self.preview_alpha) {
            return Err(ConfigError::PreviewAlpha(self.preview_alpha));
        }
        let finite_ground = self.ground.is_none_or(|g| g.is_finite());
        if !self.anchor.is_finite() || !finite_ground {
            return Err(ConfigError::NonFiniteReference);
        }
        Ok(())
    }

    /// Validated grid configuration.
    pub fn grid_config(&self) -> Result<GridConfig, ConfigError> {
        let config = GridConfig::new(self.grid.width, self.grid.height, self.grid.cell_size)?
            .with_block_y_offset(self.block_y_offset)?;
        Ok(config)
    }

    /// Grid geometry for this session.
    pub fn geometry(&self) -> Result<GridGeometry, ConfigError> {
        self.validate()?;
        Ok(GridGeometry::new(self.grid_config()?, self.anchor, self.ground))
    }

    pub fn placement_settings(&self) -> PlacementSettings {
        PlacementSettings {
            preview_alpha: self.preview_alpha,
            gate: self.placement_gate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = SandboxConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.preview_alpha, 0.5);
        assert_eq!(config.placement_gate, PlacementGate::Cursor);
        assert_eq!(config.bindings.place_mode, KeyCode::E);
        assert_eq!(config.bindings.remove_mode, KeyCode::R);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SandboxConfig::from_json_str(
            r#"{
                "grid": { "width": 4, "cell_size": [2.0, 0.5] },
                "ground": [1.0, 3.0, -1.0],
                "placement_gate": "bounds"
            }"#,
        )
        .unwrap();
        assert_eq!(config.grid.width, 4);
        assert_eq!(config.grid.height, 10);
        assert_eq!(config.grid.cell_size, Vec2::new(2.0, 0.5));
        assert_eq!(config.ground, Some(Vec3::new(1.0, 3.0, -1.0)));
        assert_eq!(config.placement_gate, PlacementGate::Bounds);

        let geometry = config.geometry().unwrap();
        assert_eq!(geometry.bounds().x_min, -3.0); // 1 - 4*2/2
        assert_eq!(geometry.bounds().y_level, 3.0);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let err = SandboxConfig::from_json_str(r#"{ "grid": { "width": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Grid(GridConfigError::ZeroWidth)));

        let err = SandboxConfig::from_json_str(r#"{ "preview_alpha": 1.5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::PreviewAlpha(_)));

        let err = SandboxConfig::from_json_str(r#"{ "grid_size": 3 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_round_trip_through_json() {
        let mut config = SandboxConfig::default();
        config.block_y_offset = 0.25;
        config.debug.show_grid_lines = false;
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(SandboxConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        let err = SandboxConfig::load("/nonexistent/sandbox.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
