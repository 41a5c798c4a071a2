//! Sandbox Grid Engine Library
//!
//! Place and remove blocks on a bounded planar grid in a 3D world, driven by
//! the cursor, with a live preview of where the next block lands.
//!
//! # Modules
//!
//! - [`world`] - Grid geometry: world position <-> `(row, col)` cell mapping
//! - [`camera`] - Camera provider and cursor ray casting onto the ground plane
//! - [`render`] - Renderable factory interface, in-memory scene, instance records
//! - [`input`] - Per-tick input snapshot
//! - [`game`] - Placement store and controller, configuration, demo driver
//!
//! # Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use glam::Vec2;
//! use sandbox_grid_engine::camera::PerspectiveCamera;
//! use sandbox_grid_engine::game::{BlockDefinition, SandboxConfig, SandboxSystem};
//! use sandbox_grid_engine::render::{RenderTemplate, SceneRenderables};
//!
//! let config = SandboxConfig::default();
//! let mut sandbox = SandboxSystem::from_config(SceneRenderables::new(), &config)?;
//! let dirt = Rc::new(BlockDefinition::new("dirt", RenderTemplate(1)));
//! sandbox.set_preview_block(Some(&dirt));
//!
//! // Once per frame
//! let camera = PerspectiveCamera::default();
//! if let Some(cell) = sandbox.step(&camera, Vec2::new(960.0, 540.0)) {
//!     let removed = sandbox.set_block(&dirt, cell)?;
//! }
//! ```

pub mod camera;
pub mod input;
pub mod render;
pub mod world;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export world types for convenience
pub use world::{GridBounds, GridConfig, GridGeometry, GridIndex};
// Re-export commonly used camera and input types
pub use camera::{CameraProvider, PerspectiveCamera};
pub use input::{InputSnapshot, KeyCode};
