//! Sandbox System
//!
//! Ties the grid geometry, placement store, cursor cache and preview together
//! behind the calls a host makes once per tick:
//!
//! 1. [`SandboxSystem::update_cursor_index`] (or [`SandboxSystem::step`])
//! 2. [`SandboxSystem::update_preview_position`]
//! 3. [`SandboxSystem::set_block`] / [`SandboxSystem::remove_block`]
//!
//! Placement validity depends on the cursor resolved in step 1, so it must
//! run first in each tick.
//!
//! ## Threading
//! Not thread-safe: definitions are shared through `Rc` and all state is
//! mutated without locking. Hosts driving it from several threads must
//! serialize every call.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use thiserror::Error;

use super::block::BlockDefinition;
use super::cursor::CursorCache;
use super::preview::PreviewState;
use super::store::{PlacedBlock, PlacementStore};
use crate::camera::{CameraProvider, GroundPlane, raycast_to_ground};
use crate::game::config::{ConfigError, SandboxConfig};
use crate::render::{BlockInstance, RenderTemplate, RenderableFactory, RenderableHandle};
use crate::world::{GridGeometry, GridIndex};

/// Default alpha of the placement preview.
pub const DEFAULT_PREVIEW_ALPHA: f32 = 0.5;

/// What a placement or removal must satisfy besides cell occupancy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementGate {
    /// Refuse while the cursor is not over a cell, whatever the target index.
    #[default]
    Cursor,
    /// Only check that the target index lies on the grid.
    Bounds,
}

/// Why a placement or removal was refused. State is unchanged in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("cursor is not over a grid cell")]
    NoCursorCell,
    #[error("cell {0} is outside the grid")]
    OutOfBounds(GridIndex),
    #[error("cell {0} holds an indestructible block")]
    Indestructible(GridIndex),
}

/// Blocks taken off a cell by a successful placement or removal.
pub type RemovedBlocks = Vec<Rc<BlockDefinition>>;

/// Tunables for placement and preview.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementSettings {
    pub preview_alpha: f32,
    pub gate: PlacementGate,
}

impl Default for PlacementSettings {
    fn default() -> Self {
        Self {
            preview_alpha: DEFAULT_PREVIEW_ALPHA,
            gate: PlacementGate::default(),
        }
    }
}

/// Grid placement controller.
///
/// Owns the renderer handle it spawns blocks through and releases every
/// renderable it created on teardown (explicitly or on drop).
pub struct SandboxSystem<R: RenderableFactory> {
    renderer: R,
    geometry: GridGeometry,
    ground_plane: GroundPlane,
    store: PlacementStore,
    cursor: CursorCache,
    preview: PreviewState,
    gate: PlacementGate,
}

impl<R: RenderableFactory> SandboxSystem<R> {
    /// Create a system drawing through `renderer`.
    pub fn new(renderer: R, geometry: GridGeometry, settings: PlacementSettings) -> Self {
        let ground_plane = GroundPlane::horizontal(geometry.center());
        Self {
            renderer,
            geometry,
            ground_plane,
            store: PlacementStore::new(),
            cursor: CursorCache::new(),
            preview: PreviewState::new(settings.preview_alpha),
            gate: settings.gate,
        }
    }

    /// Create a system from a validated configuration.
    pub fn from_config(renderer: R, config: &SandboxConfig) -> Result<Self, ConfigError> {
        let geometry = config.geometry()?;
        Ok(Self::new(renderer, geometry, config.placement_settings()))
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn ground_plane(&self) -> GroundPlane {
        self.ground_plane
    }

    pub fn store(&self) -> &PlacementStore {
        &self.store
    }

    pub fn preview(&self) -> &PreviewState {
        &self.preview
    }

    pub fn gate(&self) -> PlacementGate {
        self.gate
    }

    /// Cell under the cursor as of the last update.
    pub fn cursor_index(&self) -> Option<GridIndex> {
        self.cursor.index()
    }

    /// Cell under the cursor, with [`GridIndex::SENTINEL`] for none.
    pub fn cursor_index_raw(&self) -> GridIndex {
        GridIndex::from_option(self.cursor.index())
    }

    /// `(cell, renderable)` for every placed block, in placement order.
    pub fn all_blocks(&self) -> impl Iterator<Item = (GridIndex, RenderableHandle)> + '_ {
        self.store.iter()
    }

    /// Instance records for every placed block, in placement order.
    pub fn block_instances(&self) -> Vec<BlockInstance> {
        self.store.instances()
    }

    /// Instance records to re-upload, if blocks changed since the last call.
    pub fn take_dirty_instances(&mut self) -> Option<Vec<BlockInstance>> {
        if !self.store.needs_instance_update() {
            return None;
        }
        self.store.clear_dirty();
        Some(self.store.instances())
    }

    pub fn x_min(&self) -> f32 {
        self.geometry.bounds().x_min
    }

    pub fn z_min(&self) -> f32 {
        self.geometry.bounds().z_min
    }

    pub fn y_level(&self) -> f32 {
        self.geometry.bounds().y_level
    }

    /// Centre of `index` at ground level (no block offset).
    pub fn grid_index_to_world_position(&self, index: GridIndex) -> Vec3 {
        self.geometry.to_world_position(index)
    }

    /// Grid line segments for debug drawing.
    pub fn grid_lines(&self) -> Vec<(Vec3, Vec3)> {
        self.geometry.grid_lines()
    }

    /// Centre and size of the cursor cell outline, if the cursor is on the grid.
    pub fn cursor_highlight(&self) -> Option<(Vec3, Vec3)> {
        self.cursor
            .index()
            .and_then(|index| self.geometry.cell_highlight(index))
    }

    // ------------------------------------------------------------------
    // Grid references
    // ------------------------------------------------------------------

    /// Move or clear the ground reference.
    ///
    /// Bounds and the ray-cast plane follow, and placed blocks and the preview
    /// are re-seated on their cells. The cached cursor cell is kept until the
    /// camera or pointer moves, or an update is forced.
    pub fn set_ground(&mut self, ground: Option<Vec3>) {
        self.geometry.set_ground(ground);
        self.on_reference_changed();
    }

    /// Move the sandbox anchor used when no ground reference is set.
    pub fn set_anchor(&mut self, anchor: Vec3) {
        self.geometry.set_anchor(anchor);
        self.on_reference_changed();
    }

    fn on_reference_changed(&mut self) {
        self.ground_plane = GroundPlane::horizontal(self.geometry.center());

        let geometry = &self.geometry;
        let renderer = &mut self.renderer;
        self.store.for_each_mut(|block| {
            block.position = geometry.block_position(block.index);
            renderer.set_position(block.renderable, block.position);
        });
        self.update_preview_position();

        tracing::debug!(bounds = ?self.geometry.bounds(), "grid references changed");
    }

    // ------------------------------------------------------------------
    // Cursor and preview
    // ------------------------------------------------------------------

    /// Resolve the cell under the pointer.
    ///
    /// The ray cast only runs when the camera position, camera forward or
    /// pointer differ from the cached values, or when `force` is set;
    /// otherwise the cached cell is returned as is. A ray that misses the
    /// ground plane resolves as the world origin.
    pub fn update_cursor_index<C: CameraProvider + ?Sized>(
        &mut self,
        camera: &C,
        pointer: Vec2,
        force: bool,
    ) -> Option<GridIndex> {
        let position = camera.position();
        let forward = camera.forward();
        if !force && !self.cursor.is_stale(position, forward, pointer) {
            return self.cursor.index();
        }

        let world = raycast_to_ground(camera, pointer, &self.ground_plane).unwrap_or(Vec3::ZERO);
        let index = self.geometry.to_grid_index(world);

        if index != self.cursor.index() {
            tracing::debug!(?index, "cursor cell changed");
        }
        self.cursor.store(position, forward, pointer, index);
        index
    }

    /// Move the preview onto the cursor cell, or hide it when there is none.
    pub fn update_preview_position(&mut self) {
        if self.preview.handle().is_none() {
            return;
        }
        match self.cursor.index() {
            Some(index) => {
                let position = self.geometry.block_position(index);
                self.preview.show_at(&mut self.renderer, position);
            }
            None => self.preview.hide(&mut self.renderer),
        }
    }

    /// Replace the preview with an instance of `template`, or remove it.
    pub fn set_preview_template(&mut self, template: Option<RenderTemplate>) {
        let spawn_at = self.geometry.center();
        self.preview.replace(&mut self.renderer, template, spawn_at);
        self.update_preview_position();
    }

    /// Preview the given block definition, or remove the preview.
    pub fn set_preview_block(&mut self, definition: Option<&BlockDefinition>) {
        self.set_preview_template(definition.map(|d| d.template));
    }

    /// Per-tick update: resolve the cursor, then move the preview.
    pub fn step<C: CameraProvider + ?Sized>(
        &mut self,
        camera: &C,
        pointer: Vec2,
    ) -> Option<GridIndex> {
        let index = self.update_cursor_index(camera, pointer, false);
        self.update_preview_position();
        index
    }

    // ------------------------------------------------------------------
    // Placement
    // ------------------------------------------------------------------

    /// Place `definition` on `index`.
    ///
    /// Destructible occupants are removed first and returned; an
    /// indestructible occupant refuses the placement.
    pub fn set_block(
        &mut self,
        definition: &Rc<BlockDefinition>,
        index: GridIndex,
    ) -> Result<RemovedBlocks, PlacementError> {
        self.check_target(index)?;

        let removed = self.clear_cell(index);
        let position = self.geometry.block_position(index);
        let renderable = self.renderer.instantiate(definition.template, position);
        self.store.insert(PlacedBlock {
            definition: Rc::clone(definition),
            renderable,
            index,
            position,
        });

        tracing::info!(
            block = %definition.name,
            %index,
            replaced = removed.len(),
            "placed block"
        );
        Ok(removed)
    }

    /// Remove every block on `index`.
    ///
    /// An empty cell succeeds with nothing removed; an indestructible
    /// occupant refuses the removal.
    pub fn remove_block(&mut self, index: GridIndex) -> Result<RemovedBlocks, PlacementError> {
        self.check_target(index)?;

        let removed = self.clear_cell(index);
        if !removed.is_empty() {
            tracing::info!(%index, removed = removed.len(), "removed blocks");
        }
        Ok(removed)
    }

    fn check_target(&self, index: GridIndex) -> Result<(), PlacementError> {
        if self.gate == PlacementGate::Cursor && self.cursor.index().is_none() {
            return Err(PlacementError::NoCursorCell);
        }
        if !self.geometry.contains(index) {
            return Err(PlacementError::OutOfBounds(index));
        }
        if self.store.any_indestructible_at(index) {
            return Err(PlacementError::Indestructible(index));
        }
        Ok(())
    }

    /// Take every block off `index` and release their renderables.
    fn clear_cell(&mut self, index: GridIndex) -> RemovedBlocks {
        self.store
            .take_at(index)
            .into_iter()
            .map(|block| {
                self.renderer.destroy(block.renderable);
                block.definition
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Teardown
    // ------------------------------------------------------------------

    /// Destroy every placed block and the preview.
    ///
    /// Safe to call more than once; also runs on drop.
    pub fn teardown(&mut self) {
        let blocks = self.store.drain();
        let count = blocks.len();
        for block in blocks {
            self.renderer.destroy(block.renderable);
        }
        self.preview.release(&mut self.renderer);
        if count > 0 {
            tracing::debug!(blocks = count, "sandbox torn down");
        }
    }
}

impl<R: RenderableFactory> Drop for SandboxSystem<R> {
    fn drop(&mut self) {
        self.teardown();
    }
}
