//! Placement Store
//!
//! Authoritative list of placed blocks. Insertion order is kept so iteration
//! is deterministic; cells are looked up by linear scan, which is fine at
//! sandbox grid sizes.

use glam::Vec3;
use std::rc::Rc;

use super::block::BlockDefinition;
use crate::render::{BlockInstance, INSTANCE_FLAG_DESTRUCTIBLE, RenderableHandle};
use crate::world::GridIndex;

/// A live block bound to one cell.
///
/// Not `Clone`: the renderable handle has a single owner.
#[derive(Debug)]
pub struct PlacedBlock {
    pub definition: Rc<BlockDefinition>,
    pub renderable: RenderableHandle,
    pub index: GridIndex,
    /// World position the renderable was spawned at
    pub position: Vec3,
}

impl PlacedBlock {
    pub fn is_destructible(&self) -> bool {
        self.definition.destructible
    }

    /// Instance record for batched drawing.
    pub fn instance(&self) -> BlockInstance {
        BlockInstance {
            position: self.position.to_array(),
            template: self.definition.template.0,
            grid: [self.index.row, self.index.col],
            flags: if self.is_destructible() {
                INSTANCE_FLAG_DESTRUCTIBLE
            } else {
                0
            },
            _pad0: 0,
        }
    }
}

/// Placed blocks in insertion order.
///
/// The store only tracks entries; releasing renderables is the job of
/// whoever takes blocks out of it.
#[derive(Debug, Default)]
pub struct PlacementStore {
    blocks: Vec<PlacedBlock>,
    /// Whether instance data needs re-upload
    instances_dirty: bool,
}

impl PlacementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All placed blocks in insertion order.
    pub fn blocks(&self) -> &[PlacedBlock] {
        &self.blocks
    }

    /// `(cell, renderable)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (GridIndex, RenderableHandle)> + '_ {
        self.blocks.iter().map(|b| (b.index, b.renderable))
    }

    /// Blocks occupying `index`.
    pub fn blocks_at(&self, index: GridIndex) -> impl Iterator<Item = &PlacedBlock> {
        self.blocks.iter().filter(move |b| b.index == index)
    }

    pub fn is_occupied(&self, index: GridIndex) -> bool {
        self.blocks_at(index).next().is_some()
    }

    /// Whether any block at `index` is permanent.
    pub fn any_indestructible_at(&self, index: GridIndex) -> bool {
        self.blocks_at(index).any(|b| !b.is_destructible())
    }

    pub fn insert(&mut self, block: PlacedBlock) {
        self.blocks.push(block);
        self.instances_dirty = true;
    }

    /// Remove every block at `index`, keeping the order of the rest.
    pub fn take_at(&mut self, index: GridIndex) -> Vec<PlacedBlock> {
        if !self.is_occupied(index) {
            return Vec::new();
        }
        let (taken, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.blocks)
            .into_iter()
            .partition(|b| b.index == index);
        self.blocks = kept;
        self.instances_dirty = true;
        taken
    }

    /// Remove every block.
    pub fn drain(&mut self) -> Vec<PlacedBlock> {
        if !self.blocks.is_empty() {
            self.instances_dirty = true;
        }
        std::mem::take(&mut self.blocks)
    }

    /// Apply `f` to every block, e.g. to re-seat them after the grid moved.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(&mut PlacedBlock)) {
        for block in &mut self.blocks {
            f(block);
        }
        self.instances_dirty = true;
    }

    /// Instance records for all blocks, in insertion order.
    pub fn instances(&self) -> Vec<BlockInstance> {
        self.blocks.iter().map(PlacedBlock::instance).collect()
    }

    /// Check if instance data needs re-upload
    pub fn needs_instance_update(&self) -> bool {
        self.instances_dirty
    }

    /// Clear the dirty flag
    pub fn clear_dirty(&mut self) {
        self.instances_dirty = false;
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
