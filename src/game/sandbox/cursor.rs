//! Cursor Cache
//!
//! Remembers the camera and pointer state the cursor cell was last resolved
//! from, so the ray cast only reruns when one of them moves.

use glam::{Vec2, Vec3};

use crate::world::GridIndex;

/// Per-component tolerance when comparing against cached inputs.
pub const CURSOR_CACHE_EPSILON: f32 = 1e-5;

/// Last-resolved cursor state.
#[derive(Debug, Clone, Default)]
pub struct CursorCache {
    camera_position: Vec3,
    camera_forward: Vec3,
    pointer: Vec2,
    index: Option<GridIndex>,
    /// False until the first resolve
    primed: bool,
}

impl CursorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cell the cursor resolved to last time, if any.
    pub fn index(&self) -> Option<GridIndex> {
        self.index
    }

    pub fn camera_position(&self) -> Vec3 {
        self.camera_position
    }

    pub fn camera_forward(&self) -> Vec3 {
        self.camera_forward
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Whether the given inputs differ from the cached ones.
    pub fn is_stale(&self, camera_position: Vec3, camera_forward: Vec3, pointer: Vec2) -> bool {
        !self.primed
            || !self
                .camera_position
                .abs_diff_eq(camera_position, CURSOR_CACHE_EPSILON)
            || !self
                .camera_forward
                .abs_diff_eq(camera_forward, CURSOR_CACHE_EPSILON)
            || !self.pointer.abs_diff_eq(pointer, CURSOR_CACHE_EPSILON)
    }

    /// Record a fresh resolve.
    pub fn store(
        &mut self,
        camera_position: Vec3,
        camera_forward: Vec3,
        pointer: Vec2,
        index: Option<GridIndex>,
    ) {
        self.camera_position = camera_position;
        self.camera_forward = camera_forward;
        self.pointer = pointer;
        self.index = index;
        self.primed = true;
    }
}
