//! Renderable Factory Interface
//!
//! The only boundary between the sandbox and whatever draws it. The sandbox
//! asks a factory for renderables built from templates, moves and hides them,
//! and must hand every one back through [`RenderableFactory::destroy`].

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque id of a visual template (mesh + material) known to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderTemplate(pub u32);

/// Opaque id of a live renderable, issued by a [`RenderableFactory`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderableHandle(u64);

impl RenderableHandle {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RenderableHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Creates and manipulates renderables in world space.
///
/// Handles passed back in must have come from `instantiate` on the same
/// factory and must not have been destroyed yet.
pub trait RenderableFactory {
    /// Spawn a renderable from `template` at `position`, active.
    fn instantiate(&mut self, template: RenderTemplate, position: Vec3) -> RenderableHandle;

    /// Release a renderable. The handle is invalid afterwards.
    fn destroy(&mut self, handle: RenderableHandle);

    fn set_position(&mut self, handle: RenderableHandle, position: Vec3);

    /// Show or hide a renderable without destroying it.
    fn set_active(&mut self, handle: RenderableHandle, active: bool);

    /// Set the material alpha.
    ///
    /// Returns `false` when the renderable has no alpha-capable material.
    fn set_alpha(&mut self, handle: RenderableHandle, alpha: f32) -> bool;
}

impl<F: RenderableFactory + ?Sized> RenderableFactory for &mut F {
    fn instantiate(&mut self, template: RenderTemplate, position: Vec3) -> RenderableHandle {
        (**self).instantiate(template, position)
    }

    fn destroy(&mut self, handle: RenderableHandle) {
        (**self).destroy(handle)
    }

    fn set_position(&mut self, handle: RenderableHandle, position: Vec3) {
        (**self).set_position(handle, position)
    }

    fn set_active(&mut self, handle: RenderableHandle, active: bool) {
        (**self).set_active(handle, active)
    }

    fn set_alpha(&mut self, handle: RenderableHandle, alpha: f32) -> bool {
        (**self).set_alpha(handle, alpha)
    }
}
