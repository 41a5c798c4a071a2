//! Placement Preview
//!
//! The single translucent renderable that follows the cursor cell to show
//! where a block would land.

use glam::Vec3;

use crate::render::{RenderTemplate, RenderableFactory, RenderableHandle};

/// Owned preview renderable and its visibility.
///
/// Not `Clone`: the renderable handle has a single owner.
#[derive(Debug)]
pub struct PreviewState {
    renderable: Option<RenderableHandle>,
    template: Option<RenderTemplate>,
    active: bool,
    /// Material alpha applied to every new preview, in [0, 1]
    alpha: f32,
}

impl PreviewState {
    pub fn new(alpha: f32) -> Self {
        Self {
            renderable: None,
            template: None,
            active: false,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    pub fn handle(&self) -> Option<RenderableHandle> {
        self.renderable
    }

    pub fn template(&self) -> Option<RenderTemplate> {
        self.template
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Swap the preview for a fresh instance of `template` (or none).
    ///
    /// The new renderable starts hidden at `position`; callers show it once
    /// the cursor has a cell.
    pub fn replace(
        &mut self,
        renderer: &mut impl RenderableFactory,
        template: Option<RenderTemplate>,
        position: Vec3,
    ) {
        self.release(renderer);

        let Some(template) = template else {
            return;
        };
        let handle = renderer.instantiate(template, position);
        if self.alpha < 1.0 && !renderer.set_alpha(handle, self.alpha) {
            tracing::debug!(?template, "preview template has no alpha material");
        }
        renderer.set_active(handle, false);
        self.renderable = Some(handle);
        self.template = Some(template);
        self.active = false;
    }

    /// Show the preview at `position`.
    pub fn show_at(&mut self, renderer: &mut impl RenderableFactory, position: Vec3) {
        let Some(handle) = self.renderable else {
            return;
        };
        if !self.active {
            renderer.set_active(handle, true);
            self.active = true;
        }
        renderer.set_position(handle, position);
    }

    /// Hide the preview without destroying it.
    pub fn hide(&mut self, renderer: &mut impl RenderableFactory) {
        let Some(handle) = self.renderable else {
            return;
        };
        if self.active {
            renderer.set_active(handle, false);
            self.active = false;
        }
    }

    /// Destroy the preview renderable, if any.
    pub fn release(&mut self, renderer: &mut impl RenderableFactory) {
        if let Some(handle) = self.renderable.take() {
            renderer.destroy(handle);
        }
        self.template = None;
        self.active = false;
    }
}
