//! In-Memory Scene
//!
//! A [`RenderableFactory`] that keeps every live renderable in a table instead
//! of drawing it. The demo binary and the tests use it to observe what the
//! sandbox spawned, where, and whether everything was released.

use glam::Vec3;
use std::collections::{BTreeMap, BTreeSet};

use super::renderable::{RenderTemplate, RenderableFactory, RenderableHandle};

/// State of one live renderable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneObject {
    pub template: RenderTemplate,
    pub position: Vec3,
    pub active: bool,
    pub alpha: f32,
}

/// Table of live renderables keyed by handle.
#[derive(Debug, Default)]
pub struct SceneRenderables {
    objects: BTreeMap<RenderableHandle, SceneObject>,
    /// Templates whose material has no alpha channel
    opaque_templates: BTreeSet<RenderTemplate>,
    next_handle: u64,
    spawned: usize,
    destroyed: usize,
}

impl SceneRenderables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `template` as having no alpha-capable material.
    pub fn with_opaque_template(mut self, template: RenderTemplate) -> Self {
        self.opaque_templates.insert(template);
        self
    }

    pub fn get(&self, handle: RenderableHandle) -> Option<&SceneObject> {
        self.objects.get(&handle)
    }

    pub fn contains(&self, handle: RenderableHandle) -> bool {
        self.objects.contains_key(&handle)
    }

    /// Live renderables in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (RenderableHandle, &SceneObject)> {
        self.objects.iter().map(|(h, o)| (*h, o))
    }

    /// Number of live renderables
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Total renderables ever instantiated
    pub fn spawned(&self) -> usize {
        self.spawned
    }

    /// Total renderables destroyed
    pub fn destroyed(&self) -> usize {
        self.destroyed
    }

    fn object_mut(&mut self, handle: RenderableHandle) -> Option<&mut SceneObject> {
        let object = self.objects.get_mut(&handle);
        if object.is_none() {
            tracing::warn!(%handle, "renderable not found");
        }
        object
    }
}

impl RenderableFactory for SceneRenderables {
    fn instantiate(&mut self, template: RenderTemplate, position: Vec3) -> RenderableHandle {
        let handle = RenderableHandle::new(self.next_handle);
        self.next_handle += 1;
        self.spawned += 1;
        self.objects.insert(
            handle,
            SceneObject {
                template,
                position,
                active: true,
                alpha: 1.0,
            },
        );
        handle
    }

    fn destroy(&mut self, handle: RenderableHandle) {
        if self.objects.remove(&handle).is_some() {
            self.destroyed += 1;
        } else {
            tracing::warn!(%handle, "destroy of unknown renderable");
        }
    }

    fn set_position(&mut self, handle: RenderableHandle, position: Vec3) {
        if let Some(object) = self.object_mut(handle) {
            object.position = position;
        }
    }

    fn set_active(&mut self, handle: RenderableHandle, active: bool) {
        if let Some(object) = self.object_mut(handle) {
            object.active = active;
        }
    }

    fn set_alpha(&mut self, handle: RenderableHandle, alpha: f32) -> bool {
        let opaque = match self.objects.get(&handle) {
            Some(object) => self.opaque_templates.contains(&object.template),
            None => return false,
        };
        if opaque {
            return false;
        }
        match self.object_mut(handle) {
            Some(object) => {
                object.alpha = alpha;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instantiate_and_destroy() {
        let mut scene = SceneRenderables::new();
        let a = scene.instantiate(RenderTemplate(1), Vec3::ONE);
        let b = scene.instantiate(RenderTemplate(2), Vec3::ZERO);
        assert_ne!(a, b);
        assert_eq!(scene.len(), 2);

        let object = scene.get(a).unwrap();
        assert_eq!(object.template, RenderTemplate(1));
        assert_eq!(object.position, Vec3::ONE);
        assert!(object.active);
        assert_eq!(object.alpha, 1.0);

        scene.destroy(a);
        assert!(!scene.contains(a));
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.spawned(), 2);
        assert_eq!(scene.destroyed(), 1);

        // Double destroy is ignored
        scene.destroy(a);
        assert_eq!(scene.destroyed(), 1);
    }

    #[test]
    fn test_transform_and_visibility() {
        let mut scene = SceneRenderables::new();
        let h = scene.instantiate(RenderTemplate(0), Vec3::ZERO);
        scene.set_position(h, Vec3::new(1.0, 2.0, 3.0));
        scene.set_active(h, false);
        let object = scene.get(h).unwrap();
        assert_eq!(object.position, Vec3::new(1.0, 2.0, 3.0));
        assert!(!object.active);
    }

    #[test]
    fn test_alpha_requires_material() {
        let mut scene = SceneRenderables::new().with_opaque_template(RenderTemplate(9));
        let glass = scene.instantiate(RenderTemplate(1), Vec3::ZERO);
        let stone = scene.instantiate(RenderTemplate(9), Vec3::ZERO);

        assert!(scene.set_alpha(glass, 0.25));
        assert_eq!(scene.get(glass).unwrap().alpha, 0.25);

        assert!(!scene.set_alpha(stone, 0.25));
        assert_eq!(scene.get(stone).unwrap().alpha, 1.0);

        scene.destroy(glass);
        assert!(!scene.set_alpha(glass, 0.5));
    }
}
