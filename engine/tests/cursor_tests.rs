//! Cursor Tests - Cursor Cache and Preview Tracking
//!
//! Tests for the dirty-checked cursor resolve and for the preview following
//! the cursor cell.

use std::cell::Cell;

use glam::{Vec2, Vec3};
use sandbox_grid_engine::camera::{CameraProvider, PerspectiveCamera, Ray};
use sandbox_grid_engine::game::{PlacementSettings, SandboxSystem};
use sandbox_grid_engine::render::{RenderTemplate, SceneRenderables};
use sandbox_grid_engine::world::{GridConfig, GridGeometry, GridIndex};

const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);
const CENTER: Vec2 = Vec2::new(400.0, 300.0);

/// Camera wrapper counting how many rays were cast through it.
struct CountingCamera {
    inner: PerspectiveCamera,
    rays: Cell<usize>,
}

impl CountingCamera {
    fn over(target: Vec3) -> Self {
        Self {
            inner: PerspectiveCamera::new(target + Vec3::Y * 10.0, Vec3::NEG_Y, 1.0, VIEWPORT),
            rays: Cell::new(0),
        }
    }
}

impl CameraProvider for CountingCamera {
    fn position(&self) -> Vec3 {
        self.inner.position()
    }

    fn forward(&self) -> Vec3 {
        self.inner.forward()
    }

    fn screen_point_to_ray(&self, screen: Vec2) -> Ray {
        self.rays.set(self.rays.get() + 1);
        self.inner.screen_point_to_ray(screen)
    }
}

fn origin_grid(scene: &mut SceneRenderables) -> SandboxSystem<&mut SceneRenderables> {
    let geometry = GridGeometry::new(GridConfig::default(), Vec3::ZERO, Some(Vec3::ZERO));
    SandboxSystem::new(scene, geometry, PlacementSettings::default())
}

// ============================================================================
// Cursor cache
// ============================================================================

#[test]
fn test_unchanged_inputs_skip_raycast() {
    let mut scene = SceneRenderables::new();
    let mut system = origin_grid(&mut scene);
    let camera = CountingCamera::over(Vec3::new(-4.5, 0.0, -4.5));

    let first = system.update_cursor_index(&camera, CENTER, false);
    let second = system.update_cursor_index(&camera, CENTER, false);
    assert_eq!(first, Some(GridIndex::new(0, 0)));
    assert_eq!(first, second);
    assert_eq!(camera.rays.get(), 1);
}

#[test]
fn test_force_always_recomputes() {
    let mut scene = SceneRenderables::new();
    let mut system = origin_grid(&mut scene);
    let camera = CountingCamera::over(Vec3::new(2.5, 0.0, 1.5));

    system.update_cursor_index(&camera, CENTER, false);
    system.update_cursor_index(&camera, CENTER, true);
    system.update_cursor_index(&camera, CENTER, true);
    assert_eq!(camera.rays.get(), 3);
    assert_eq!(system.cursor_index(), Some(GridIndex::new(6, 7)));
}

#[test]
fn test_pointer_move_recomputes() {
    let mut scene = SceneRenderables::new();
    let mut system = origin_grid(&mut scene);
    let camera = CountingCamera::over(Vec3::ZERO);

    system.update_cursor_index(&camera, CENTER, false);
    system.update_cursor_index(&camera, CENTER + Vec2::new(1.0, 0.0), false);
    assert_eq!(camera.rays.get(), 2);
}

#[test]
fn test_cache_survives_ground_move() {
    let mut scene = SceneRenderables::new();
    let mut system = origin_grid(&mut scene);
    let camera = CountingCamera::over(Vec3::new(-4.5, 0.0, -4.5));

    assert_eq!(
        system.update_cursor_index(&camera, CENTER, false),
        Some(GridIndex::new(0, 0))
    );

    // Grid now spans x/z in [95, 105); the camera still looks at (-4.5, -4.5)
    system.set_ground(Some(Vec3::new(100.0, 0.0, 100.0)));
    assert_eq!(
        system.update_cursor_index(&camera, CENTER, false),
        Some(GridIndex::new(0, 0))
    );
    assert_eq!(camera.rays.get(), 1);

    assert_eq!(system.update_cursor_index(&camera, CENTER, true), None);
    assert!(system.cursor_index_raw().is_sentinel());
}

#[test]
fn test_highlight_tracks_cursor() {
    let mut scene = SceneRenderables::new();
    let mut system = origin_grid(&mut scene);
    assert!(system.cursor_highlight().is_none());

    let camera = PerspectiveCamera::new(Vec3::new(0.5, 10.0, 0.5), Vec3::NEG_Y, 1.0, VIEWPORT);
    system.update_cursor_index(&camera, CENTER, false);
    let (center, size) = system.cursor_highlight().unwrap();
    assert!(center.abs_diff_eq(Vec3::new(0.5, 0.0, 0.5), 1e-5));
    assert!((size.x - 1.0).abs() < 1e-5);
    assert!((size.z - 1.0).abs() < 1e-5);
}

// ============================================================================
// Preview
// ============================================================================

#[test]
fn test_preview_follows_cursor() {
    let mut scene = SceneRenderables::new();
    let mut system = origin_grid(&mut scene);
    system.set_preview_template(Some(RenderTemplate(4)));

    let handle = system.preview().handle().unwrap();
    assert!(!system.preview().is_active());
    assert_eq!(system.renderer().get(handle).unwrap().alpha, 0.5);

    let over_cell = PerspectiveCamera::new(Vec3::new(3.5, 10.0, -1.5), Vec3::NEG_Y, 1.0, VIEWPORT);
    assert_eq!(system.step(&over_cell, CENTER), Some(GridIndex::new(3, 8)));
    let object = system.renderer().get(handle).unwrap();
    assert!(object.active);
    assert_eq!(object.position, Vec3::new(3.5, 0.0, -1.5));

    let off_grid = PerspectiveCamera::new(Vec3::new(30.0, 10.0, 0.0), Vec3::NEG_Y, 1.0, VIEWPORT);
    assert_eq!(system.step(&off_grid, CENTER), None);
    assert!(!system.renderer().get(handle).unwrap().active);
    assert!(!system.preview().is_active());
}

#[test]
fn test_preview_swap_releases_previous() {
    let mut scene = SceneRenderables::new();
    let mut system = origin_grid(&mut scene);
    system.set_preview_template(Some(RenderTemplate(1)));
    let first = system.preview().handle().unwrap();

    system.set_preview_template(Some(RenderTemplate(2)));
    let second = system.preview().handle().unwrap();
    assert_ne!(first, second);
    assert!(!system.renderer().contains(first));
    assert_eq!(system.renderer().len(), 1);

    system.set_preview_template(None);
    assert!(system.preview().handle().is_none());
    assert!(system.renderer().is_empty());
}

#[test]
fn test_opaque_preview_keeps_full_alpha() {
    let mut scene = SceneRenderables::new().with_opaque_template(RenderTemplate(8));
    let mut system = origin_grid(&mut scene);
    system.set_preview_template(Some(RenderTemplate(8)));

    let handle = system.preview().handle().unwrap();
    assert_eq!(system.renderer().get(handle).unwrap().alpha, 1.0);
}

#[test]
fn test_full_alpha_setting_leaves_material() {
    let mut scene = SceneRenderables::new();
    let geometry = GridGeometry::new(GridConfig::default(), Vec3::ZERO, None);
    let settings = PlacementSettings {
        preview_alpha: 1.0,
        ..Default::default()
    };
    let mut system = SandboxSystem::new(&mut scene, geometry, settings);
    system.set_preview_template(Some(RenderTemplate(5)));

    assert_eq!(system.preview().alpha(), 1.0);
    let handle = system.preview().handle().unwrap();
    assert_eq!(system.renderer().get(handle).unwrap().alpha, 1.0);
}
