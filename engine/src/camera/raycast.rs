//! Raycast Module
//!
//! Casts rays from a camera through a screen point and intersects them with
//! the ground plane the grid lies on.

use glam::{Vec2, Vec3};

/// Rays closer to parallel than this never hit a plane.
const PARALLEL_EPSILON: f32 = 1e-6;

/// Squared length of `forward x Y` below which the camera looks straight up/down.
const VERTICAL_LOOK_EPSILON: f32 = 1e-10;

/// A half-line in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Normalized direction
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing `direction`.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray.
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Infinite plane through `point` with the given `normal`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundPlane {
    pub point: Vec3,
    pub normal: Vec3,
}

impl GroundPlane {
    /// Horizontal plane (normal +Y) through `point`.
    pub fn horizontal(point: Vec3) -> Self {
        Self {
            point,
            normal: Vec3::Y,
        }
    }

    /// Distance along `ray` to the plane.
    ///
    /// # Returns
    /// * `Some(t)` - The ray hits the plane at `ray.point_at(t)`, `t >= 0`
    /// * `None` - The ray is parallel to the plane or the plane is behind it
    pub fn raycast(&self, ray: &Ray) -> Option<f32> {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = (self.point - ray.origin).dot(self.normal) / denom;
        if t < 0.0 {
            return None;
        }
        Some(t)
    }
}

/// Source of camera state for cursor ray casting.
pub trait CameraProvider {
    /// Camera position in world space
    fn position(&self) -> Vec3;
    /// Normalized viewing direction
    fn forward(&self) -> Vec3;
    /// World-space ray through a screen point given in pixels
    fn screen_point_to_ray(&self, screen: Vec2) -> Ray;
}

/// Pinhole camera with a vertical field of view.
///
/// Screen points are pixels with the origin at the bottom-left of the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    forward: Vec3,
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Viewport size in pixels
    pub viewport: Vec2,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 10.0, -10.0),
            forward: Vec3::new(0.0, -1.0, 1.0).normalize(),
            fov_y: 60f32.to_radians(),
            viewport: Vec2::new(1920.0, 1080.0),
        }
    }
}

impl PerspectiveCamera {
    /// Create a camera at `position` looking along `forward`.
    pub fn new(position: Vec3, forward: Vec3, fov_y: f32, viewport: Vec2) -> Self {
        Self {
            position,
            forward: forward.try_normalize().unwrap_or(Vec3::NEG_Z),
            fov_y,
            viewport: viewport.max(Vec2::ONE),
        }
    }

    /// Create a camera at `position` looking at `target`.
    pub fn looking_at(position: Vec3, target: Vec3, fov_y: f32, viewport: Vec2) -> Self {
        Self::new(position, target - position, fov_y, viewport)
    }

    /// Point the camera along a new direction.
    pub fn set_forward(&mut self, forward: Vec3) {
        if let Some(dir) = forward.try_normalize() {
            self.forward = dir;
        }
    }

    /// Screen centre in pixels.
    pub fn screen_center(&self) -> Vec2 {
        self.viewport * 0.5
    }

    /// Camera basis vectors `(right, up)` for the current forward.
    fn basis(&self) -> (Vec3, Vec3) {
        let side = self.forward.cross(Vec3::Y);
        if side.length_squared() < VERTICAL_LOOK_EPSILON {
            // Exactly vertical - use world X as reference
            let right = Vec3::X;
            let up = right.cross(self.forward).normalize();
            (right, up)
        } else {
            let right = side.normalize();
            let up = right.cross(self.forward);
            (right, up)
        }
    }
}

impl CameraProvider for PerspectiveCamera {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn forward(&self) -> Vec3 {
        self.forward
    }

    fn screen_point_to_ray(&self, screen: Vec2) -> Ray {
        let ndc = screen / self.viewport * 2.0 - Vec2::ONE;
        let aspect = self.viewport.x / self.viewport.y;
        let half_fov = (self.fov_y * 0.5).tan();
        let (right, up) = self.basis();

        let direction =
            self.forward + right * (ndc.x * aspect * half_fov) + up * (ndc.y * half_fov);
        Ray::new(self.position, direction)
    }
}

/// Cast a ray through `screen` and intersect it with `plane`.
///
/// # Returns
/// * `Some(Vec3)` - The hit point on the plane
/// * `None` - The ray misses (parallel or pointing away)
pub fn raycast_to_ground<C: CameraProvider + ?Sized>(
    camera: &C,
    screen: Vec2,
    plane: &GroundPlane,
) -> Option<Vec3> {
    let ray = camera.screen_point_to_ray(screen);
    plane.raycast(&ray).map(|t| ray.point_at(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn top_down(position: Vec3) -> PerspectiveCamera {
        PerspectiveCamera::new(position, Vec3::NEG_Y, 1.2, Vec2::new(800.0, 600.0))
    }

    #[test]
    fn test_plane_hit_straight_down() {
        let plane = GroundPlane::horizontal(Vec3::ZERO);
        let ray = Ray::new(Vec3::new(1.0, 5.0, 2.0), Vec3::NEG_Y);
        let t = plane.raycast(&ray).unwrap();
        assert!((t - 5.0).abs() < 1e-5);
        assert!(ray.point_at(t).abs_diff_eq(Vec3::new(1.0, 0.0, 2.0), 1e-5));
    }

    #[test]
    fn test_plane_miss_parallel_and_behind() {
        let plane = GroundPlane::horizontal(Vec3::ZERO);
        let parallel = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::X);
        assert_eq!(plane.raycast(&parallel), None);

        let away = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::Y);
        assert_eq!(plane.raycast(&away), None);
    }

    #[test]
    fn test_elevated_plane() {
        let plane = GroundPlane::horizontal(Vec3::new(100.0, 2.0, -40.0));
        let ray = Ray::new(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y);
        let t = plane.raycast(&ray).unwrap();
        assert!((t - 8.0).abs() < 1e-5);
    }

    #[test]
    fn test_screen_center_ray_follows_forward() {
        let camera = PerspectiveCamera::looking_at(
            Vec3::new(0.0, 5.0, 10.0),
            Vec3::ZERO,
            1.2,
            Vec2::new(1280.0, 720.0),
        );
        let ray = camera.screen_point_to_ray(camera.screen_center());
        assert!(ray.direction.abs_diff_eq(camera.forward(), 1e-5));
    }

    #[test]
    fn test_screen_rays_normalized() {
        let camera = PerspectiveCamera::default();
        for x in [0.0, 480.0, 960.0, 1920.0] {
            for y in [0.0, 540.0, 1080.0] {
                let ray = camera.screen_point_to_ray(Vec2::new(x, y));
                assert!(
                    (ray.direction.length() - 1.0).abs() < 1e-4,
                    "Ray should be normalized, got length {}",
                    ray.direction.length()
                );
            }
        }
    }

    #[test]
    fn test_screen_right_maps_to_world_right() {
        let camera = top_down(Vec3::new(0.0, 10.0, 0.0));
        let plane = GroundPlane::horizontal(Vec3::ZERO);
        let center = raycast_to_ground(&camera, camera.screen_center(), &plane).unwrap();
        assert!(center.abs_diff_eq(Vec3::ZERO, 1e-4));

        let right = raycast_to_ground(&camera, Vec2::new(800.0, 300.0), &plane).unwrap();
        assert!(right.x > 0.0);
        assert!(right.z.abs() < 1e-4);
    }

    #[test]
    fn test_near_vertical_tilt_is_continuous() {
        let plane = GroundPlane::horizontal(Vec3::ZERO);
        let pointer = Vec2::new(700.0, 300.0);
        let mut previous: Option<f32> = None;

        for step in 1..=30 {
            let tilt = step as f32 * 0.01;
            let mut camera = top_down(Vec3::new(0.0, 10.0, 0.0));
            camera.set_forward(Vec3::new(0.0, -1.0, tilt));

            let hit = raycast_to_ground(&camera, pointer, &plane).unwrap();
            // Looking toward +Z, screen right is world -X
            assert!(hit.x < 0.0, "tilt {tilt}: hit x {} flipped sides", hit.x);
            if let Some(prev) = previous {
                assert!(
                    (hit.x - prev).abs() < 0.5,
                    "tilt {tilt}: hit jumped from {prev} to {}",
                    hit.x
                );
            }
            previous = Some(hit.x);
        }
    }

    #[test]
    fn test_degenerate_forward_falls_back() {
        let camera = PerspectiveCamera::new(Vec3::ZERO, Vec3::ZERO, 1.0, Vec2::ZERO);
        assert_eq!(camera.forward(), Vec3::NEG_Z);
        assert_eq!(camera.viewport, Vec2::ONE);
    }
}
