//! Desktop viewpoint and mouse picking ray.

use bevy_ecs::prelude::Resource;
use raylib::math::Vector3;

use crate::resources::input::PointerRay;

/// Perspective camera used on the desktop. The presentation renders with
/// the same values so that picking matches what is on screen.
#[derive(Resource, Debug, Clone, Copy)]
pub struct DesktopCamera {
    pub position: Vector3,
    pub target: Vector3,
    pub up: Vector3,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Viewport width / height.
    pub aspect: f32,
}

impl Default for DesktopCamera {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 12.0, 15.0),
            target: Vector3::zero(),
            up: Vector3::new(0.0, 1.0, 0.0),
            fovy: 70.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl DesktopCamera {
    /// Ray from the eye through normalized device coordinates (x right, y up).
    pub fn ray_through_ndc(&self, ndc_x: f32, ndc_y: f32) -> PointerRay {
        let forward = (self.target - self.position).normalized();
        let right = forward.cross(self.up).normalized();
        let up = right.cross(forward);
        let tan_half = (self.fovy.to_radians() * 0.5).tan();
        let direction = (forward
            + right * (ndc_x * tan_half * self.aspect)
            + up * (ndc_y * tan_half))
            .normalized();
        PointerRay {
            origin: self.position,
            direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn center_ray_points_at_target() {
        let cam = DesktopCamera::default();
        let ray = cam.ray_through_ndc(0.0, 0.0);
        let expected = (cam.target - cam.position).normalized();
        assert!((ray.direction.dot(expected) - 1.0).abs() < EPSILON);
        assert_eq!(ray.origin, cam.position);
    }

    #[test]
    fn right_edge_ray_leans_right() {
        let cam = DesktopCamera::default();
        let ray = cam.ray_through_ndc(1.0, 0.0);
        assert!(ray.direction.x > 0.0);
        assert!((ray.direction.length() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn top_edge_ray_leans_up() {
        let cam = DesktopCamera::default();
        let center = cam.ray_through_ndc(0.0, 0.0);
        let top = cam.ray_through_ndc(0.0, 1.0);
        assert!(top.direction.y > center.direction.y);
    }
}
