//! Spatial transform components.
//!
//! [`Transform3D`] is interpreted relative to the entity's current
//! [`Container`](crate::components::container::Container): island-local while
//! the entity rests on the island, world space while it is held or flying.

use bevy_ecs::prelude::Component;
use raylib::math::Vector3;

/// Position, Euler rotation (radians, XYZ) and per-axis scale.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Transform3D {
    pub position: Vector3,
    pub rotation: Vector3,
    pub scale: Vector3,
}

impl Transform3D {
    pub fn from_position(position: Vector3) -> Self {
        Self {
            position,
            rotation: Vector3::zero(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn with_rotation(mut self, rotation: Vector3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vector3) -> Self {
        self.scale = scale;
        self
    }

    /// Largest scale component, used to grow hit spheres uniformly.
    pub fn max_scale(&self) -> f32 {
        self.scale.x.max(self.scale.y).max(self.scale.z)
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::from_position(Vector3::zero())
    }
}

/// Spawn-time island-local transform restored on respawn.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct OriginalTransform(pub Transform3D);
