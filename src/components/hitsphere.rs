//! Sphere used for pointer ray picking.
//!
//! Rocks and monsters carry one on their root entity. Trees are built from a
//! trunk and a crown part, each a `ChildOf` child with its own sphere; the
//! picking system walks from the hit part up to the grabbable root.

use bevy_ecs::prelude::Component;
use raylib::math::Vector3;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct HitSphere {
    /// Offset from the owning transform, scaled with it.
    pub offset: Vector3,
    pub radius: f32,
}

impl HitSphere {
    pub fn new(radius: f32) -> Self {
        Self {
            offset: Vector3::zero(),
            radius,
        }
    }

    pub fn with_offset(mut self, offset: Vector3) -> Self {
        self.offset = offset;
        self
    }
}
