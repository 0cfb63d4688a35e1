//! Ballistic state of a thrown entity.
//!
//! Present only while the entity's container is `InFlight`. Removing it is
//! part of every terminal flight outcome.

use bevy_ecs::prelude::Component;
use raylib::math::Vector3;

/// Downward acceleration applied to thrown objects, units/s².
pub const THROW_GRAVITY: f32 = -15.0;
/// Seconds after release during which no collision is checked, so an object
/// cannot hit the thing it was just picked up next to.
pub const GRACE_PERIOD: f32 = 0.2;

#[derive(Component, Clone, Copy, Debug)]
pub struct Flight {
    pub velocity: Vector3,
    pub gravity: f32,
    /// Simulated seconds since release.
    pub age: f32,
}

impl Flight {
    pub fn new(velocity: Vector3) -> Self {
        Self {
            velocity,
            gravity: THROW_GRAVITY,
            age: 0.0,
        }
    }

    pub fn in_grace_period(&self) -> bool {
        self.age < GRACE_PERIOD
    }

    /// Advance one semi-implicit Euler step and return the displacement.
    pub fn step(&mut self, dt: f32) -> Vector3 {
        self.velocity.y += self.gravity * dt;
        self.age += dt;
        self.velocity * dt
    }
}
