//! Hands that can point at, grab and throw things.
//!
//! In VR there is one [`Actuator`] per motion controller; on the desktop a
//! single mouse-driven virtual hand. All of them share the same grab state so
//! the interaction systems never branch on the input device except where the
//! two modes genuinely feel different (smoothing, throw strength).
//!
//! # Related
//! - [`crate::systems::actuator::track_actuators_system`] – velocity sampling
//! - [`crate::systems::grab`] – grab/release protocol

use bevy_ecs::prelude::{Component, Entity};
use raylib::math::Vector3;

use crate::components::velocitytracker::{VelocitySample, VelocityTracker};

/// Distance along the pointer ray the mouse hand sits at when empty.
pub const DEFAULT_GRAB_DISTANCE: f32 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActuatorId {
    LeftController,
    RightController,
    Mouse,
}

impl ActuatorId {
    pub fn is_controller(&self) -> bool {
        !matches!(self, ActuatorId::Mouse)
    }
}

#[derive(Component, Clone, Debug)]
pub struct Actuator {
    pub id: ActuatorId,
    /// World-space position this frame.
    pub position: Vector3,
    /// Instantaneous velocity derived from the last two positions.
    pub velocity: Vector3,
    pub last_position: Option<Vector3>,
    pub tracker: VelocityTracker,
    /// The entity held by this actuator. Kept in sync with the entity's
    /// [`Container::HeldBy`](crate::components::container::Container::HeldBy).
    pub grabbed: Option<Entity>,
    /// Mouse hand distance along the pointer ray.
    pub grab_distance: f32,
}

impl Actuator {
    pub fn new(id: ActuatorId) -> Self {
        Self {
            id,
            position: Vector3::zero(),
            velocity: Vector3::zero(),
            last_position: None,
            tracker: VelocityTracker::new(),
            grabbed: None,
            grab_distance: DEFAULT_GRAB_DISTANCE,
        }
    }

    pub fn is_gripped(&self) -> bool {
        self.grabbed.is_some()
    }

    /// Derive velocity from the previous position and record a sample.
    ///
    /// The first call after a reset only records the position.
    pub fn sample(&mut self, position: Vector3, dt: f32) {
        self.position = position;
        if dt <= 0.0 {
            return;
        }
        if let Some(last) = self.last_position {
            self.velocity = (position - last) / dt;
            self.tracker.push(VelocitySample {
                position,
                velocity: self.velocity,
                dt,
            });
        }
        self.last_position = Some(position);
    }

    /// Forget all motion history, keeping the current position as origin.
    pub fn reset_tracking(&mut self) {
        self.tracker.clear();
        self.velocity = Vector3::zero();
        self.last_position = Some(self.position);
    }

    /// Throw velocity before the mode multiplier is applied.
    pub fn release_velocity(&self) -> Vector3 {
        self.tracker.peak_velocity(self.velocity)
    }
}
