//! Per-actuator interaction state that is not stored on the actuator itself.

use bevy_ecs::prelude::{Entity, Resource};
use raylib::math::Vector3;
use rustc_hash::FxHashMap;

use crate::components::actuator::ActuatorId;

/// What a pointer ray currently resolves to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverHit {
    /// Grabbable root entity.
    pub entity: Entity,
    /// Distance from the ray origin to the hit.
    pub distance: f32,
}

/// Current hover target of each empty-handed actuator.
#[derive(Resource, Debug, Default)]
pub struct HoverState {
    hits: FxHashMap<ActuatorId, HoverHit>,
}

impl HoverState {
    pub fn get(&self, id: ActuatorId) -> Option<HoverHit> {
        self.hits.get(&id).copied()
    }

    /// Store the new hit, returning the previous one.
    pub fn set(&mut self, id: ActuatorId, hit: Option<HoverHit>) -> Option<HoverHit> {
        match hit {
            Some(hit) => self.hits.insert(id, hit),
            None => self.hits.remove(&id),
        }
    }

    pub fn clear(&mut self) {
        self.hits.clear();
    }

    /// True when some other actuator hovers `entity`.
    pub fn hovered_by_other(&self, id: ActuatorId, entity: Entity) -> bool {
        self.hits
            .iter()
            .any(|(other, hit)| *other != id && hit.entity == entity)
    }
}

/// Two-handed island rotation tracking.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct RotationGesture {
    /// Angle of the controller pair last frame, `None` when the gesture is
    /// not in progress.
    pub last_angle: Option<f32>,
}

/// Visual cue from a controller to the entity it holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrabLine {
    pub visible: bool,
    pub start: Vector3,
    pub end: Vector3,
}

impl Default for GrabLine {
    fn default() -> Self {
        Self {
            visible: false,
            start: Vector3::zero(),
            end: Vector3::zero(),
        }
    }
}

#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct GrabLines {
    pub left: GrabLine,
    pub right: GrabLine,
}

impl GrabLines {
    pub fn get_mut(&mut self, id: ActuatorId) -> Option<&mut GrabLine> {
        match id {
            ActuatorId::LeftController => Some(&mut self.left),
            ActuatorId::RightController => Some(&mut self.right),
            ActuatorId::Mouse => None,
        }
    }
}
