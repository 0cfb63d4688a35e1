//! Actuator position and velocity tracking.
//!
//! Controllers take the tracked position reported by the XR runtime. The
//! mouse hand sits on the pointer ray at its grab distance: the hit distance
//! of the object it holds, or the default when empty.
use bevy_ecs::prelude::*;

use crate::components::actuator::{Actuator, ActuatorId};
use crate::resources::input::{InputMode, InputState};
use crate::resources::worldtime::WorldTime;

pub fn track_actuators_system(
    time: Res<WorldTime>,
    mode: Res<InputMode>,
    input: Res<InputState>,
    mut actuators: Query<&mut Actuator>,
) {
    for mut actuator in actuators.iter_mut() {
        if !mode.actuators().contains(&actuator.id) {
            continue;
        }
        let state = input.get(actuator.id);
        let target = match actuator.id {
            ActuatorId::Mouse => state.ray.map(|ray| ray.at(actuator.grab_distance)),
            _ => state.position,
        };
        if let Some(position) = target {
            actuator.sample(position, time.delta);
        }
    }
}
