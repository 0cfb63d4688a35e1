//! Two-handed island rotation.
//!
//! While both controllers squeeze, the horizontal direction from the left to
//! the right controller acts as a steering bar: turning it turns the island
//! the opposite way. The first frame of the gesture only records the angle.

use bevy_ecs::prelude::*;

use crate::components::actuator::ActuatorId;
use crate::resources::input::{InputMode, InputState};
use crate::resources::interaction::RotationGesture;
use crate::resources::island::IslandFrame;
use crate::spatial::wrap_angle;

pub fn island_rotation_system(
    mode: Res<InputMode>,
    input: Res<InputState>,
    mut gesture: ResMut<RotationGesture>,
    mut island: ResMut<IslandFrame>,
) {
    if *mode != InputMode::Vr || !input.both_squeezing() {
        gesture.last_angle = None;
        return;
    }
    let (Some(left), Some(right)) = (
        input.get(ActuatorId::LeftController).position,
        input.get(ActuatorId::RightController).position,
    ) else {
        gesture.last_angle = None;
        return;
    };
    let bar = right - left;
    let angle = bar.z.atan2(bar.x);
    if let Some(last) = gesture.last_angle {
        island.yaw -= wrap_angle(angle - last);
    }
    gesture.last_angle = Some(angle);
}
