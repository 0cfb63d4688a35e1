use bevy_ecs::prelude::Component;

use crate::components::actuator::ActuatorId;

/// Marker for the entity currently hovered by an actuator's pointer.
///
/// The presentation draws these with an emissive tint.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Highlighted {
    pub by: ActuatorId,
}
