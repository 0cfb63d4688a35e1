//! Select (grab button) press and release.
//!
//! [`emit_select_events`](crate::systems::input::emit_select_events) triggers
//! these on the button edges of each actuator. The grab protocol lives in
//! [`crate::systems::grab::grab_observer`] and
//! [`crate::systems::grab::release_observer`]; hosts may attach further
//! observers, for example to play haptics.

use bevy_ecs::prelude::*;

use crate::components::actuator::ActuatorId;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectStartEvent {
    pub actuator: ActuatorId,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectEndEvent {
    pub actuator: ActuatorId,
}
