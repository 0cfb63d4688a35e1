//! End of a thrown entity's flight.
//!
//! # Event Flow
//!
//! 1. `integrate_flights_system` moves every thrown entity and, once the
//!    grace period is over, classifies what it ran into
//! 2. Triggers [`FlightEndedEvent`] with the outcome
//! 3. `flight_ended_observer` applies damage, effects and the respawn or
//!    removal of the thrown entity
//!
//! # Related
//!
//! - [`crate::systems::flight::integrate_flights_system`]
//! - [`crate::systems::flight::flight_ended_observer`]

use bevy_ecs::prelude::*;
use raylib::math::Vector3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightOutcome {
    /// Struck the given monster.
    MonsterHit(Entity),
    /// Landed on the island surface or the village.
    Ground,
    /// Dropped below the world floor.
    FallOut,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct FlightEndedEvent {
    /// The thrown entity.
    pub entity: Entity,
    pub outcome: FlightOutcome,
    /// World position where the flight ended.
    pub position: Vector3,
}
