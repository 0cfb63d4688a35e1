//! Monster lifecycle notifications.
//!
//! Both events are triggered after the monster has been marked inactive and
//! its despawn queued, so observers must not expect the entity to still be
//! queryable once commands are applied.

use bevy_ecs::prelude::*;

use crate::components::monster::MonsterKind;

/// A monster died by player action. Triggered exactly once per monster.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonsterKilledEvent {
    pub monster: Entity,
    pub kind: MonsterKind,
}

/// A monster reached the village and damaged it.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonsterReachedVillageEvent {
    pub monster: Entity,
    pub damage: u32,
    /// Village health left after the hit.
    pub village_hp: u32,
}
