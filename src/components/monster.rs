//! Monster state and per-kind stats.
//!
//! Monsters walk from a spawn point toward the village at the island center.
//! They can also be grabbed and thrown like any other object, in which case
//! they stop walking until they either land back on the island or die.
//!
//! # Related
//! - [`crate::systems::monster::monster_motion_system`] – walking and bobbing
//! - [`crate::systems::wave::monster_reach_village_system`] – village damage
//! - [`crate::systems::flight::flight_ended_observer`] – thrown hits

use bevy_ecs::prelude::Component;
use raylib::math::Vector3;

/// The two monster variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MonsterKind {
    Basic,
    Strong,
}

impl MonsterKind {
    pub fn health(&self) -> i32 {
        match self {
            MonsterKind::Basic => 1,
            MonsterKind::Strong => 2,
        }
    }

    /// Damage dealt to the village, and to other monsters when thrown.
    pub fn damage(&self) -> u32 {
        match self {
            MonsterKind::Basic => 10,
            MonsterKind::Strong => 20,
        }
    }

    /// Walking speed in island units per second.
    pub fn speed(&self) -> f32 {
        match self {
            MonsterKind::Basic => 0.5,
            MonsterKind::Strong => 0.3,
        }
    }

    pub fn body_radius(&self) -> f32 {
        match self {
            MonsterKind::Basic => 0.4,
            MonsterKind::Strong => 0.6,
        }
    }

    /// Score awarded when the player kills one.
    pub fn points(&self) -> u32 {
        match self {
            MonsterKind::Basic => 50,
            MonsterKind::Strong => 100,
        }
    }
}

#[derive(Component, Clone, Copy, Debug)]
pub struct Monster {
    pub kind: MonsterKind,
    pub health: i32,
    pub move_speed: f32,
    /// Island-local point the monster walks toward.
    pub target: Vector3,
    /// Cleared once the monster has been resolved (killed or reached the
    /// village) so it is never counted twice in the same frame.
    pub is_active: bool,
}

impl Monster {
    pub fn new(kind: MonsterKind, target: Vector3) -> Self {
        Self {
            kind,
            health: kind.health(),
            move_speed: kind.speed(),
            target,
            is_active: true,
        }
    }

    /// Subtract `amount` health. Returns `true` when the monster is dead.
    pub fn apply_damage(&mut self, amount: u32) -> bool {
        self.health -= amount as i32;
        self.health <= 0
    }
}
