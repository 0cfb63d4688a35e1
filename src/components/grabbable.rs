//! Identity of objects the player can pick up.

use bevy_ecs::prelude::Component;

use crate::components::monster::MonsterKind;

/// Damage a thrown tree deals to a monster.
pub const TREE_DAMAGE: u32 = 30;
/// Damage a thrown rock deals to a monster.
pub const ROCK_DAMAGE: u32 = 50;

/// What a grabbable entity is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Tree,
    Rock,
    Monster(MonsterKind),
}

impl EntityKind {
    pub fn is_monster(&self) -> bool {
        matches!(self, EntityKind::Monster(_))
    }
}

/// Marks the root entity of something that can be grabbed and thrown.
///
/// Hit parts hang off this root via `ChildOf`; picking walks up to the first
/// ancestor carrying this component.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Grabbable {
    pub kind: EntityKind,
    /// Health removed from a monster struck by this entity in flight.
    pub damage: u32,
}

impl Grabbable {
    pub fn tree() -> Self {
        Self {
            kind: EntityKind::Tree,
            damage: TREE_DAMAGE,
        }
    }

    pub fn rock() -> Self {
        Self {
            kind: EntityKind::Rock,
            damage: ROCK_DAMAGE,
        }
    }

    pub fn monster(kind: MonsterKind) -> Self {
        Self {
            kind: EntityKind::Monster(kind),
            damage: kind.damage(),
        }
    }
}
