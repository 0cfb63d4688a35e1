//! Presentation-facing messages.
//!
//! The simulation never draws anything. Instead it writes [`EffectCmd`]
//! messages (particle bursts, trails, flashes) and a [`ScoreboardUpdate`]
//! whenever the displayed numbers change. Both are forwarded over channels to
//! the presentation by the systems in [`crate::systems::presentation`].

use bevy_ecs::prelude::*;
use raylib::math::Vector3;

/// Trail tint for a thrown object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailColor {
    /// Thrown monster.
    Red,
    /// Thrown tree or rock.
    Orange,
}

#[derive(Message, Debug, Clone, PartialEq)]
pub enum EffectCmd {
    /// Burst of debris at a world position.
    ImpactBurst { position: Vector3 },
    TrailStart { entity: Entity, color: TrailColor },
    TrailStop { entity: Entity },
    /// The village took damage.
    VillageFlash,
}

/// Everything the scoreboard shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoreboardUpdate {
    pub wave: u32,
    pub monsters_remaining: u32,
    pub score: u32,
    pub message: Option<String>,
    pub village_hp: u32,
    pub village_max_hp: u32,
}
