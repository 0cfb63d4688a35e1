//! Channels from the simulation to whatever draws it.
//!
//! Use [`setup_presentation`] once during initialization. It inserts the
//! sending half as the [`PresentationBridge`] resource together with the
//! `Messages<EffectCmd>` queue, and hands the receiving half back to the host
//! as a [`PresentationFeed`].

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::events::effects::{EffectCmd, ScoreboardUpdate};

#[derive(Resource)]
pub struct PresentationBridge {
    pub tx_effects: Sender<EffectCmd>,
    pub tx_scoreboard: Sender<ScoreboardUpdate>,
}

/// Receiving side, owned by the presentation.
pub struct PresentationFeed {
    pub effects: Receiver<EffectCmd>,
    pub scoreboard: Receiver<ScoreboardUpdate>,
}

impl PresentationFeed {
    /// Most recent scoreboard update, discarding older ones.
    pub fn latest_scoreboard(&self) -> Option<ScoreboardUpdate> {
        self.scoreboard.try_iter().last()
    }
}

pub fn setup_presentation(world: &mut World) -> PresentationFeed {
    let (tx_effects, rx_effects) = unbounded::<EffectCmd>();
    let (tx_scoreboard, rx_scoreboard) = unbounded::<ScoreboardUpdate>();
    world.insert_resource(PresentationBridge {
        tx_effects,
        tx_scoreboard,
    });
    world.insert_resource(Messages::<EffectCmd>::default());
    PresentationFeed {
        effects: rx_effects,
        scoreboard: rx_scoreboard,
    }
}
