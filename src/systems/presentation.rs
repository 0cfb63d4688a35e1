//! Bridge from the simulation to the presentation channels.
//!
//! - [`forward_effect_cmds`] sends every [`EffectCmd`] written this frame
//!   over the [`PresentationBridge`].
//! - [`update_effect_cmds`] advances the `Messages<EffectCmd>` queue. Run it
//!   after the forwarder.
//! - [`publish_scoreboard_system`] sends a [`ScoreboardUpdate`] whenever the
//!   displayed values differ from the last one sent.
//!
//! Send errors mean the presentation side was dropped, which is normal in
//! headless runs, and are ignored.

use bevy_ecs::prelude::*;
use log::debug;

use crate::events::effects::{EffectCmd, ScoreboardUpdate};
use crate::resources::island::Village;
use crate::resources::presentation::PresentationBridge;
use crate::resources::wavestate::WaveState;

pub fn forward_effect_cmds(bridge: Res<PresentationBridge>, mut reader: MessageReader<EffectCmd>) {
    for cmd in reader.read() {
        let _ = bridge.tx_effects.send(cmd.clone());
    }
}

pub fn update_effect_cmds(mut msgs: ResMut<Messages<EffectCmd>>) {
    msgs.update();
}

/// Snapshot of what the scoreboard should show right now.
pub fn scoreboard_snapshot(wave: &WaveState, village: &Village) -> ScoreboardUpdate {
    ScoreboardUpdate {
        wave: wave.wave,
        monsters_remaining: wave.monsters_remaining,
        score: wave.score,
        message: wave.message.clone(),
        village_hp: village.hp,
        village_max_hp: village.max_hp,
    }
}

pub fn publish_scoreboard_system(
    wave: Res<WaveState>,
    village: Res<Village>,
    bridge: Res<PresentationBridge>,
    mut last: Local<Option<ScoreboardUpdate>>,
) {
    let snapshot = scoreboard_snapshot(&wave, &village);
    if last.as_ref() == Some(&snapshot) {
        return;
    }
    debug!("scoreboard: {:?}", snapshot);
    let _ = bridge.tx_scoreboard.send(snapshot.clone());
    *last = Some(snapshot);
}
