//! Game state transition event and observer.
//!
//! Systems request a change of [`GameStates`] through [`NextGameState`].
//! `check_pending_state` then triggers a [`GameStateChangedEvent`], and the
//! observer here applies it to [`GameState`] and runs the enter hook stored
//! in [`SystemsStore`].
//!
//! Re-entering `Playing` from `GameOver` is how the session restarts; the
//! `EnterPlay` hook resets the whole island.
use crate::resources::gamestate::NextGameStates::{Pending, Unchanged};
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::systemsstore::{StateHook, SystemsStore};
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info, warn};

#[derive(Event, Debug, Clone, Copy)]
pub struct GameStateChangedEvent {}

/// Observer that applies a pending game state transition.
///
/// - If [`NextGameState`] is [`Pending`], the value is copied into
///   [`GameState`], the request cleared, and the enter hook for the new state
///   queued via `Commands::run_system`.
/// - If it is [`Unchanged`], nothing happens.
pub fn observe_gamestate_change_event(
    _trigger: On<GameStateChangedEvent>,
    mut commands: Commands,
    mut next_game_state: ResMut<NextGameState>,
    mut game_state: ResMut<GameState>,
    systems_store: Res<SystemsStore>,
) {
    match next_game_state.get() {
        Pending(new_state) => {
            let old_state = game_state.get();
            info!("Transitioning from {:?} to {:?}", old_state, new_state);
            game_state.set(new_state);
            next_game_state.reset();
            on_state_enter(new_state, &mut commands, &systems_store);
        }
        Unchanged => {
            debug!("No state change pending.");
        }
    }
}

fn on_state_enter(state: GameStates, commands: &mut Commands, systems_store: &SystemsStore) {
    let hook = match state {
        GameStates::Waiting => {
            debug!("Entered Waiting state");
            return;
        }
        GameStates::Playing => StateHook::EnterPlay,
        GameStates::GameOver => StateHook::EnterGameOver,
    };
    match systems_store.get(hook) {
        Some(id) => commands.run_system(id),
        None => warn!("No {:?} hook registered in SystemsStore", hook),
    }
}
