//! High-level game state resources.
//!
//! [`GameState`] is the authoritative session state; [`NextGameState`] holds
//! a transition requested by some system. The transition is applied by
//! `crate::events::gamestate::observe_gamestate_change_event`, which also runs
//! the enter hook for the new state.

use bevy_ecs::prelude::Resource;

/// Session states.
///
/// `Waiting` only exists before the first frame; the session immediately
/// requests `Playing`. `GameOver` returns to `Playing` on its own after the
/// restart countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStates {
    #[default]
    Waiting,
    Playing,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NextGameStates {
    #[default]
    Unchanged,
    Pending(GameStates),
}

#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GameState {
    current: GameStates,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> GameStates {
        self.current
    }

    /// Overwrite the current state without running hooks.
    pub fn set(&mut self, state: GameStates) {
        self.current = state;
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NextGameState {
    next: NextGameStates,
}

impl NextGameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> NextGameStates {
        self.next
    }

    /// Request a transition; `check_pending_state` picks it up.
    pub fn set(&mut self, next: GameStates) {
        self.next = NextGameStates::Pending(next);
    }

    pub fn reset(&mut self) {
        self.next = NextGameStates::Unchanged;
    }
}
