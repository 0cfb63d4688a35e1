//! Registry of one-shot systems run on state entry.
//!
//! Hooks are registered once at startup with `World::register_system` and run
//! later through `Commands::run_system`, so the state observer does not need
//! to know their parameter sets.

use bevy_ecs::prelude::Resource;
use bevy_ecs::system::SystemId;
use rustc_hash::FxHashMap;

/// Well-known hook slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateHook {
    EnterPlay,
    EnterGameOver,
}

#[derive(Resource, Default)]
pub struct SystemsStore {
    map: FxHashMap<StateHook, SystemId>,
}

impl SystemsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, hook: StateHook, id: SystemId) {
        self.map.insert(hook, id);
    }

    pub fn get(&self, hook: StateHook) -> Option<SystemId> {
        self.map.get(&hook).copied()
    }
}
