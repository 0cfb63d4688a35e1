//! Delayed, keyed, cancellable actions.
//!
//! Every "do X in N seconds" in the game goes through [`Scheduler`]. Each
//! pending action sits under a [`TimerKey`]; scheduling a key again replaces
//! the earlier action, so a message timer never clears a newer message.
//!
//! A session restart calls [`Scheduler::advance_epoch`], which drops all
//! pending actions and bumps the epoch. Fired actions carry the epoch they
//! were scheduled in; handlers ignore any whose epoch is no longer current,
//! which covers actions that came due in the same tick as the restart.
//!
//! # Related
//! - [`crate::systems::scheduler::scheduler_tick_system`] – advances timers
//! - [`crate::events::scheduled::ScheduledActionEvent`] – fired actions

use bevy_ecs::prelude::{Entity, Resource};
use log::debug;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Slot a pending action occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKey {
    Wave,
    Message,
    GameOver,
    Respawn(Entity),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledAction {
    StartNextWave,
    ClearMessage,
    AnnounceRestart,
    RestartGame,
    Respawn(Entity),
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    action: ScheduledAction,
    remaining: f32,
    seq: u64,
}

#[derive(Resource, Debug, Default)]
pub struct Scheduler {
    pending: FxHashMap<TimerKey, Pending>,
    epoch: u64,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `action` after `delay` seconds, replacing anything under `key`.
    pub fn schedule(&mut self, key: TimerKey, delay: f32, action: ScheduledAction) {
        let seq = self.next_seq;
        self.next_seq += 1;
        let replaced = self.pending.insert(
            key,
            Pending {
                action,
                remaining: delay.max(0.0),
                seq,
            },
        );
        if replaced.is_some() {
            debug!("scheduler: replaced pending {:?}", key);
        }
    }

    pub fn cancel(&mut self, key: TimerKey) -> bool {
        self.pending.remove(&key).is_some()
    }

    pub fn is_pending(&self, key: TimerKey) -> bool {
        self.pending.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Invalidate everything scheduled so far.
    pub fn advance_epoch(&mut self) {
        self.pending.clear();
        self.epoch += 1;
        debug!("scheduler: epoch advanced to {}", self.epoch);
    }

    /// Count down by `dt` and return the actions that came due, earliest
    /// deadline first. Due actions are removed.
    pub fn tick(&mut self, dt: f32) -> SmallVec<[ScheduledAction; 4]> {
        let mut due: SmallVec<[(f32, u64, TimerKey); 4]> = SmallVec::new();
        for (key, pending) in self.pending.iter_mut() {
            pending.remaining -= dt;
            if pending.remaining <= 0.0 {
                due.push((pending.remaining, pending.seq, *key));
            }
        }
        due.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        due.into_iter()
            .filter_map(|(_, _, key)| self.pending.remove(&key).map(|p| p.action))
            .collect()
    }
}
