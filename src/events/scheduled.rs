use bevy_ecs::prelude::*;

use crate::resources::scheduler::ScheduledAction;

/// A [`Scheduler`](crate::resources::scheduler::Scheduler) action came due.
///
/// Handlers compare `epoch` with the scheduler's current epoch and ignore the
/// action when they differ.
#[derive(Event, Debug, Clone, Copy)]
pub struct ScheduledActionEvent {
    pub action: ScheduledAction,
    pub epoch: u64,
}
