//! Delayed action dispatch.
//!
//! [`scheduler_tick_system`] counts the [`Scheduler`] down once per frame and
//! triggers a [`ScheduledActionEvent`] for every action that came due. Two
//! observers react:
//!
//! - [`session_timer_observer`] – wave starts, message clears and the
//!   game-over/restart countdown
//! - [`respawn_observer`] – landed trees and rocks reappearing
//!
//! Both ignore events from an earlier epoch and re-check state before acting.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::container::Container;
use crate::components::transform3d::{OriginalTransform, Transform3D};
use crate::events::scheduled::ScheduledActionEvent;
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::scheduler::{ScheduledAction, Scheduler, TimerKey};
use crate::resources::wavestate::{MESSAGE_DURATION, WaveState};
use crate::resources::worldtime::WorldTime;
use crate::worldbuilder::respawn_object;

/// Delay between "Restarting..." and the new session.
pub const RESTART_DELAY: f32 = 2.0;

pub fn scheduler_tick_system(
    mut commands: Commands,
    time: Res<WorldTime>,
    mut scheduler: ResMut<Scheduler>,
) {
    let epoch = scheduler.epoch();
    for action in scheduler.tick(time.delta) {
        commands.trigger(ScheduledActionEvent { action, epoch });
    }
}

/// Show `text` on the scoreboard and clear it after [`MESSAGE_DURATION`].
pub fn show_message(wave: &mut WaveState, scheduler: &mut Scheduler, text: impl Into<String>) {
    wave.message = Some(text.into());
    scheduler.schedule(
        TimerKey::Message,
        MESSAGE_DURATION,
        ScheduledAction::ClearMessage,
    );
}

/// Start the next wave and announce it.
pub fn begin_wave(wave: &mut WaveState, scheduler: &mut Scheduler) {
    wave.start_next_wave();
    let text = format!("Wave {}!", wave.wave);
    show_message(wave, scheduler, text);
}

pub fn session_timer_observer(
    trigger: On<ScheduledActionEvent>,
    state: Res<GameState>,
    mut next_state: ResMut<NextGameState>,
    mut scheduler: ResMut<Scheduler>,
    mut wave: ResMut<WaveState>,
) {
    let ev = trigger.event();
    if ev.epoch != scheduler.epoch() {
        debug!("ignoring stale {:?} from epoch {}", ev.action, ev.epoch);
        return;
    }
    match ev.action {
        ScheduledAction::StartNextWave => {
            if state.get() == GameStates::Playing {
                begin_wave(&mut wave, &mut scheduler);
            }
        }
        ScheduledAction::ClearMessage => wave.message = None,
        ScheduledAction::AnnounceRestart => {
            info!("Restarting...");
            wave.message = Some("Restarting...".to_string());
            scheduler.schedule(
                TimerKey::GameOver,
                RESTART_DELAY,
                ScheduledAction::RestartGame,
            );
        }
        ScheduledAction::RestartGame => {
            if state.get() == GameStates::GameOver {
                next_state.set(GameStates::Playing);
            }
        }
        ScheduledAction::Respawn(_) => {}
    }
}

pub fn respawn_observer(
    trigger: On<ScheduledActionEvent>,
    scheduler: Res<Scheduler>,
    mut objects: Query<(&mut Container, &mut Transform3D, &OriginalTransform)>,
) {
    let ev = trigger.event();
    let ScheduledAction::Respawn(entity) = ev.action else {
        return;
    };
    if ev.epoch != scheduler.epoch() {
        return;
    }
    let Ok((mut container, mut transform, original)) = objects.get_mut(entity) else {
        return;
    };
    if *container != Container::AwaitingRespawn {
        return;
    }
    respawn_object(&mut container, &mut transform, original);
    debug!("respawned {:?}", entity);
}

#[cfg(test)]
mod tests {
    use super::*;
    use raylib::math::Vector3;

    fn make_world(dt: f32) -> World {
        let mut world = World::new();
        world.insert_resource(WorldTime {
            delta: dt,
            ..WorldTime::default()
        });
        let mut state = GameState::new();
        state.set(GameStates::Playing);
        world.insert_resource(state);
        world.insert_resource(NextGameState::new());
        world.insert_resource(Scheduler::new());
        world.insert_resource(WaveState::default());
        world.add_observer(session_timer_observer);
        world.add_observer(respawn_observer);
        world.flush();
        world
    }

    fn tick(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(scheduler_tick_system);
        schedule.run(world);
    }

    #[test]
    fn scheduled_wave_start_announces_wave() {
        let mut world = make_world(1.0);
        world
            .resource_mut::<Scheduler>()
            .schedule(TimerKey::Wave, 0.5, ScheduledAction::StartNextWave);
        tick(&mut world);
        let wave = world.resource::<WaveState>();
        assert_eq!(wave.wave, 1);
        assert_eq!(wave.message.as_deref(), Some("Wave 1!"));
        assert!(world.resource::<Scheduler>().is_pending(TimerKey::Message));
    }

    #[test]
    fn message_clears_after_duration() {
        let mut world = make_world(1.0);
        world.resource_scope(|world, mut wave: Mut<WaveState>| {
            let mut scheduler = world.resource_mut::<Scheduler>();
            show_message(&mut wave, &mut scheduler, "hello");
        });
        tick(&mut world);
        assert!(world.resource::<WaveState>().message.is_some());
        tick(&mut world);
        assert!(world.resource::<WaveState>().message.is_none());
    }

    #[test]
    fn respawn_restores_awaiting_object() {
        let mut world = make_world(1.0);
        let original = Transform3D::from_position(Vector3::new(3.0, 1.0, 4.0));
        let rock = world
            .spawn((
                Container::AwaitingRespawn,
                Transform3D::from_position(Vector3::new(0.0, -30.0, 0.0)),
                OriginalTransform(original),
            ))
            .id();
        world.resource_mut::<Scheduler>().schedule(
            TimerKey::Respawn(rock),
            0.5,
            ScheduledAction::Respawn(rock),
        );
        tick(&mut world);
        assert_eq!(world.get::<Container>(rock), Some(&Container::OnIsland));
        assert_eq!(world.get::<Transform3D>(rock), Some(&original));
    }

    #[test]
    fn respawn_skips_objects_no_longer_waiting() {
        let mut world = make_world(1.0);
        let held = Transform3D::from_position(Vector3::new(0.0, 2.0, 0.0));
        let rock = world
            .spawn((
                Container::OnIsland,
                held,
                OriginalTransform(Transform3D::default()),
            ))
            .id();
        world.resource_mut::<Scheduler>().schedule(
            TimerKey::Respawn(rock),
            0.1,
            ScheduledAction::Respawn(rock),
        );
        tick(&mut world);
        assert_eq!(world.get::<Transform3D>(rock), Some(&held));
    }

    #[test]
    fn restart_only_from_game_over() {
        let mut world = make_world(1.0);
        world
            .resource_mut::<Scheduler>()
            .schedule(TimerKey::GameOver, 0.1, ScheduledAction::RestartGame);
        tick(&mut world);
        assert_eq!(
            world.resource::<NextGameState>().get(),
            crate::resources::gamestate::NextGameStates::Unchanged
        );
    }
}
