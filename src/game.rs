//! Session setup, the per-frame schedule and the state enter hooks.
//!
//! The host owns the loop:
//!
//! ```ignore
//! let (mut world, feed) = game::init_world(&config, layout, InputMode::Desktop);
//! let mut schedule = game::build_schedule();
//! loop {
//!     // write device state into RawInput ...
//!     game::step(&mut world, &mut schedule, dt);
//!     // drain feed, draw ...
//! }
//! ```
//!
//! [`init_world`] leaves the session already in `Playing` with the first
//! wave scheduled [`FIRST_WAVE_DELAY`] seconds out.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::info;

use crate::components::actuator::{Actuator, DEFAULT_GRAB_DISTANCE};
use crate::components::container::Container;
use crate::components::flight::Flight;
use crate::components::grabbable::Grabbable;
use crate::components::highlight::Highlighted;
use crate::components::monster::Monster;
use crate::components::transform3d::{OriginalTransform, Transform3D};
use crate::events::effects::EffectCmd;
use crate::events::gamestate::{GameStateChangedEvent, observe_gamestate_change_event};
use crate::resources::camera::DesktopCamera;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::input::{InputMode, InputState, RawInput};
use crate::resources::interaction::{GrabLines, HoverState, RotationGesture};
use crate::resources::island::{IslandFrame, SpawnPoints, Village};
use crate::resources::layout::IslandLayout;
use crate::resources::presentation::{PresentationFeed, setup_presentation};
use crate::resources::rng::GameRng;
use crate::resources::scheduler::{ScheduledAction, Scheduler, TimerKey};
use crate::resources::systemsstore::{StateHook, SystemsStore};
use crate::resources::wavestate::{FIRST_WAVE_DELAY, WaveState};
use crate::resources::worldtime::WorldTime;
use crate::systems::actuator::track_actuators_system;
use crate::systems::flight::{flight_ended_observer, integrate_flights_system};
use crate::systems::gamestate::{check_pending_state, state_is_playing};
use crate::systems::grab::{
    grab_lines_system, grab_observer, held_object_system, release_observer,
};
use crate::systems::hover::hover_system;
use crate::systems::input::{emit_select_events, update_input_state};
use crate::systems::monster::monster_motion_system;
use crate::systems::presentation::{
    forward_effect_cmds, publish_scoreboard_system, update_effect_cmds,
};
use crate::systems::rotation::island_rotation_system;
use crate::systems::scheduler::{
    respawn_observer, scheduler_tick_system, session_timer_observer, show_message,
};
use crate::systems::time::update_world_time;
use crate::systems::wave::{
    monster_killed_observer, monster_reach_village_system, wave_end_system, wave_spawn_system,
};
use crate::worldbuilder::{respawn_object, spawn_island};

/// Seconds "GAME OVER" stays up before the restart is announced.
pub const GAME_OVER_DELAY: f32 = 5.0;

/// Build a ready-to-run world: resources, island objects, actuators for
/// `mode`, observers and state hooks. Returns the world together with the
/// receiving end of the presentation channels.
pub fn init_world(
    config: &GameConfig,
    layout: IslandLayout,
    mode: InputMode,
) -> (World, PresentationFeed) {
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(config.time_scale));
    world.insert_resource(config.clone());
    world.insert_resource(GameState::new());
    world.insert_resource(NextGameState::new());
    world.insert_resource(mode);
    world.insert_resource(RawInput::default());
    world.insert_resource(InputState::default());
    world.insert_resource(DesktopCamera::default());
    world.insert_resource(IslandFrame::default());
    world.insert_resource(Village::default());
    world.insert_resource(WaveState::default());
    world.insert_resource(Scheduler::new());
    world.insert_resource(HoverState::default());
    world.insert_resource(RotationGesture::default());
    world.insert_resource(GrabLines::default());
    world.insert_resource(SpawnPoints::ring(layout.spawn_points, layout.spawn_radius));
    let feed = setup_presentation(&mut world);

    let seed = config.effective_seed();
    info!("Session seed {}", seed);
    let mut rng = GameRng::with_seed(seed);
    {
        let mut commands = world.commands();
        spawn_island(&mut commands, &layout, &mut rng);
        for id in mode.actuators() {
            commands.spawn(Actuator::new(*id));
        }
    }
    world.flush();
    world.insert_resource(rng);
    world.insert_resource(layout);

    let mut systems_store = SystemsStore::new();
    let enter_play_id = world.register_system(enter_play);
    systems_store.insert(StateHook::EnterPlay, enter_play_id);
    let enter_game_over_id = world.register_system(enter_game_over);
    systems_store.insert(StateHook::EnterGameOver, enter_game_over_id);
    world.insert_resource(systems_store);

    world.spawn(Observer::new(observe_gamestate_change_event));
    world.spawn(Observer::new(grab_observer));
    world.spawn(Observer::new(release_observer));
    world.spawn(Observer::new(flight_ended_observer));
    world.spawn(Observer::new(monster_killed_observer));
    world.spawn(Observer::new(session_timer_observer));
    world.spawn(Observer::new(respawn_observer));
    world.flush();

    world.resource_mut::<NextGameState>().set(GameStates::Playing);
    world.trigger(GameStateChangedEvent {});
    world.flush();

    (world, feed)
}

/// The per-frame schedule: input and grab, then flight and timers, then
/// the wave logic, then presentation output.
pub fn build_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            (
                update_input_state,
                track_actuators_system,
                island_rotation_system,
                hover_system,
                emit_select_events,
                held_object_system,
                grab_lines_system,
            )
                .chain(),
            (
                integrate_flights_system,
                scheduler_tick_system,
                check_pending_state,
            )
                .chain(),
            (
                wave_spawn_system,
                monster_reach_village_system,
                wave_end_system,
                monster_motion_system,
            )
                .chain()
                .run_if(state_is_playing),
            (
                publish_scoreboard_system,
                forward_effect_cmds,
                update_effect_cmds,
            )
                .chain(),
        )
            .chain(),
    );
    schedule
}

/// Advance the game by `dt` seconds.
pub fn step(world: &mut World, schedule: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    schedule.run(world);
    world.clear_trackers();
}

/// Enter hook for `Playing`: reset the whole island and schedule the first
/// wave. Runs at session start and on every restart.
#[allow(clippy::too_many_arguments)]
pub fn enter_play(
    mut commands: Commands,
    mut scheduler: ResMut<Scheduler>,
    mut wave: ResMut<WaveState>,
    mut village: ResMut<Village>,
    mut island: ResMut<IslandFrame>,
    mut hover: ResMut<HoverState>,
    mut gesture: ResMut<RotationGesture>,
    mut lines: ResMut<GrabLines>,
    monsters: Query<Entity, With<Monster>>,
    mut objects: Query<
        (
            Entity,
            &mut Container,
            &mut Transform3D,
            &OriginalTransform,
            Has<Flight>,
        ),
        (With<Grabbable>, Without<Monster>),
    >,
    highlighted: Query<Entity, With<Highlighted>>,
    mut actuators: Query<&mut Actuator>,
    mut effects: MessageWriter<EffectCmd>,
) {
    scheduler.advance_epoch();
    wave.reset();
    village.reset();
    island.yaw = 0.0;
    hover.clear();
    *gesture = RotationGesture::default();
    *lines = GrabLines::default();

    for entity in monsters.iter() {
        commands.entity(entity).try_despawn();
    }
    for (entity, mut container, mut transform, original, in_flight) in objects.iter_mut() {
        if in_flight {
            commands.entity(entity).try_remove::<Flight>();
            effects.write(EffectCmd::TrailStop { entity });
        }
        respawn_object(&mut container, &mut transform, original);
    }
    for entity in highlighted.iter() {
        commands.entity(entity).try_remove::<Highlighted>();
    }
    for mut actuator in actuators.iter_mut() {
        actuator.grabbed = None;
        actuator.grab_distance = DEFAULT_GRAB_DISTANCE;
        actuator.reset_tracking();
    }

    show_message(&mut wave, &mut scheduler, "Defend the Village!");
    scheduler.schedule(
        TimerKey::Wave,
        FIRST_WAVE_DELAY,
        ScheduledAction::StartNextWave,
    );
    info!("Session started");
}

/// Enter hook for `GameOver`: freeze the waves and count down to the
/// restart.
pub fn enter_game_over(mut scheduler: ResMut<Scheduler>, mut wave: ResMut<WaveState>) {
    scheduler.cancel(TimerKey::Message);
    scheduler.cancel(TimerKey::Wave);
    wave.wave_active = false;
    wave.message = Some("GAME OVER".to_string());
    scheduler.schedule(
        TimerKey::GameOver,
        GAME_OVER_DELAY,
        ScheduledAction::AnnounceRestart,
    );
    info!("GAME OVER at wave {} with score {}", wave.wave, wave.score);
}
