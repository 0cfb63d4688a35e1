//! Game over, automatic restart and stale timer handling.

use bevy_ecs::prelude::*;

use island_defense::components::container::Container;
use island_defense::components::grabbable::{EntityKind, Grabbable};
use island_defense::components::monster::Monster;
use island_defense::components::transform3d::Transform3D;
use island_defense::game;
use island_defense::resources::gameconfig::GameConfig;
use island_defense::resources::gamestate::{GameState, GameStates, NextGameState};
use island_defense::resources::input::InputMode;
use island_defense::resources::island::Village;
use island_defense::resources::layout::IslandLayout;
use island_defense::resources::presentation::PresentationFeed;
use island_defense::resources::scheduler::{ScheduledAction, Scheduler, TimerKey};
use island_defense::resources::wavestate::WaveState;
use island_defense::resources::worldtime::WorldTime;

const DT: f32 = 1.0 / 60.0;

fn make_session() -> (World, Schedule, PresentationFeed) {
    let mut config = GameConfig::new();
    config.seed = 3;
    let (world, feed) = game::init_world(&config, IslandLayout::default(), InputMode::Desktop);
    (world, game::build_schedule(), feed)
}

fn run_for(world: &mut World, schedule: &mut Schedule, seconds: f32) {
    let frames = (seconds / DT).ceil() as u32;
    for _ in 0..frames {
        game::step(world, schedule, DT);
    }
}

fn state(world: &World) -> GameStates {
    world.resource::<GameState>().get()
}

fn message(world: &World) -> Option<String> {
    world.resource::<WaveState>().message.clone()
}

fn first_rock(world: &mut World) -> Entity {
    let mut q = world.query::<(Entity, &Grabbable)>();
    q.iter(world)
        .find(|(_, g)| g.kind == EntityKind::Rock)
        .map(|(e, _)| e)
        .unwrap()
}

fn lose_village(world: &mut World, schedule: &mut Schedule) {
    world.resource_mut::<Village>().hp = 10;
    let monster = {
        let mut q = world.query_filtered::<Entity, With<Monster>>();
        q.iter(world).next().unwrap()
    };
    let mut t = world.get_mut::<Transform3D>(monster).unwrap();
    t.position.x = 0.2;
    t.position.z = 0.2;
    game::step(world, schedule, DT);
}

#[test]
fn init_enters_playing() {
    let (world, _schedule, _feed) = make_session();
    assert_eq!(state(&world), GameStates::Playing);
    assert!(world.resource::<Scheduler>().is_pending(TimerKey::Wave));
}

#[test]
fn each_step_advances_one_frame() {
    let (mut world, mut schedule, _feed) = make_session();
    assert_eq!(world.resource::<WorldTime>().frame_count, 0);
    for _ in 0..60 {
        game::step(&mut world, &mut schedule, DT);
    }
    let time = world.resource::<WorldTime>();
    assert_eq!(time.frame_count, 60);
    assert!((time.elapsed - 1.0).abs() < 1e-3);
}

#[test]
fn destroyed_village_ends_game_and_restarts() {
    let (mut world, mut schedule, feed) = make_session();
    run_for(&mut world, &mut schedule, 3.1);
    lose_village(&mut world, &mut schedule);
    assert_eq!(world.resource::<Village>().hp, 0);
    game::step(&mut world, &mut schedule, DT);
    assert_eq!(state(&world), GameStates::GameOver);
    assert_eq!(message(&world).as_deref(), Some("GAME OVER"));

    // Nothing spawns or moves while the game is over.
    let spawned = world.resource::<WaveState>().monsters_spawned;
    run_for(&mut world, &mut schedule, 4.5);
    assert_eq!(world.resource::<WaveState>().monsters_spawned, spawned);
    assert_eq!(message(&world).as_deref(), Some("GAME OVER"));

    run_for(&mut world, &mut schedule, 1.0);
    assert_eq!(message(&world).as_deref(), Some("Restarting..."));
    assert_eq!(state(&world), GameStates::GameOver);

    run_for(&mut world, &mut schedule, 2.1);
    assert_eq!(state(&world), GameStates::Playing);
    let wave = world.resource::<WaveState>();
    assert_eq!(wave.wave, 0);
    assert_eq!(wave.score, 0);
    assert_eq!(world.resource::<Village>().hp, 100);
    assert_eq!(message(&world).as_deref(), Some("Defend the Village!"));
    let mut q = world.query_filtered::<Entity, With<Monster>>();
    assert_eq!(q.iter(&world).count(), 0);

    let last = feed.latest_scoreboard().unwrap();
    assert_eq!(last.village_hp, 100);
    assert_eq!(last.message.as_deref(), Some("Defend the Village!"));
}

#[test]
fn respawn_scheduled_before_restart_never_fires() {
    let (mut world, mut schedule, _feed) = make_session();
    let rock = first_rock(&mut world);
    *world.get_mut::<Container>(rock).unwrap() = Container::AwaitingRespawn;
    world.resource_mut::<Scheduler>().schedule(
        TimerKey::Respawn(rock),
        3.0,
        ScheduledAction::Respawn(rock),
    );

    world.resource_mut::<NextGameState>().set(GameStates::Playing);
    game::step(&mut world, &mut schedule, DT);
    assert_eq!(world.get::<Container>(rock), Some(&Container::OnIsland));

    // Hidden again without a new timer: the old one must not bring it back.
    *world.get_mut::<Container>(rock).unwrap() = Container::AwaitingRespawn;
    run_for(&mut world, &mut schedule, 4.0);
    assert_eq!(
        world.get::<Container>(rock),
        Some(&Container::AwaitingRespawn)
    );
}

#[test]
fn restart_during_pending_wave_start_does_not_double_start() {
    let (mut world, mut schedule, _feed) = make_session();
    run_for(&mut world, &mut schedule, 2.0);
    world.resource_mut::<NextGameState>().set(GameStates::Playing);
    game::step(&mut world, &mut schedule, DT);

    run_for(&mut world, &mut schedule, 1.5);
    assert_eq!(world.resource::<WaveState>().wave, 0);
    run_for(&mut world, &mut schedule, 1.6);
    assert_eq!(world.resource::<WaveState>().wave, 1);
    run_for(&mut world, &mut schedule, 2.0);
    assert_eq!(world.resource::<WaveState>().wave, 1);
}
