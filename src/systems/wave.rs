//! Wave progression while playing.
//!
//! These systems run after flights have been resolved for the frame, in this
//! order: spawn, village check, wave-end check. Kill scoring is an observer
//! on [`MonsterKilledEvent`] so it runs as soon as the kill is reported.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info};
use raylib::math::Vector3;

use crate::components::container::{Container, world_position};
use crate::components::monster::{Monster, MonsterKind};
use crate::components::transform3d::Transform3D;
use crate::events::effects::EffectCmd;
use crate::events::monster::{MonsterKilledEvent, MonsterReachedVillageEvent};
use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::island::{IslandFrame, SpawnPoints, Village, WALK_HEIGHT};
use crate::resources::rng::GameRng;
use crate::resources::scheduler::Scheduler;
use crate::resources::wavestate::{WAVE_BREAK, WaveState};
use crate::resources::worldtime::WorldTime;
use crate::spatial::planar_length;
use crate::systems::scheduler::{begin_wave, show_message};
use crate::worldbuilder::{remove_monster, spawn_monster};

/// Island-local point monsters walk toward.
pub const VILLAGE_CENTER: Vector3 = Vector3 {
    x: 0.0,
    y: WALK_HEIGHT,
    z: 0.0,
};
/// Planar distance from the island center at which a monster hits the village.
pub const VILLAGE_REACH: f32 = 2.0;

pub fn wave_spawn_system(
    mut commands: Commands,
    time: Res<WorldTime>,
    spawn_points: Res<SpawnPoints>,
    mut rng: ResMut<GameRng>,
    mut wave: ResMut<WaveState>,
) {
    if !wave.wave_active || wave.all_spawned() {
        return;
    }
    if wave.spawn_timer < wave.spawn_interval {
        wave.spawn_timer += time.delta;
    }
    if wave.spawn_timer < wave.spawn_interval {
        return;
    }
    let Some(point) = spawn_points.pick(&mut rng.0) else {
        debug!("no spawn points, skipping spawn");
        return;
    };
    let kind = if rng.chance(wave.strong_chance) {
        MonsterKind::Strong
    } else {
        MonsterKind::Basic
    };
    spawn_monster(&mut commands, kind, point, VILLAGE_CENTER);
    wave.spawn_timer = 0.0;
    wave.monsters_spawned += 1;
    debug!(
        "spawned {}/{} of wave {}",
        wave.monsters_spawned, wave.monsters_per_wave, wave.wave
    );
}

/// Monsters that walked into the village hurt it and leave play unscored.
pub fn monster_reach_village_system(
    mut commands: Commands,
    island: Res<IslandFrame>,
    mut village: ResMut<Village>,
    mut wave: ResMut<WaveState>,
    mut next_state: ResMut<NextGameState>,
    mut monsters: Query<(Entity, &mut Monster, &Container, &Transform3D)>,
    mut effects: MessageWriter<EffectCmd>,
) {
    for (entity, mut monster, container, transform) in monsters.iter_mut() {
        if !monster.is_active || !container.is_resting() {
            continue;
        }
        if planar_length(transform.position) >= VILLAGE_REACH {
            continue;
        }
        monster.is_active = false;
        let damage = monster.kind.damage();
        let destroyed = village.damage(damage);
        effects.write(EffectCmd::VillageFlash);
        let at = world_position(container, transform, &island);
        remove_monster(&mut commands, &mut effects, entity, Some(at));
        wave.monster_resolved();
        info!(
            "{:?} monster reached the village: -{} hp ({} left)",
            monster.kind, damage, village.hp
        );
        commands.trigger(MonsterReachedVillageEvent {
            monster: entity,
            damage,
            village_hp: village.hp,
        });
        if destroyed {
            info!("Village destroyed");
            wave.wave_active = false;
            next_state.set(GameStates::GameOver);
            return;
        }
    }
}

/// Award the clear bonus and count down to the next wave once every monster
/// of the current wave has been spawned and resolved.
pub fn wave_end_system(
    time: Res<WorldTime>,
    mut wave: ResMut<WaveState>,
    mut scheduler: ResMut<Scheduler>,
    monsters: Query<&Monster>,
) {
    if !wave.wave_active || !wave.all_spawned() {
        return;
    }
    if monsters.iter().any(|m| m.is_active) {
        return;
    }
    if let Some(bonus) = wave.award_bonus() {
        info!("Wave {} complete, bonus {}", wave.wave, bonus);
        show_message(&mut wave, &mut scheduler, format!("Wave Complete! +{bonus}"));
    }
    wave.wave_end_timer += time.delta;
    if wave.wave_end_timer >= WAVE_BREAK {
        begin_wave(&mut wave, &mut scheduler);
    }
}

pub fn monster_killed_observer(trigger: On<MonsterKilledEvent>, mut wave: ResMut<WaveState>) {
    let ev = trigger.event();
    wave.score += ev.kind.points();
    wave.monster_resolved();
    info!(
        "{:?} monster killed: +{} (score {}, {} remaining)",
        ev.kind,
        ev.kind.points(),
        wave.score,
        wave.monsters_remaining
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::grabbable::Grabbable;
    use bevy_ecs::message::Messages;
    use bevy_ecs::system::RunSystemOnce;

    fn make_world() -> World {
        let mut world = World::new();
        world.insert_resource(WorldTime {
            delta: 0.1,
            ..WorldTime::default()
        });
        world.insert_resource(IslandFrame::default());
        world.insert_resource(Village::default());
        world.insert_resource(WaveState::default());
        world.insert_resource(NextGameState::new());
        world.insert_resource(Scheduler::new());
        world.insert_resource(SpawnPoints::ring(4, 6.5));
        world.insert_resource(GameRng::with_seed(7));
        world.init_resource::<Messages<EffectCmd>>();
        world.add_observer(monster_killed_observer);
        world.flush();
        world
    }

    fn run<M>(world: &mut World, system: impl IntoSystem<(), (), M>) {
        world.run_system_once(system).unwrap();
    }

    fn spawn_walker(world: &mut World, kind: MonsterKind, local: Vector3) -> Entity {
        world
            .spawn((
                Grabbable::monster(kind),
                Monster::new(kind, VILLAGE_CENTER),
                Container::OnIsland,
                Transform3D::from_position(local),
            ))
            .id()
    }

    #[test]
    fn first_monster_spawns_immediately_then_waits_for_interval() {
        let mut world = make_world();
        world.resource_mut::<WaveState>().start_next_wave();
        run(&mut world, wave_spawn_system);
        assert_eq!(world.resource::<WaveState>().monsters_spawned, 1);
        run(&mut world, wave_spawn_system);
        assert_eq!(world.resource::<WaveState>().monsters_spawned, 1);
        let count = world.query::<&Monster>().iter(&world).count();
        assert_eq!(count, 1);
    }

    #[test]
    fn no_spawning_before_first_wave() {
        let mut world = make_world();
        run(&mut world, wave_spawn_system);
        assert_eq!(world.query::<&Monster>().iter(&world).count(), 0);
    }

    #[test]
    fn monster_at_village_damages_and_is_removed_unscored() {
        let mut world = make_world();
        world.resource_mut::<WaveState>().start_next_wave();
        let m = spawn_walker(&mut world, MonsterKind::Strong, Vector3::new(1.0, 1.0, 0.5));
        run(&mut world, monster_reach_village_system);
        assert!(world.get_entity(m).is_err());
        assert_eq!(world.resource::<Village>().hp, 80);
        let wave = world.resource::<WaveState>();
        assert_eq!(wave.score, 0);
        assert_eq!(wave.monsters_remaining, 2);
    }

    #[test]
    fn held_monster_does_not_hit_village() {
        let mut world = make_world();
        let m = world
            .spawn((
                Monster::new(MonsterKind::Basic, VILLAGE_CENTER),
                Container::HeldBy(crate::components::actuator::ActuatorId::Mouse),
                Transform3D::default(),
            ))
            .id();
        run(&mut world, monster_reach_village_system);
        assert!(world.get_entity(m).is_ok());
        assert_eq!(world.resource::<Village>().hp, 100);
    }

    #[test]
    fn destroyed_village_requests_game_over() {
        let mut world = make_world();
        world.resource_mut::<Village>().hp = 10;
        spawn_walker(&mut world, MonsterKind::Basic, Vector3::new(0.5, 1.0, 0.0));
        run(&mut world, monster_reach_village_system);
        assert_eq!(
            world.resource::<NextGameState>().get(),
            crate::resources::gamestate::NextGameStates::Pending(GameStates::GameOver)
        );
    }

    #[test]
    fn cleared_wave_awards_bonus_once_and_starts_next_after_break() {
        let mut world = make_world();
        {
            let mut wave = world.resource_mut::<WaveState>();
            wave.start_next_wave();
            wave.monsters_spawned = wave.monsters_per_wave;
            wave.monsters_remaining = 0;
        }
        run(&mut world, wave_end_system);
        assert_eq!(world.resource::<WaveState>().score, 50);
        assert_eq!(
            world.resource::<WaveState>().message.as_deref(),
            Some("Wave Complete! +50")
        );
        for _ in 0..60 {
            run(&mut world, wave_end_system);
            if world.resource::<WaveState>().wave == 2 {
                break;
            }
        }
        let wave = world.resource::<WaveState>();
        assert_eq!(wave.wave, 2);
        assert_eq!(wave.score, 50);
        assert_eq!(wave.monsters_per_wave, 5);
    }

    #[test]
    fn live_monster_blocks_wave_end() {
        let mut world = make_world();
        {
            let mut wave = world.resource_mut::<WaveState>();
            wave.start_next_wave();
            wave.monsters_spawned = wave.monsters_per_wave;
        }
        spawn_walker(&mut world, MonsterKind::Basic, Vector3::new(5.0, 1.0, 0.0));
        run(&mut world, wave_end_system);
        assert!(!world.resource::<WaveState>().bonus_awarded);
    }

    #[test]
    fn kill_scores_by_kind() {
        let mut world = make_world();
        world.resource_mut::<WaveState>().start_next_wave();
        let e = world.spawn_empty().id();
        world.trigger(MonsterKilledEvent {
            monster: e,
            kind: MonsterKind::Strong,
        });
        world.flush();
        let wave = world.resource::<WaveState>();
        assert_eq!(wave.score, 100);
        assert_eq!(wave.monsters_remaining, 2);
    }
}
