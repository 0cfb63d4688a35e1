//! Thrown-object simulation and collision resolution.
//!
//! [`integrate_flights_system`] advances every entity carrying [`Flight`]
//! with constant gravity and spin. Once the grace period is over it looks,
//! in order, for:
//!
//! 1. a monster within [`MONSTER_HIT_RADIUS`] (world space, held monsters and
//!    the thrown entity itself excluded),
//! 2. the island surface: island-local planar distance below
//!    [`ISLAND_RADIUS`] and height below [`SURFACE_HEIGHT`], or the village
//!    silhouette around the center,
//! 3. the world floor at [`FALL_OUT_Y`].
//!
//! The first match ends the flight with a [`FlightEndedEvent`], handled by
//! [`flight_ended_observer`].

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;
use raylib::math::Vector3;
use smallvec::SmallVec;

use crate::components::container::{Container, transfer, world_position};
use crate::components::flight::Flight;
use crate::components::grabbable::{EntityKind, Grabbable};
use crate::components::monster::Monster;
use crate::components::transform3d::Transform3D;
use crate::events::effects::EffectCmd;
use crate::events::flight::{FlightEndedEvent, FlightOutcome};
use crate::events::monster::MonsterKilledEvent;
use crate::resources::island::IslandFrame;
use crate::resources::scheduler::{ScheduledAction, Scheduler, TimerKey};
use crate::resources::worldtime::WorldTime;
use crate::spatial::planar_length;
use crate::worldbuilder::remove_monster;

pub const MONSTER_HIT_RADIUS: f32 = 1.6;
pub const ISLAND_RADIUS: f32 = 11.0;
pub const SURFACE_HEIGHT: f32 = 0.2;
pub const VILLAGE_RADIUS: f32 = 2.5;
pub const VILLAGE_HEIGHT: f32 = 3.0;
pub const FALL_OUT_Y: f32 = -20.0;
/// Seconds a landed tree or rock stays hidden.
pub const RESPAWN_DELAY: f32 = 3.0;
pub const THROWN_SPIN_X: f32 = 5.0;
pub const THROWN_SPIN_Z: f32 = 3.0;

/// Decide whether a thrown entity at `position` (world space) has hit
/// something. `targets` holds the world positions of hittable monsters.
pub fn classify_flight(
    entity: Entity,
    position: Vector3,
    targets: &[(Entity, Vector3)],
    island: &IslandFrame,
) -> Option<FlightOutcome> {
    let nearest = targets
        .iter()
        .filter(|(target, _)| *target != entity)
        .map(|(target, p)| (*target, (position - *p).length()))
        .filter(|(_, d)| *d < MONSTER_HIT_RADIUS)
        .min_by(|a, b| a.1.total_cmp(&b.1));
    if let Some((target, _)) = nearest {
        return Some(FlightOutcome::MonsterHit(target));
    }

    let local = island.to_local(position);
    let d = planar_length(local);
    let on_surface = d < ISLAND_RADIUS && local.y < SURFACE_HEIGHT;
    let on_village = d < VILLAGE_RADIUS && local.y > 0.0 && local.y < VILLAGE_HEIGHT;
    if on_surface || on_village {
        return Some(FlightOutcome::Ground);
    }

    (position.y < FALL_OUT_Y).then_some(FlightOutcome::FallOut)
}

pub fn integrate_flights_system(
    mut commands: Commands,
    time: Res<WorldTime>,
    island: Res<IslandFrame>,
    mut set: ParamSet<(
        Query<(Entity, &Monster, &Container, &Transform3D)>,
        Query<(Entity, &mut Transform3D, &mut Flight)>,
    )>,
) {
    let dt = time.delta;
    let targets: SmallVec<[(Entity, Vector3); 16]> = set
        .p0()
        .iter()
        .filter(|(_, m, c, _)| m.is_active && !c.is_grabbed() && c.is_visible())
        .map(|(e, _, c, t)| (e, world_position(c, t, &island)))
        .collect();

    for (entity, mut transform, mut flight) in set.p1().iter_mut() {
        let displacement = flight.step(dt);
        transform.position = transform.position + displacement;
        transform.rotation.x += THROWN_SPIN_X * dt;
        transform.rotation.z += THROWN_SPIN_Z * dt;
        if flight.in_grace_period() {
            continue;
        }
        if let Some(outcome) = classify_flight(entity, transform.position, &targets, &island) {
            commands.trigger(FlightEndedEvent {
                entity,
                outcome,
                position: transform.position,
            });
        }
    }
}

/// Apply the consequences of a finished flight.
///
/// Damage and effects first, then the thrown entity itself: monsters are
/// destroyed and credited as kills, trees and rocks hide until respawn.
pub fn flight_ended_observer(
    trigger: On<FlightEndedEvent>,
    mut commands: Commands,
    island: Res<IslandFrame>,
    mut scheduler: ResMut<Scheduler>,
    mut objects: Query<(&Grabbable, &mut Container, &mut Transform3D)>,
    mut monsters: Query<&mut Monster>,
    mut effects: MessageWriter<EffectCmd>,
) {
    let ev = *trigger.event();
    let Ok((thrown, container, _)) = objects.get(ev.entity) else {
        return;
    };
    if !container.is_thrown() {
        return;
    }
    let thrown = *thrown;
    debug!("{:?} flight ended: {:?}", ev.entity, ev.outcome);

    if ev.outcome != FlightOutcome::FallOut {
        effects.write(EffectCmd::ImpactBurst {
            position: ev.position,
        });
    }
    if let FlightOutcome::MonsterHit(target) = ev.outcome {
        if let Ok(mut monster) = monsters.get_mut(target) {
            if monster.is_active && monster.apply_damage(thrown.damage) {
                monster.is_active = false;
                let at = objects
                    .get(target)
                    .map(|(_, c, t)| world_position(c, t, &island))
                    .unwrap_or(ev.position);
                remove_monster(&mut commands, &mut effects, target, Some(at));
                commands.trigger(MonsterKilledEvent {
                    monster: target,
                    kind: monster.kind,
                });
            }
        }
    }

    commands.entity(ev.entity).try_remove::<Flight>();
    effects.write(EffectCmd::TrailStop { entity: ev.entity });

    if let EntityKind::Monster(kind) = thrown.kind {
        if let Ok(mut monster) = monsters.get_mut(ev.entity) {
            if monster.is_active {
                monster.is_active = false;
                remove_monster(&mut commands, &mut effects, ev.entity, None);
                commands.trigger(MonsterKilledEvent {
                    monster: ev.entity,
                    kind,
                });
            }
        }
        return;
    }

    let Ok((_, mut container, mut transform)) = objects.get_mut(ev.entity) else {
        return;
    };
    transfer(
        &mut container,
        &mut transform,
        Container::AwaitingRespawn,
        &island,
    );
    scheduler.schedule(
        TimerKey::Respawn(ev.entity),
        RESPAWN_DELAY,
        ScheduledAction::Respawn(ev.entity),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn island() -> IslandFrame {
        IslandFrame::default()
    }

    fn entities<const N: usize>() -> [Entity; N] {
        let mut world = World::new();
        std::array::from_fn(|_| world.spawn_empty().id())
    }

    #[test]
    fn nearby_monster_is_hit_before_ground() {
        let island = island();
        let [thrown, monster] = entities();
        let pos = island.to_world(Vector3::new(3.0, 0.0, 0.0));
        let targets = [(monster, island.to_world(Vector3::new(3.0, 1.0, 0.0)))];
        assert_eq!(
            classify_flight(thrown, pos, &targets, &island),
            Some(FlightOutcome::MonsterHit(monster))
        );
    }

    #[test]
    fn thrown_monster_does_not_hit_itself() {
        let island = island();
        let [me] = entities();
        let pos = island.to_world(Vector3::new(5.0, 4.0, 0.0));
        let targets = [(me, pos)];
        assert_eq!(classify_flight(me, pos, &targets, &island), None);
    }

    #[test]
    fn island_surface_counts_as_ground() {
        let island = island();
        let [e] = entities();
        let pos = island.to_world(Vector3::new(8.0, 0.1, -3.0));
        assert_eq!(classify_flight(e, pos, &[], &island), Some(FlightOutcome::Ground));
    }

    #[test]
    fn village_silhouette_counts_as_ground() {
        let island = island();
        let [e] = entities();
        let pos = island.to_world(Vector3::new(1.0, 2.0, 1.0));
        assert_eq!(classify_flight(e, pos, &[], &island), Some(FlightOutcome::Ground));
    }

    #[test]
    fn high_above_island_keeps_flying() {
        let island = island();
        let [e] = entities();
        let pos = island.to_world(Vector3::new(1.0, 6.0, 1.0));
        assert_eq!(classify_flight(e, pos, &[], &island), None);
    }

    #[test]
    fn beyond_edge_falls_out_below_floor() {
        let island = island();
        let [e] = entities();
        let beside = island.to_world(Vector3::new(20.0, 0.0, 0.0));
        assert_eq!(classify_flight(e, beside, &[], &island), None);
        let below = Vector3::new(40.0, -25.0, -13.0);
        assert_eq!(classify_flight(e, below, &[], &island), Some(FlightOutcome::FallOut));
    }
}
