//! Spawning and removal of island entities.
//!
//! The renderer owns meshes; this module only creates the ECS side of each
//! object: identity, transforms, container and the hit spheres used for
//! picking. Trees are a root entity plus trunk and crown hit parts linked
//! with `ChildOf`, so despawning the root takes the parts with it.

use bevy_ecs::hierarchy::ChildOf;
use bevy_ecs::prelude::*;
use log::debug;
use raylib::math::Vector3;

use crate::components::container::Container;
use crate::components::grabbable::Grabbable;
use crate::components::hitsphere::HitSphere;
use crate::components::monster::{Monster, MonsterKind};
use crate::components::transform3d::{OriginalTransform, Transform3D};
use crate::events::effects::EffectCmd;
use crate::resources::island::WALK_HEIGHT;
use crate::resources::layout::IslandLayout;
use crate::resources::rng::GameRng;

const TRUNK_RADIUS: f32 = 0.4;
const CROWN_RADIUS: f32 = 0.9;
const CROWN_HEIGHT: f32 = 1.2;
const ROCK_RADIUS: f32 = 0.6;
const ROCK_MIN_SCALE: f32 = 0.8;
const ROCK_MAX_SCALE: f32 = 1.4;
const ROCK_SQUASH: f32 = 0.8;

/// Spawn every tree and rock described by `layout`.
pub fn spawn_island(commands: &mut Commands, layout: &IslandLayout, rng: &mut GameRng) {
    for [x, z] in &layout.trees {
        spawn_tree(commands, Vector3::new(*x, WALK_HEIGHT, *z));
    }
    for [x, z] in &layout.rocks {
        spawn_rock(commands, Vector3::new(*x, WALK_HEIGHT, *z), rng);
    }
    debug!(
        "island populated: {} trees, {} rocks",
        layout.trees.len(),
        layout.rocks.len()
    );
}

fn spawn_resting(commands: &mut Commands, grabbable: Grabbable, transform: Transform3D) -> Entity {
    commands
        .spawn((
            grabbable,
            transform,
            OriginalTransform(transform),
            Container::OnIsland,
        ))
        .id()
}

pub fn spawn_tree(commands: &mut Commands, local_position: Vector3) -> Entity {
    let root = spawn_resting(
        commands,
        Grabbable::tree(),
        Transform3D::from_position(local_position),
    );
    commands.spawn((HitSphere::new(TRUNK_RADIUS), ChildOf(root)));
    commands.spawn((
        HitSphere::new(CROWN_RADIUS).with_offset(Vector3::new(0.0, CROWN_HEIGHT, 0.0)),
        ChildOf(root),
    ));
    root
}

pub fn spawn_rock(commands: &mut Commands, local_position: Vector3, rng: &mut GameRng) -> Entity {
    let s = rng.range(ROCK_MIN_SCALE, ROCK_MAX_SCALE);
    let tau = std::f32::consts::TAU;
    let transform = Transform3D::from_position(local_position)
        .with_scale(Vector3::new(s, s * ROCK_SQUASH, s))
        .with_rotation(Vector3::new(
            rng.range(0.0, tau),
            rng.range(0.0, tau),
            rng.range(0.0, tau),
        ));
    let rock = spawn_resting(commands, Grabbable::rock(), transform);
    commands.entity(rock).insert(HitSphere::new(ROCK_RADIUS));
    rock
}

/// Spawn a monster at an island-local point, facing the village.
pub fn spawn_monster(
    commands: &mut Commands,
    kind: MonsterKind,
    local_position: Vector3,
    target: Vector3,
) -> Entity {
    let heading = (target.x - local_position.x).atan2(target.z - local_position.z);
    let transform =
        Transform3D::from_position(local_position).with_rotation(Vector3::new(0.0, heading, 0.0));
    let monster = spawn_resting(commands, Grabbable::monster(kind), transform);
    commands
        .entity(monster)
        .insert((Monster::new(kind, target), HitSphere::new(kind.body_radius())));
    debug!("spawned {:?} monster {:?} at {:?}", kind, monster, local_position);
    monster
}

/// Despawn a monster, with a debris burst at `burst_at` when given.
pub fn remove_monster(
    commands: &mut Commands,
    effects: &mut MessageWriter<EffectCmd>,
    monster: Entity,
    burst_at: Option<Vector3>,
) {
    if let Some(position) = burst_at {
        effects.write(EffectCmd::ImpactBurst { position });
    }
    commands.entity(monster).try_despawn();
}

/// Put a tree or rock back exactly where it was spawned.
pub fn respawn_object(
    container: &mut Container,
    transform: &mut Transform3D,
    original: &OriginalTransform,
) {
    *container = Container::OnIsland;
    *transform = original.0;
}
