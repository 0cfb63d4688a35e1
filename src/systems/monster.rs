//! Monster locomotion.
//!
//! Active monsters resting on the island walk in a straight line toward their
//! island-local target, face it, and bob while walking. Held and thrown
//! monsters are moved by the interaction systems instead.

use bevy_ecs::prelude::*;

use crate::components::container::Container;
use crate::components::monster::Monster;
use crate::components::transform3d::Transform3D;
use crate::resources::island::WALK_HEIGHT;
use crate::resources::worldtime::WorldTime;

pub const BOB_FREQUENCY: f32 = 10.0;
pub const BOB_HEIGHT: f32 = 0.2;

pub fn monster_motion_system(
    time: Res<WorldTime>,
    mut monsters: Query<(&Monster, &Container, &mut Transform3D)>,
) {
    let bob = (time.elapsed * BOB_FREQUENCY).sin().abs() * BOB_HEIGHT;
    for (monster, container, mut transform) in monsters.iter_mut() {
        if !monster.is_active || !container.is_resting() {
            continue;
        }
        let dx = monster.target.x - transform.position.x;
        let dz = monster.target.z - transform.position.z;
        let distance = (dx * dx + dz * dz).sqrt();
        if distance > f32::EPSILON {
            let step = (monster.move_speed * time.delta).min(distance);
            transform.position.x += dx / distance * step;
            transform.position.z += dz / distance * step;
            transform.rotation.y = dx.atan2(dz);
        }
        transform.position.y = WALK_HEIGHT + bob;
    }
}
