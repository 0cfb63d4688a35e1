//! Grab and release protocol.
//!
//! Per actuator the interaction moves through
//! `Idle → Hovering → Grabbing → (Thrown | Resting)`:
//!
//! - [`grab_observer`] runs on [`SelectStartEvent`]. The hovered object is
//!   detached from the island into world space, shrunk to [`GRAB_SCALE`] and
//!   bound to the actuator.
//! - [`held_object_system`] moves held objects each frame: 1:1 with a
//!   controller, smoothed toward the mouse hand.
//! - [`release_observer`] runs on [`SelectEndEvent`]. A fast enough hand
//!   throws the object; otherwise it is put back on the island.
//!
//! The actuator's `grabbed` field and the object's
//! [`Container::HeldBy`] are always changed together, here and in the
//! session reset.
//!
//! # Related
//! - [`crate::systems::flight`] – what happens after a throw
//! - [`crate::systems::hover`] – how the hover target is found

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info};
use raylib::math::Vector3;

use crate::components::actuator::{Actuator, DEFAULT_GRAB_DISTANCE};
use crate::components::container::{Container, transfer};
use crate::components::flight::Flight;
use crate::components::grabbable::Grabbable;
use crate::components::highlight::Highlighted;
use crate::components::transform3d::{OriginalTransform, Transform3D};
use crate::events::effects::{EffectCmd, TrailColor};
use crate::events::select::{SelectEndEvent, SelectStartEvent};
use crate::resources::input::{InputMode, InputState};
use crate::resources::interaction::{GrabLines, HoverState};
use crate::resources::island::{IslandFrame, SPAWN_RING_RADIUS, WALK_HEIGHT};
use crate::resources::worldtime::WorldTime;
use crate::spatial::planar_length;

/// Held objects are drawn at this fraction of their size.
pub const GRAB_SCALE: f32 = 0.4;
/// Minimum release speed, after the mode multiplier, that counts as a throw.
pub const THROW_THRESHOLD: f32 = 2.0;
/// Per-frame smoothing factor toward the mouse hand.
pub const DESKTOP_SMOOTHING: f32 = 0.2;
/// Spin of a held object around X and Z, radians per second.
pub const HELD_SPIN_RATE: f32 = 2.0;

pub fn grab_observer(
    trigger: On<SelectStartEvent>,
    mut commands: Commands,
    island: Res<IslandFrame>,
    input: Res<InputState>,
    mut hover: ResMut<HoverState>,
    mut actuators: Query<&mut Actuator>,
    mut objects: Query<(&mut Container, &mut Transform3D, Option<&OriginalTransform>)>,
) {
    let id = trigger.event().actuator;
    let Some(mut actuator) = actuators.iter_mut().find(|a| a.id == id) else {
        return;
    };
    if actuator.grabbed.is_some() {
        return;
    }
    let Some(hit) = hover.get(id) else {
        debug!("{:?} select with nothing hovered", id);
        return;
    };
    let Ok((mut container, mut transform, original)) = objects.get_mut(hit.entity) else {
        return;
    };
    if !container.is_resting() {
        return;
    }

    transfer(&mut container, &mut transform, Container::HeldBy(id), &island);
    let base_scale = original.map(|o| o.0.scale).unwrap_or(transform.scale);
    transform.scale = base_scale * GRAB_SCALE;
    if id.is_controller() {
        transform.position = actuator.position;
        transform.rotation = Vector3::zero();
    } else {
        // Tracking restarts at the hit point, not at the old hand distance.
        actuator.grab_distance = hit.distance;
        if let Some(ray) = input.get(id).ray {
            actuator.position = ray.at(hit.distance);
        }
    }
    actuator.reset_tracking();
    actuator.grabbed = Some(hit.entity);

    hover.set(id, None);
    commands.entity(hit.entity).try_remove::<Highlighted>();
    debug!("{:?} grabbed {:?}", id, hit.entity);
}

pub fn release_observer(
    trigger: On<SelectEndEvent>,
    mut commands: Commands,
    mode: Res<InputMode>,
    island: Res<IslandFrame>,
    mut actuators: Query<&mut Actuator>,
    mut objects: Query<(
        &Grabbable,
        &mut Container,
        &mut Transform3D,
        Option<&OriginalTransform>,
    )>,
    mut effects: MessageWriter<EffectCmd>,
) {
    let id = trigger.event().actuator;
    let Some(mut actuator) = actuators.iter_mut().find(|a| a.id == id) else {
        return;
    };
    let Some(entity) = actuator.grabbed.take() else {
        return;
    };
    let velocity = actuator.release_velocity() * mode.throw_strength();
    actuator.grab_distance = DEFAULT_GRAB_DISTANCE;
    actuator.reset_tracking();

    let Ok((grabbable, mut container, mut transform, original)) = objects.get_mut(entity) else {
        return;
    };
    if *container != Container::HeldBy(id) {
        return;
    }
    if let Some(original) = original {
        transform.scale = original.0.scale;
    }

    if velocity.length() >= THROW_THRESHOLD {
        transfer(&mut container, &mut transform, Container::InFlight, &island);
        commands.entity(entity).insert(Flight::new(velocity));
        let color = if grabbable.kind.is_monster() {
            TrailColor::Red
        } else {
            TrailColor::Orange
        };
        effects.write(EffectCmd::TrailStart { entity, color });
        info!(
            "{:?} threw {:?} at {:.1} units/s",
            id,
            grabbable.kind,
            velocity.length()
        );
        return;
    }

    transfer(&mut container, &mut transform, Container::OnIsland, &island);
    if grabbable.kind.is_monster() {
        settle_on_walkway(&mut transform);
    } else if let Some(original) = original {
        transform.rotation = original.0.rotation;
        transform.position = original.0.position;
    }
    debug!("{:?} set down {:?}", id, entity);
}

/// Put a dropped monster back on its feet: walking height, upright, and no
/// further out than the spawn ring.
pub fn settle_on_walkway(transform: &mut Transform3D) {
    let mut p = transform.position;
    let d = planar_length(p);
    if d > SPAWN_RING_RADIUS {
        let k = SPAWN_RING_RADIUS / d;
        p.x *= k;
        p.z *= k;
    }
    p.y = WALK_HEIGHT;
    transform.position = p;
    transform.rotation.x = 0.0;
    transform.rotation.z = 0.0;
}

/// Move held objects with their actuator.
pub fn held_object_system(
    time: Res<WorldTime>,
    actuators: Query<&Actuator>,
    mut objects: Query<(&Container, &mut Transform3D)>,
) {
    let spin = HELD_SPIN_RATE * time.delta;
    for actuator in actuators.iter() {
        let Some(entity) = actuator.grabbed else {
            continue;
        };
        let Ok((container, mut transform)) = objects.get_mut(entity) else {
            continue;
        };
        if *container != Container::HeldBy(actuator.id) {
            continue;
        }
        if actuator.id.is_controller() {
            transform.position = actuator.position;
        } else {
            let current = transform.position;
            transform.position = current + (actuator.position - current) * DESKTOP_SMOOTHING;
        }
        transform.rotation.x += spin;
        transform.rotation.z += spin;
    }
}

/// Show a line from each controller to what it holds.
pub fn grab_lines_system(
    actuators: Query<&Actuator>,
    objects: Query<(&Container, &Transform3D)>,
    mut lines: ResMut<GrabLines>,
) {
    for actuator in actuators.iter() {
        let Some(line) = lines.get_mut(actuator.id) else {
            continue;
        };
        let held = actuator
            .grabbed
            .and_then(|e| objects.get(e).ok())
            .filter(|(c, _)| c.is_grabbed());
        match held {
            Some((_, transform)) => {
                line.visible = true;
                line.start = actuator.position;
                line.end = transform.position;
            }
            None => line.visible = false,
        }
    }
}
