//! Which holder an entity currently belongs to.
//!
//! An entity is always in exactly one container. Moving between containers
//! goes through [`transfer`], the single place that converts the entity's
//! [`Transform3D`] between island-local and world coordinates, so nothing
//! else has to know which space a position is expressed in.
//!
//! | container          | space        | follows island rotation |
//! |--------------------|--------------|-------------------------|
//! | `OnIsland`         | island-local | yes                     |
//! | `HeldBy(actuator)` | world        | no                      |
//! | `InFlight`         | world        | no                      |
//! | `AwaitingRespawn`  | island-local | hidden                  |

use bevy_ecs::prelude::Component;
use log::debug;
use raylib::math::Vector3;

use crate::components::actuator::ActuatorId;
use crate::components::transform3d::Transform3D;
use crate::resources::island::IslandFrame;

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Container {
    OnIsland,
    HeldBy(ActuatorId),
    InFlight,
    /// Landed tree or rock, hidden and not pickable until respawn.
    AwaitingRespawn,
}

impl Container {
    pub fn is_grabbed(&self) -> bool {
        matches!(self, Container::HeldBy(_))
    }

    pub fn is_thrown(&self) -> bool {
        matches!(self, Container::InFlight)
    }

    /// Resting on the island: pickable, and monsters walk.
    pub fn is_resting(&self) -> bool {
        matches!(self, Container::OnIsland)
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, Container::AwaitingRespawn)
    }

    /// Whether transforms in this container are island-local.
    pub fn island_space(&self) -> bool {
        matches!(self, Container::OnIsland | Container::AwaitingRespawn)
    }
}

/// World-space position of an entity given its container.
pub fn world_position(container: &Container, transform: &Transform3D, island: &IslandFrame) -> Vector3 {
    if container.island_space() {
        island.to_world(transform.position)
    } else {
        transform.position
    }
}

/// Move an entity to `to`, preserving its world pose across the change of
/// coordinate space.
///
/// Callers that want to place the entity somewhere specific mutate the
/// transform *after* the transfer, in the new container's space.
pub fn transfer(
    container: &mut Container,
    transform: &mut Transform3D,
    to: Container,
    island: &IslandFrame,
) {
    let from = *container;
    match (from.island_space(), to.island_space()) {
        (true, false) => {
            transform.position = island.to_world(transform.position);
            transform.rotation.y = island.world_yaw(transform.rotation.y);
        }
        (false, true) => {
            transform.position = island.to_local(transform.position);
            transform.rotation.y -= island.yaw;
        }
        _ => {}
    }
    *container = to;
    debug!("container {:?} -> {:?}", from, to);
}
