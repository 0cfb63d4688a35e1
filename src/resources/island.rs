//! The floating island: its frame in world space, the village and the
//! monster spawn ring.
//!
//! Everything resting on the island stores island-local coordinates. The
//! island frame maps them to world space as
//! `world = pivot + Rx(tilt) · Ry(yaw) · local`, so the island can be spun by
//! the two-handed gesture without touching the entities on it.

use bevy_ecs::prelude::Resource;
use raylib::math::Vector3;
use smallvec::SmallVec;

use crate::spatial::{rotate_x, rotate_y};

pub const DEFAULT_ISLAND_PIVOT: Vector3 = Vector3 {
    x: 0.0,
    y: -7.0,
    z: -13.0,
};
/// Tilt toward the viewer, 25 degrees.
pub const DEFAULT_ISLAND_TILT: f32 = 25.0 * std::f32::consts::PI / 180.0;
pub const VILLAGE_MAX_HP: u32 = 100;
/// Radius of the ring monsters spawn on, also the clamp for dropped monsters.
pub const SPAWN_RING_RADIUS: f32 = 6.5;
/// Island-local height monsters walk at.
pub const WALK_HEIGHT: f32 = 1.0;

/// Transform of the island container.
#[derive(Resource, Clone, Copy, Debug)]
pub struct IslandFrame {
    pub pivot: Vector3,
    /// Fixed pitch around X, radians.
    pub tilt: f32,
    /// Yaw around the island's own up axis, radians. Mutated only by the
    /// rotation gesture and reset.
    pub yaw: f32,
}

impl Default for IslandFrame {
    fn default() -> Self {
        Self {
            pivot: DEFAULT_ISLAND_PIVOT,
            tilt: DEFAULT_ISLAND_TILT,
            yaw: 0.0,
        }
    }
}

impl IslandFrame {
    pub fn to_world(&self, local: Vector3) -> Vector3 {
        self.pivot + rotate_x(rotate_y(local, self.yaw), self.tilt)
    }

    pub fn to_local(&self, world: Vector3) -> Vector3 {
        rotate_y(rotate_x(world - self.pivot, -self.tilt), -self.yaw)
    }

    /// Combined yaw an island-local heading has in world space (tilt ignored).
    pub fn world_yaw(&self, local_yaw: f32) -> f32 {
        local_yaw + self.yaw
    }
}

/// Village health.
#[derive(Resource, Clone, Copy, Debug)]
pub struct Village {
    pub hp: u32,
    pub max_hp: u32,
}

impl Default for Village {
    fn default() -> Self {
        Self {
            hp: VILLAGE_MAX_HP,
            max_hp: VILLAGE_MAX_HP,
        }
    }
}

impl Village {
    /// Apply `amount` damage, clamping at zero.
    ///
    /// Returns `true` exactly when the village has been destroyed.
    pub fn damage(&mut self, amount: u32) -> bool {
        self.hp = self.hp.saturating_sub(amount);
        self.hp == 0
    }

    pub fn reset(&mut self) {
        self.hp = self.max_hp;
    }

    pub fn fraction(&self) -> f32 {
        if self.max_hp == 0 {
            return 0.0;
        }
        self.hp as f32 / self.max_hp as f32
    }
}

/// Island-local points monsters appear at.
#[derive(Resource, Clone, Debug, Default)]
pub struct SpawnPoints {
    pub points: SmallVec<[Vector3; 8]>,
}

impl SpawnPoints {
    /// `count` points evenly spaced on a ring at walking height.
    pub fn ring(count: usize, radius: f32) -> Self {
        let points = (0..count)
            .map(|i| {
                let angle = i as f32 / count as f32 * std::f32::consts::TAU;
                Vector3::new(angle.cos() * radius, WALK_HEIGHT, angle.sin() * radius)
            })
            .collect();
        Self { points }
    }

    pub fn pick(&self, rng: &mut fastrand::Rng) -> Option<Vector3> {
        if self.points.is_empty() {
            return None;
        }
        Some(self.points[rng.usize(..self.points.len())])
    }
}
