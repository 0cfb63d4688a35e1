//! Presentation-side state fed by the simulation channels.
//!
//! [`EffectsView`] owns the [`PresentationFeed`] and turns the effect
//! commands into short-lived visuals:
//!
//! - impact bursts: [`BURST_PARTICLES`] debris particles thrown outward that
//!   fall under gravity and fade over [`PARTICLE_LIFETIME`] seconds
//! - trails: the last [`TRAIL_LENGTH`] world positions of each thrown object
//! - village flash: a timer the HUD uses to tint the health bar
//!
//! It also keeps the most recent [`ScoreboardUpdate`] for the HUD. Nothing
//! here feeds back into the simulation.

use std::collections::VecDeque;

use bevy_ecs::prelude::*;
use raylib::math::Vector3;
use rustc_hash::FxHashMap;

use crate::components::container::{Container, world_position};
use crate::components::transform3d::Transform3D;
use crate::events::effects::{EffectCmd, ScoreboardUpdate, TrailColor};
use crate::resources::island::IslandFrame;
use crate::resources::presentation::PresentationFeed;

pub const BURST_PARTICLES: usize = 20;
pub const PARTICLE_LIFETIME: f32 = 1.0;
pub const PARTICLE_GRAVITY: f32 = 9.8;
pub const TRAIL_LENGTH: usize = 30;
pub const FLASH_DURATION: f32 = 0.3;

#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub position: Vector3,
    pub velocity: Vector3,
    /// Seconds left, starting at [`PARTICLE_LIFETIME`].
    pub life: f32,
}

impl Particle {
    /// Opacity in `[0, 1]`.
    pub fn alpha(&self) -> f32 {
        (self.life / PARTICLE_LIFETIME).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone)]
pub struct Trail {
    pub color: TrailColor,
    pub points: VecDeque<Vector3>,
}

pub struct EffectsView {
    feed: PresentationFeed,
    rng: fastrand::Rng,
    pub particles: Vec<Particle>,
    pub trails: FxHashMap<Entity, Trail>,
    pub flash: f32,
    pub scoreboard: ScoreboardUpdate,
}

impl EffectsView {
    pub fn new(feed: PresentationFeed) -> Self {
        Self {
            feed,
            rng: fastrand::Rng::new(),
            particles: Vec::new(),
            trails: FxHashMap::default(),
            flash: 0.0,
            scoreboard: ScoreboardUpdate::default(),
        }
    }

    /// Drain the channels, sample trail positions from `world` and age every
    /// visual by `dt`.
    pub fn update(&mut self, world: &mut World, dt: f32) {
        let cmds: Vec<EffectCmd> = self.feed.effects.try_iter().collect();
        for cmd in cmds {
            self.apply(cmd);
        }
        if let Some(update) = self.feed.latest_scoreboard() {
            self.scoreboard = update;
        }
        self.sample_trails(world);
        self.advance(dt);
    }

    pub fn apply(&mut self, cmd: EffectCmd) {
        match cmd {
            EffectCmd::ImpactBurst { position } => self.burst(position),
            EffectCmd::TrailStart { entity, color } => {
                self.trails.insert(
                    entity,
                    Trail {
                        color,
                        points: VecDeque::with_capacity(TRAIL_LENGTH),
                    },
                );
            }
            EffectCmd::TrailStop { entity } => {
                self.trails.remove(&entity);
            }
            EffectCmd::VillageFlash => self.flash = FLASH_DURATION,
        }
    }

    fn burst(&mut self, position: Vector3) {
        for _ in 0..BURST_PARTICLES {
            let velocity = Vector3::new(
                (self.rng.f32() - 0.5) * 8.0,
                self.rng.f32() * 6.0 + 2.0,
                (self.rng.f32() - 0.5) * 8.0,
            );
            self.particles.push(Particle {
                position,
                velocity,
                life: PARTICLE_LIFETIME,
            });
        }
    }

    fn sample_trails(&mut self, world: &mut World) {
        if self.trails.is_empty() {
            return;
        }
        let island = *world.resource::<IslandFrame>();
        let mut q = world.query::<(&Container, &Transform3D)>();
        self.trails.retain(|entity, trail| {
            let Ok((container, transform)) = q.get(world, *entity) else {
                return false;
            };
            if trail.points.len() == TRAIL_LENGTH {
                trail.points.pop_front();
            }
            trail
                .points
                .push_back(world_position(container, transform, &island));
            true
        });
    }

    /// Age particles and the flash timer.
    pub fn advance(&mut self, dt: f32) {
        for p in self.particles.iter_mut() {
            p.velocity.y -= PARTICLE_GRAVITY * dt;
            p.position = p.position + p.velocity * dt;
            p.life -= dt;
        }
        self.particles.retain(|p| p.life > 0.0);
        self.flash = (self.flash - dt).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::presentation::setup_presentation;

    fn view() -> EffectsView {
        let mut world = World::new();
        EffectsView::new(setup_presentation(&mut world))
    }

    #[test]
    fn burst_spawns_particles_that_expire() {
        let mut v = view();
        v.apply(EffectCmd::ImpactBurst {
            position: Vector3::zero(),
        });
        assert_eq!(v.particles.len(), BURST_PARTICLES);
        v.advance(0.5);
        assert_eq!(v.particles.len(), BURST_PARTICLES);
        assert!(v.particles.iter().all(|p| (p.alpha() - 0.5).abs() < 1e-5));
        v.advance(0.6);
        assert!(v.particles.is_empty());
    }

    #[test]
    fn trail_keeps_last_points_and_stops() {
        let mut world = World::new();
        world.insert_resource(IslandFrame::default());
        let e = world
            .spawn((Container::InFlight, Transform3D::default()))
            .id();
        let mut v = view();
        v.apply(EffectCmd::TrailStart {
            entity: e,
            color: TrailColor::Orange,
        });
        for i in 0..(TRAIL_LENGTH + 10) {
            world.get_mut::<Transform3D>(e).unwrap().position.x = i as f32;
            v.update(&mut world, 0.016);
        }
        let trail = &v.trails[&e];
        assert_eq!(trail.points.len(), TRAIL_LENGTH);
        assert_eq!(trail.points.back().unwrap().x, (TRAIL_LENGTH + 9) as f32);
        v.apply(EffectCmd::TrailStop { entity: e });
        assert!(v.trails.is_empty());
    }

    #[test]
    fn trail_of_despawned_entity_is_dropped() {
        let mut world = World::new();
        world.insert_resource(IslandFrame::default());
        let e = world.spawn_empty().id();
        world.despawn(e);
        let mut v = view();
        v.apply(EffectCmd::TrailStart {
            entity: e,
            color: TrailColor::Red,
        });
        v.update(&mut world, 0.016);
        assert!(v.trails.is_empty());
    }

    #[test]
    fn flash_decays() {
        let mut v = view();
        v.apply(EffectCmd::VillageFlash);
        v.advance(FLASH_DURATION + 0.1);
        assert_eq!(v.flash, 0.0);
    }
}
