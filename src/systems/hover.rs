//! Pointer ray picking and hover highlighting.
//!
//! Each frame every empty-handed actuator casts its pointer ray against all
//! [`HitSphere`]s. The nearest hit is resolved upward through `ChildOf`
//! links to the first entity carrying [`Grabbable`]; that root becomes the
//! actuator's hover target and gets the [`Highlighted`] marker. Only objects
//! resting on the island are candidates.
//!
//! Ancestor walks stop after [`MAX_ANCESTOR_HOPS`] links. A longer chain
//! (or a cycle) resolves to "nothing found".

use bevy_ecs::hierarchy::ChildOf;
use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemParam;
use raylib::math::Vector3;
use smallvec::SmallVec;

use crate::components::actuator::Actuator;
use crate::components::container::{Container, world_position};
use crate::components::grabbable::Grabbable;
use crate::components::highlight::Highlighted;
use crate::components::hitsphere::HitSphere;
use crate::components::transform3d::Transform3D;
use crate::resources::input::{InputMode, InputState, PointerRay};
use crate::resources::interaction::{HoverHit, HoverState};
use crate::resources::island::IslandFrame;
use crate::spatial::ray_sphere;

pub const MAX_ANCESTOR_HOPS: usize = 50;

/// Walk from `start` through its `ChildOf` parents and return the first
/// entity `accept` likes, checking `start` itself first.
pub fn find_ancestor(
    start: Entity,
    parents: &Query<&ChildOf>,
    mut accept: impl FnMut(Entity) -> bool,
) -> Option<Entity> {
    let mut current = start;
    for _ in 0..=MAX_ANCESTOR_HOPS {
        if accept(current) {
            return Some(current);
        }
        current = parents.get(current).ok()?.parent();
    }
    None
}

/// Queries needed to resolve pointer rays into grabbable entities.
#[derive(SystemParam)]
pub struct Picking<'w, 's> {
    pub spheres: Query<'w, 's, (Entity, &'static HitSphere)>,
    pub objects: Query<'w, 's, (&'static Transform3D, &'static Container)>,
    pub parents: Query<'w, 's, &'static ChildOf>,
    pub grabbables: Query<'w, 's, &'static Container, With<Grabbable>>,
    pub island: Res<'w, IslandFrame>,
}

impl Picking<'_, '_> {
    /// World-space center and radius of a hit sphere, taken from the nearest
    /// ancestor that has a transform. Hidden owners are not pickable.
    fn sphere_bounds(&self, entity: Entity, sphere: &HitSphere) -> Option<(Vector3, f32)> {
        let owner = find_ancestor(entity, &self.parents, |e| self.objects.contains(e))?;
        let (transform, container) = self.objects.get(owner).ok()?;
        if !container.is_visible() {
            return None;
        }
        let scale = transform.max_scale();
        let mut shifted = *transform;
        shifted.position = transform.position + sphere.offset * scale;
        Some((
            world_position(container, &shifted, &self.island),
            sphere.radius * scale,
        ))
    }

    /// Nearest resting grabbable along `ray`.
    pub fn pick(&self, ray: PointerRay) -> Option<HoverHit> {
        let mut hits: SmallVec<[(f32, Entity); 8]> = SmallVec::new();
        for (entity, sphere) in self.spheres.iter() {
            let Some((center, radius)) = self.sphere_bounds(entity, sphere) else {
                continue;
            };
            if let Some(distance) = ray_sphere(ray.origin, ray.direction, center, radius) {
                hits.push((distance, entity));
            }
        }
        hits.sort_by(|a, b| a.0.total_cmp(&b.0));
        hits.into_iter().find_map(|(distance, entity)| {
            let root = find_ancestor(entity, &self.parents, |e| self.grabbables.contains(e))?;
            let container = self.grabbables.get(root).ok()?;
            container
                .is_resting()
                .then_some(HoverHit { entity: root, distance })
        })
    }
}

/// Refresh each actuator's hover target and move the highlight marker.
pub fn hover_system(
    mut commands: Commands,
    mode: Res<InputMode>,
    input: Res<InputState>,
    picking: Picking,
    actuators: Query<&Actuator>,
    mut hover: ResMut<HoverState>,
) {
    for actuator in actuators.iter() {
        if !mode.actuators().contains(&actuator.id) {
            continue;
        }
        let id = actuator.id;
        let hit = if actuator.is_gripped() {
            None
        } else {
            input.get(id).ray.and_then(|ray| picking.pick(ray))
        };
        let previous = hover.set(id, hit);
        let previous_entity = previous.map(|h| h.entity);
        let new_entity = hit.map(|h| h.entity);
        if previous_entity == new_entity {
            continue;
        }
        if let Some(old) = previous_entity {
            if !hover.hovered_by_other(id, old) {
                commands.entity(old).try_remove::<Highlighted>();
            }
        }
        if let Some(new) = new_entity {
            commands.entity(new).try_insert(Highlighted { by: id });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::actuator::ActuatorId;
    use bevy_ecs::system::SystemState;

    fn make_world() -> World {
        let mut world = World::new();
        world.insert_resource(InputMode::Vr);
        world.insert_resource(InputState::default());
        world.insert_resource(HoverState::default());
        world.insert_resource(IslandFrame::default());
        world.spawn(Actuator::new(ActuatorId::LeftController));
        world.spawn(Actuator::new(ActuatorId::RightController));
        world
    }

    fn spawn_target(world: &mut World, local: Vector3) -> Entity {
        world
            .spawn((
                Grabbable::rock(),
                Container::OnIsland,
                Transform3D::from_position(local),
                HitSphere::new(0.5),
            ))
            .id()
    }

    /// Point `id` straight down at `entity` from a few units above it.
    fn point_at(world: &mut World, id: ActuatorId, entity: Entity) {
        let island = *world.resource::<IslandFrame>();
        let local = world.get::<Transform3D>(entity).unwrap().position;
        let above = island.to_world(local) + Vector3::new(0.0, 3.0, 0.0);
        world.resource_mut::<InputState>().get_mut(id).ray = Some(PointerRay {
            origin: above,
            direction: Vector3::new(0.0, -1.0, 0.0),
        });
    }

    fn point_at_sky(world: &mut World, id: ActuatorId) {
        world.resource_mut::<InputState>().get_mut(id).ray = Some(PointerRay {
            origin: Vector3::new(0.0, 100.0, 0.0),
            direction: Vector3::new(0.0, 1.0, 0.0),
        });
    }

    fn tick(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(hover_system);
        schedule.run(world);
    }

    fn highlighted(world: &World, entity: Entity) -> bool {
        world.get::<Highlighted>(entity).is_some()
    }

    #[test]
    fn highlight_follows_pointer_between_objects() {
        let mut world = make_world();
        let a = spawn_target(&mut world, Vector3::new(3.0, 1.0, 4.0));
        let b = spawn_target(&mut world, Vector3::new(-3.0, 1.0, -4.0));

        point_at(&mut world, ActuatorId::RightController, a);
        tick(&mut world);
        assert!(highlighted(&world, a));
        assert!(!highlighted(&world, b));
        let hit = world
            .resource::<HoverState>()
            .get(ActuatorId::RightController)
            .unwrap();
        assert_eq!(hit.entity, a);
        assert!((hit.distance - 2.5).abs() < 1e-3);

        point_at(&mut world, ActuatorId::RightController, b);
        tick(&mut world);
        assert!(!highlighted(&world, a));
        assert!(highlighted(&world, b));

        point_at_sky(&mut world, ActuatorId::RightController);
        tick(&mut world);
        assert!(!highlighted(&world, b));
        assert!(world.resource::<HoverState>().get(ActuatorId::RightController).is_none());
    }

    #[test]
    fn shared_hover_keeps_highlight_until_both_leave() {
        let mut world = make_world();
        let a = spawn_target(&mut world, Vector3::new(3.0, 1.0, 4.0));
        point_at(&mut world, ActuatorId::LeftController, a);
        point_at(&mut world, ActuatorId::RightController, a);
        tick(&mut world);
        assert!(highlighted(&world, a));

        point_at_sky(&mut world, ActuatorId::RightController);
        tick(&mut world);
        assert!(highlighted(&world, a));

        point_at_sky(&mut world, ActuatorId::LeftController);
        tick(&mut world);
        assert!(!highlighted(&world, a));
    }

    #[test]
    fn objects_not_resting_are_not_hovered() {
        let mut world = make_world();
        let a = spawn_target(&mut world, Vector3::new(3.0, 1.0, 4.0));
        point_at(&mut world, ActuatorId::RightController, a);
        *world.get_mut::<Container>(a).unwrap() = Container::AwaitingRespawn;
        tick(&mut world);
        assert!(!highlighted(&world, a));
        assert!(world.resource::<HoverState>().get(ActuatorId::RightController).is_none());
    }

    #[test]
    fn ancestor_walk_finds_grabbable_root() {
        let mut world = World::new();
        let root = world.spawn(Grabbable::tree()).id();
        let mid = world.spawn(ChildOf(root)).id();
        let leaf = world.spawn(ChildOf(mid)).id();

        let mut state: SystemState<(Query<&ChildOf>, Query<&Grabbable>)> =
            SystemState::new(&mut world);
        let (parents, grabbables) = state.get(&world);
        let found = find_ancestor(leaf, &parents, |e| grabbables.contains(e));
        assert_eq!(found, Some(root));
    }

    #[test]
    fn ancestor_walk_gives_up_on_deep_chains() {
        let mut world = World::new();
        let root = world.spawn(Grabbable::rock()).id();
        let mut leaf = root;
        for _ in 0..(MAX_ANCESTOR_HOPS + 5) {
            leaf = world.spawn(ChildOf(leaf)).id();
        }

        let mut state: SystemState<(Query<&ChildOf>, Query<&Grabbable>)> =
            SystemState::new(&mut world);
        let (parents, grabbables) = state.get(&world);
        assert_eq!(find_ancestor(leaf, &parents, |e| grabbables.contains(e)), None);
    }

    #[test]
    fn ancestor_walk_accepts_start() {
        let mut world = World::new();
        let e = world.spawn(Grabbable::rock()).id();
        let mut state: SystemState<(Query<&ChildOf>, Query<&Grabbable>)> =
            SystemState::new(&mut world);
        let (parents, grabbables) = state.get(&world);
        assert_eq!(find_ancestor(e, &parents, |x| grabbables.contains(x)), Some(e));
    }
}
