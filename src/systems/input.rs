//! Input systems.
//!
//! - [`poll_desktop_input`] reads mouse and keyboard from raylib into
//!   [`RawInput`]. It runs on the host side, outside the schedule.
//! - [`update_input_state`] derives per-actuator button edges and pointer
//!   rays from [`RawInput`] for the active [`InputMode`].
//! - [`emit_select_events`] turns select edges into
//!   [`SelectStartEvent`] / [`SelectEndEvent`] triggers.
use bevy_ecs::prelude::*;
use raylib::ffi::{KeyboardKey, MouseButton};
use raylib::math::Vector3;

use crate::components::actuator::ActuatorId;
use crate::events::select::{SelectEndEvent, SelectStartEvent};
use crate::resources::camera::DesktopCamera;
use crate::resources::input::{InputMode, InputState, PointerRay, RawInput};

/// Key that grabs on the desktop, next to the left mouse button.
pub const GRAB_KEY: KeyboardKey = KeyboardKey::KEY_B;

/// Sample raylib's mouse and keyboard into [`RawInput`] and keep the camera
/// aspect ratio in sync with the window.
///
/// The mouse hand stays inactive until the cursor has moved once, so a
/// window opened under a resting cursor does not start hovering things.
pub fn poll_desktop_input(world: &mut World, rl: &raylib::RaylibHandle) {
    let width = rl.get_screen_width().max(1) as f32;
    let height = rl.get_screen_height().max(1) as f32;
    world.resource_mut::<DesktopCamera>().aspect = width / height;

    let delta = rl.get_mouse_delta();
    let mouse = rl.get_mouse_position();
    let grab =
        rl.is_key_down(GRAB_KEY) || rl.is_mouse_button_down(MouseButton::MOUSE_BUTTON_LEFT);

    let mut raw = world.resource_mut::<RawInput>();
    if raw.mouse_ndc.is_some() || delta.x != 0.0 || delta.y != 0.0 {
        raw.mouse_ndc = Some((mouse.x / width * 2.0 - 1.0, -(mouse.y / height * 2.0 - 1.0)));
    }
    raw.grab_button = grab;
}

/// Derive [`InputState`] from [`RawInput`].
pub fn update_input_state(
    raw: Res<RawInput>,
    mode: Res<InputMode>,
    camera: Res<DesktopCamera>,
    mut input: ResMut<InputState>,
) {
    match *mode {
        InputMode::Desktop => {
            let mouse = input.get_mut(ActuatorId::Mouse);
            mouse.select.update(raw.grab_button);
            mouse.ray = raw
                .mouse_ndc
                .map(|(x, y)| camera.ray_through_ndc(x, y));
            mouse.position = None;
        }
        InputMode::Vr => {
            for id in [ActuatorId::LeftController, ActuatorId::RightController] {
                let Some(pose) = raw.controller(id).copied() else {
                    continue;
                };
                let state = input.get_mut(id);
                if pose.connected {
                    state.select.update(pose.trigger);
                    state.squeeze.update(pose.squeeze);
                    let direction = if pose.forward.length() > 1e-6 {
                        pose.forward.normalized()
                    } else {
                        Vector3::new(0.0, 0.0, -1.0)
                    };
                    state.ray = Some(PointerRay {
                        origin: pose.position,
                        direction,
                    });
                    state.position = Some(pose.position);
                } else {
                    // A controller that drops out releases whatever it held.
                    state.select.update(false);
                    state.squeeze.update(false);
                    state.ray = None;
                    state.position = None;
                }
            }
        }
    }
}

/// Trigger select events on this frame's button edges.
pub fn emit_select_events(input: Res<InputState>, mode: Res<InputMode>, mut commands: Commands) {
    for &actuator in mode.actuators() {
        let select = input.get(actuator).select;
        if select.just_released {
            commands.trigger(SelectEndEvent { actuator });
        }
        if select.just_pressed {
            commands.trigger(SelectStartEvent { actuator });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::input::ControllerPose;

    fn make_world(mode: InputMode) -> World {
        let mut world = World::new();
        world.insert_resource(mode);
        world.insert_resource(RawInput::default());
        world.insert_resource(InputState::default());
        world.insert_resource(DesktopCamera::default());
        world
    }

    fn tick(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(update_input_state);
        schedule.run(world);
    }

    #[test]
    fn desktop_mouse_ray_appears_after_movement() {
        let mut world = make_world(InputMode::Desktop);
        tick(&mut world);
        assert!(world.resource::<InputState>().mouse.ray.is_none());
        world.resource_mut::<RawInput>().mouse_ndc = Some((0.0, 0.0));
        tick(&mut world);
        assert!(world.resource::<InputState>().mouse.ray.is_some());
    }

    #[test]
    fn desktop_grab_button_edges() {
        let mut world = make_world(InputMode::Desktop);
        world.resource_mut::<RawInput>().grab_button = true;
        tick(&mut world);
        assert!(world.resource::<InputState>().mouse.select.just_pressed);
        tick(&mut world);
        assert!(!world.resource::<InputState>().mouse.select.just_pressed);
        world.resource_mut::<RawInput>().grab_button = false;
        tick(&mut world);
        assert!(world.resource::<InputState>().mouse.select.just_released);
    }

    #[test]
    fn vr_controller_pose_becomes_ray_and_position() {
        let mut world = make_world(InputMode::Vr);
        world.resource_mut::<RawInput>().right = ControllerPose {
            connected: true,
            position: Vector3::new(0.3, 1.2, -0.4),
            forward: Vector3::new(0.0, 0.0, -2.0),
            trigger: true,
            squeeze: false,
        };
        tick(&mut world);
        let input = world.resource::<InputState>();
        assert_eq!(input.right.position, Some(Vector3::new(0.3, 1.2, -0.4)));
        let ray = input.right.ray.unwrap();
        assert!((ray.direction.length() - 1.0).abs() < 1e-6);
        assert!(input.right.select.just_pressed);
        assert!(input.left.ray.is_none());
    }

    #[test]
    fn disconnected_controller_releases_select() {
        let mut world = make_world(InputMode::Vr);
        world.resource_mut::<RawInput>().left = ControllerPose {
            connected: true,
            trigger: true,
            ..ControllerPose::default()
        };
        tick(&mut world);
        world.resource_mut::<RawInput>().left.connected = false;
        tick(&mut world);
        let input = world.resource::<InputState>();
        assert!(input.left.select.just_released);
        assert!(input.left.position.is_none());
    }
}
