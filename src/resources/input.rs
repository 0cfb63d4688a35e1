//! Per-frame input resources.
//!
//! The host writes device state into [`RawInput`] each frame: mouse position
//! and the grab button on the desktop, controller poses in VR. The
//! [`update_input_state`](crate::systems::input::update_input_state) system
//! turns that into [`InputState`]: one [`ButtonState`] per actuator with
//! press/release edges and a world-space pointer ray.
//!
//! Only the actuators of the active [`InputMode`] are ever populated.

use bevy_ecs::prelude::*;
use raylib::math::Vector3;

use crate::components::actuator::ActuatorId;

/// Which modality drives the session. Chosen once at startup.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Desktop,
    Vr,
}

impl InputMode {
    /// Actuators that exist in this mode.
    pub fn actuators(&self) -> &'static [ActuatorId] {
        match self {
            InputMode::Desktop => &[ActuatorId::Mouse],
            InputMode::Vr => &[ActuatorId::LeftController, ActuatorId::RightController],
        }
    }

    /// Multiplier from hand speed to throw speed.
    pub fn throw_strength(&self) -> f32 {
        match self {
            InputMode::Desktop => 1.5,
            InputMode::Vr => 10.0,
        }
    }
}

/// Pose and buttons of one motion controller as reported by the XR runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerPose {
    pub connected: bool,
    pub position: Vector3,
    /// Pointing direction, need not be normalized.
    pub forward: Vector3,
    /// Select / trigger button.
    pub trigger: bool,
    /// Grip squeeze, used for the two-handed island rotation.
    pub squeeze: bool,
}

impl Default for ControllerPose {
    fn default() -> Self {
        Self {
            connected: false,
            position: Vector3::zero(),
            forward: Vector3::new(0.0, 0.0, -1.0),
            trigger: false,
            squeeze: false,
        }
    }
}

/// Device state as written by the host before the schedule runs.
#[derive(Resource, Debug, Clone, Default)]
pub struct RawInput {
    /// Mouse in normalized device coordinates, x right and y up in [-1, 1].
    /// `None` until the mouse has moved over the window.
    pub mouse_ndc: Option<(f32, f32)>,
    /// Desktop grab button (B key or left mouse button).
    pub grab_button: bool,
    pub left: ControllerPose,
    pub right: ControllerPose,
}

impl RawInput {
    pub fn controller(&self, id: ActuatorId) -> Option<&ControllerPose> {
        match id {
            ActuatorId::LeftController => Some(&self.left),
            ActuatorId::RightController => Some(&self.right),
            ActuatorId::Mouse => None,
        }
    }
}

/// Boolean button state with edges for the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    pub active: bool,
    pub just_pressed: bool,
    pub just_released: bool,
}

impl ButtonState {
    /// Feed the raw level for this frame and derive the edges.
    pub fn update(&mut self, down: bool) {
        self.just_pressed = down && !self.active;
        self.just_released = !down && self.active;
        self.active = down;
    }
}

/// World-space pointing ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerRay {
    pub origin: Vector3,
    /// Unit direction.
    pub direction: Vector3,
}

impl PointerRay {
    pub fn at(&self, distance: f32) -> Vector3 {
        self.origin + self.direction * distance
    }
}

/// Derived per-actuator input for this frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActuatorInput {
    pub select: ButtonState,
    pub squeeze: ButtonState,
    pub ray: Option<PointerRay>,
    /// Tracked position for controllers; `None` for the mouse hand, whose
    /// position depends on its grab distance.
    pub position: Option<Vector3>,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct InputState {
    pub left: ActuatorInput,
    pub right: ActuatorInput,
    pub mouse: ActuatorInput,
}

impl InputState {
    pub fn get(&self, id: ActuatorId) -> &ActuatorInput {
        match id {
            ActuatorId::LeftController => &self.left,
            ActuatorId::RightController => &self.right,
            ActuatorId::Mouse => &self.mouse,
        }
    }

    pub fn get_mut(&mut self, id: ActuatorId) -> &mut ActuatorInput {
        match id {
            ActuatorId::LeftController => &mut self.left,
            ActuatorId::RightController => &mut self.right,
            ActuatorId::Mouse => &mut self.mouse,
        }
    }

    pub fn both_squeezing(&self) -> bool {
        self.left.squeeze.active && self.right.squeeze.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_edges_last_one_frame() {
        let mut b = ButtonState::default();
        b.update(true);
        assert!(b.active && b.just_pressed && !b.just_released);
        b.update(true);
        assert!(b.active && !b.just_pressed);
        b.update(false);
        assert!(!b.active && b.just_released);
        b.update(false);
        assert!(!b.just_released);
    }

    #[test]
    fn mode_actuators_are_exclusive() {
        assert_eq!(InputMode::Desktop.actuators(), &[ActuatorId::Mouse]);
        assert!(!InputMode::Vr.actuators().contains(&ActuatorId::Mouse));
    }

    #[test]
    fn throw_strength_by_mode() {
        assert_eq!(InputMode::Desktop.throw_strength(), 1.5);
        assert_eq!(InputMode::Vr.throw_strength(), 10.0);
    }

    #[test]
    fn both_squeezing_requires_both() {
        let mut input = InputState::default();
        input.left.squeeze.update(true);
        assert!(!input.both_squeezing());
        input.right.squeeze.update(true);
        assert!(input.both_squeezing());
    }
}
