//! Game systems.
//!
//! Everything that advances the simulation each frame, plus the host-side
//! input polling and rendering.
//!
//! Submodules overview
//! - [`actuator`] – move actuators with their device and record hand velocity
//! - [`flight`] – integrate thrown objects and resolve what they hit
//! - [`gamestate`] – check for pending state transitions and trigger events
//! - [`grab`] – grab/release observers, held object motion, grab lines
//! - [`hover`] – pointer ray picking and highlight markers
//! - [`input`] – read device input and update [`crate::resources::input::InputState`]
//! - [`monster`] – monsters walking toward the village
//! - [`presentation`] – forward effects and scoreboard updates over channels
//! - [`render`] – draw the island and HUD using Raylib
//! - [`rotation`] – two-handed island rotation gesture
//! - [`scheduler`] – fire delayed actions (wave starts, respawns, restart)
//! - [`time`] – update simulation time and delta
//! - [`wave`] – spawning, village damage, wave completion and scoring

pub mod actuator;
pub mod flight;
pub mod gamestate;
pub mod grab;
pub mod hover;
pub mod input;
pub mod monster;
pub mod presentation;
pub mod render;
pub mod rotation;
pub mod scheduler;
pub mod time;
pub mod wave;
