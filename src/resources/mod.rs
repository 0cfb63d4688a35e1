//! ECS resources: global singletons stored in the `World`.
//!
//! Submodules overview:
//! - [`camera`] – desktop camera and mouse picking ray
//! - [`effectsview`] – particles, trails and HUD state on the presentation side
//! - [`gameconfig`] – INI-backed settings
//! - [`gamestate`] – authoritative session state and pending transitions
//! - [`input`] – raw device input and derived per-actuator button edges
//! - [`interaction`] – hover targets, rotation gesture, grab lines
//! - [`island`] – island frame, village health, spawn ring
//! - [`layout`] – tree/rock/spawn placement, optionally from JSON
//! - [`presentation`] – channels to the renderer
//! - [`rng`] – seeded random source
//! - [`scheduler`] – keyed delayed actions with restart invalidation
//! - [`systemsstore`] – state enter hooks
//! - [`wavestate`] – wave progression and score
//! - [`worldtime`] – simulation clock

pub mod camera;
pub mod effectsview;
pub mod gameconfig;
pub mod gamestate;
pub mod input;
pub mod interaction;
pub mod island;
pub mod layout;
pub mod presentation;
pub mod rng;
pub mod scheduler;
pub mod systemsstore;
pub mod wavestate;
pub mod worldtime;
