//! Island defense game core.
//!
//! A floating island is attacked by waves of monsters walking toward the
//! village at its center. The player grabs trees, rocks and monsters and
//! throws them. This crate holds the ECS components, resources, systems and
//! events for the interaction physics and the wave state machine, and a
//! small raylib presentation for the desktop.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod spatial;
pub mod systems;
pub mod worldbuilder;
