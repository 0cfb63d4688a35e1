//! Event types exchanged between systems, observers and the host.
//!
//! Submodules:
//! - [`effects`] – particle/trail/flash commands and scoreboard snapshots for the presentation
//! - [`flight`] – a thrown entity hit something or fell off the world
//! - [`gamestate`] – state transition notifications for the session flow
//! - [`monster`] – monster killed / monster reached the village
//! - [`scheduled`] – a delayed action came due
//! - [`select`] – grab button pressed / released per actuator
pub mod effects;
pub mod flight;
pub mod gamestate;
pub mod monster;
pub mod scheduled;
pub mod select;
