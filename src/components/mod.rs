//! ECS components for island entities.
//!
//! Submodules overview:
//! - [`actuator`] – a hand (controller or mouse) with grab state and motion history
//! - [`container`] – which holder an entity belongs to, and the transfer between them
//! - [`flight`] – ballistic state of a thrown entity
//! - [`grabbable`] – identity and damage of pick-up-able objects
//! - [`highlight`] – hover marker
//! - [`hitsphere`] – picking volume
//! - [`monster`] – monster stats and health
//! - [`transform3d`] – position/rotation/scale plus the spawn-time copy
//! - [`velocitytracker`] – bounded history used to pick throw velocity

pub mod actuator;
pub mod container;
pub mod flight;
pub mod grabbable;
pub mod highlight;
pub mod hitsphere;
pub mod monster;
pub mod transform3d;
pub mod velocitytracker;
