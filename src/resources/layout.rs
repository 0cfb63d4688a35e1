//! Island layout description.
//!
//! Where trees, rocks and monster spawn points sit on the island. The
//! built-in layout reproduces the classic island; a JSON file can replace
//! any part of it:
//!
//! ```json
//! {
//!   "trees": [[5.0, 3.0], [-5.0, 3.0]],
//!   "rocks": [[3.0, 4.0]],
//!   "spawn_points": 12,
//!   "spawn_radius": 6.5
//! }
//! ```
//!
//! Positions are island-local `[x, z]` pairs; every object stands at walking
//! height.

use bevy_ecs::prelude::Resource;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::resources::island::SPAWN_RING_RADIUS;

const DEFAULT_SPAWN_POINTS: usize = 8;

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IslandLayout {
    pub trees: Vec<[f32; 2]>,
    pub rocks: Vec<[f32; 2]>,
    pub spawn_points: usize,
    pub spawn_radius: f32,
}

impl Default for IslandLayout {
    fn default() -> Self {
        Self {
            trees: vec![
                [5.0, 3.0],
                [-5.0, 3.0],
                [5.0, -3.0],
                [-5.0, -3.0],
                [4.0, 5.0],
                [-4.0, 5.0],
                [4.0, -5.0],
                [-4.0, -5.0],
                [6.0, 0.0],
                [-6.0, 0.0],
                [0.0, 6.0],
                [0.0, -6.0],
            ],
            rocks: vec![
                [3.0, 4.0],
                [-3.0, 4.0],
                [3.0, -4.0],
                [-3.0, -4.0],
                [5.5, 1.0],
                [-5.5, 1.0],
                [5.5, -1.0],
                [-5.5, -1.0],
            ],
            spawn_points: DEFAULT_SPAWN_POINTS,
            spawn_radius: SPAWN_RING_RADIUS,
        }
    }
}

impl IslandLayout {
    pub fn from_json(text: &str) -> Result<Self, String> {
        serde_json::from_str(text).map_err(|e| format!("Invalid island layout: {}", e))
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read layout {:?}: {}", path, e))?;
        let layout = Self::from_json(&text)?;
        info!(
            "Loaded layout {:?}: {} trees, {} rocks, {} spawn points",
            path,
            layout.trees.len(),
            layout.rocks.len(),
            layout.spawn_points
        );
        Ok(layout)
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("Failed to encode layout: {}", e))
    }
}
