//! Game configuration resource.
//!
//! Settings loaded from an INI file at startup. Every value has a default so
//! the game starts even without a config file.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1280
//! height = 720
//! target_fps = 60
//! vsync = true
//!
//! [session]
//! seed = 0
//! time_scale = 1.0
//! layout = island.json
//! ```
//!
//! A `seed` of 0 means "seed from the clock". `layout` is optional; without
//! it the built-in island is used.

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_SEED: u64 = 0;
const DEFAULT_TIME_SCALE: f32 = 1.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    pub target_fps: u32,
    pub vsync: bool,
    /// RNG seed; 0 picks one from the clock.
    pub seed: u64,
    /// Multiplier applied to every frame delta.
    pub time_scale: f32,
    /// Optional island layout JSON.
    pub layout_path: Option<PathBuf>,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            vsync: DEFAULT_VSYNC,
            seed: DEFAULT_SEED,
            time_scale: DEFAULT_TIME_SCALE,
            layout_path: None,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current values.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file {:?}: {}", self.config_path, e))?;

        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(vsync) = config.getbool("window", "vsync").ok().flatten() {
            self.vsync = vsync;
        }

        // [session] section
        if let Some(seed) = config.getuint("session", "seed").ok().flatten() {
            self.seed = seed;
        }
        if let Some(scale) = config.getfloat("session", "time_scale").ok().flatten() {
            self.time_scale = scale as f32;
        }
        if let Some(layout) = config.get("session", "layout") {
            let layout = layout.trim();
            if !layout.is_empty() {
                self.layout_path = Some(PathBuf::from(layout));
            }
        }

        info!(
            "Loaded config: {}x{} window, fps={}, vsync={}, seed={}, time_scale={}, layout={:?}",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.vsync,
            self.seed,
            self.time_scale,
            self.layout_path
        );

        Ok(())
    }

    /// Save configuration to the INI file, creating it if needed.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set("window", "vsync", Some(self.vsync.to_string()));

        config.set("session", "seed", Some(self.seed.to_string()));
        config.set("session", "time_scale", Some(self.time_scale.to_string()));
        config.set(
            "session",
            "layout",
            self.layout_path.as_ref().map(|p| p.display().to_string()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file {:?}: {}", self.config_path, e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Seed to feed the game RNG, resolving 0 to a clock-derived value.
    pub fn effective_seed(&self) -> u64 {
        if self.seed != 0 {
            return self.seed;
        }
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("island_defense_{}_{}.ini", name, std::process::id()))
    }

    #[test]
    fn missing_file_is_an_error_and_keeps_defaults() {
        let mut cfg = GameConfig::with_path(temp_path("missing_does_not_exist"));
        assert!(cfg.load_from_file().is_err());
        assert_eq!(cfg.window_width, DEFAULT_WINDOW_WIDTH);
        assert_eq!(cfg.seed, DEFAULT_SEED);
    }

    #[test]
    fn partial_file_overrides_only_present_keys() {
        let path = temp_path("partial");
        std::fs::write(&path, "[window]\nwidth = 800\n[session]\nseed = 42\n").unwrap();
        let mut cfg = GameConfig::with_path(&path);
        cfg.load_from_file().unwrap();
        assert_eq!(cfg.window_width, 800);
        assert_eq!(cfg.window_height, DEFAULT_WINDOW_HEIGHT);
        assert_eq!(cfg.seed, 42);
        assert!(cfg.layout_path.is_none());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn save_then_load_preserves_values() {
        let path = temp_path("save");
        let mut cfg = GameConfig::with_path(&path);
        cfg.target_fps = 144;
        cfg.vsync = false;
        cfg.seed = 7;
        cfg.layout_path = Some(PathBuf::from("island.json"));
        cfg.save_to_file().unwrap();

        let mut loaded = GameConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        assert_eq!(loaded.target_fps, 144);
        assert!(!loaded.vsync);
        assert_eq!(loaded.seed, 7);
        assert_eq!(loaded.layout_path, Some(PathBuf::from("island.json")));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn explicit_seed_is_used_verbatim() {
        let mut cfg = GameConfig::new();
        cfg.seed = 99;
        assert_eq!(cfg.effective_seed(), 99);
    }
}
