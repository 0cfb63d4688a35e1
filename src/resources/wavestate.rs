//! Wave progression, score and the transient scoreboard message.
//!
//! Difficulty ramps per wave:
//!
//! | wave | monsters | spawn interval | strong chance |
//! |------|----------|----------------|---------------|
//! | 1    | 3        | 1.4 s          | 0.25          |
//! | 2    | 5        | 1.3 s          | 0.30          |
//! | 3    | 7        | 1.2 s          | 0.35          |
//! | 10+  | …        | 0.5 s          | 0.50          |
//!
//! Interval and chance are clamped; the monster count keeps growing.

use bevy_ecs::prelude::Resource;
use log::info;

/// Seconds between the last monster dying and the next wave starting.
pub const WAVE_BREAK: f32 = 5.0;
/// Delay between session start and the first wave.
pub const FIRST_WAVE_DELAY: f32 = 3.0;
/// How long wave announcements and bonus messages stay up.
pub const MESSAGE_DURATION: f32 = 2.0;
/// Completion bonus per wave number.
pub const WAVE_BONUS_PER_WAVE: u32 = 50;

pub fn monsters_for_wave(wave: u32) -> u32 {
    3 + wave.saturating_sub(1) * 2
}

pub fn spawn_interval_for_wave(wave: u32) -> f32 {
    (1.5 - wave as f32 * 0.1).max(0.5)
}

pub fn strong_chance_for_wave(wave: u32) -> f32 {
    (0.2 + wave as f32 * 0.05).min(0.5)
}

#[derive(Resource, Debug, Clone, Default)]
pub struct WaveState {
    pub wave: u32,
    pub score: u32,
    pub monsters_per_wave: u32,
    pub monsters_spawned: u32,
    pub monsters_remaining: u32,
    pub spawn_interval: f32,
    pub strong_chance: f32,
    /// Seconds accumulated toward the next spawn.
    pub spawn_timer: f32,
    /// Seconds accumulated since the wave was cleared.
    pub wave_end_timer: f32,
    /// True between a wave start and the start of the next one. Guards the
    /// clear check before the first wave.
    pub wave_active: bool,
    pub bonus_awarded: bool,
    pub message: Option<String>,
}

impl WaveState {
    /// Back to the pre-game state: no wave, no score.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance to the next wave and recompute its parameters.
    ///
    /// The spawn timer is primed so the first monster appears on the next
    /// spawning frame.
    pub fn start_next_wave(&mut self) {
        self.wave += 1;
        self.monsters_per_wave = monsters_for_wave(self.wave);
        self.monsters_spawned = 0;
        self.monsters_remaining = self.monsters_per_wave;
        self.spawn_interval = spawn_interval_for_wave(self.wave);
        self.strong_chance = strong_chance_for_wave(self.wave);
        self.spawn_timer = self.spawn_interval;
        self.wave_end_timer = 0.0;
        self.wave_active = true;
        self.bonus_awarded = false;
        info!(
            "Wave {} started: {} monsters, interval {:.2}s, strong chance {:.2}",
            self.wave, self.monsters_per_wave, self.spawn_interval, self.strong_chance
        );
    }

    pub fn all_spawned(&self) -> bool {
        self.monsters_spawned >= self.monsters_per_wave
    }

    /// Count one monster leaving play, by kill or by reaching the village.
    pub fn monster_resolved(&mut self) {
        self.monsters_remaining = self.monsters_remaining.saturating_sub(1);
    }

    /// Award the clear bonus once per wave. Returns the amount awarded.
    pub fn award_bonus(&mut self) -> Option<u32> {
        if self.bonus_awarded {
            return None;
        }
        self.bonus_awarded = true;
        let bonus = self.wave * WAVE_BONUS_PER_WAVE;
        self.score += bonus;
        Some(bonus)
    }
}
