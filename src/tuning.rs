//! Data-driven game balance
//!
//! Every rate, probability and duration the simulation reads. The defaults
//! reproduce the shipped game; a JSON file can override any subset.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Balance constants for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Horizontal speed (px/s)
    pub player_speed: f32,
    /// How long an impairer hit disables movement (seconds)
    pub impair_duration: f32,

    // === Emitter ===
    /// Rate at which velocity eases toward its target (1/s)
    pub emitter_ease_rate: f32,
    /// Minimum time between two direction flips (seconds)
    pub emitter_flip_cooldown: f32,
    /// Jitter term: `sin(t * k1 + segment * k2) * amplitude`
    pub emitter_jitter_time_freq: f32,
    pub emitter_jitter_segment_freq: f32,
    pub emitter_jitter_amplitude: f32,
    /// Segment duration range at level 0 and how it shrinks per level
    pub segment_min_base: f32,
    pub segment_min_decay: f32,
    pub segment_min_floor: f32,
    pub segment_max_base: f32,
    pub segment_max_decay: f32,
    pub segment_max_floor: f32,
    /// Target speed range at level 0 and how it grows per level
    pub emitter_min_speed: f32,
    pub emitter_min_speed_scale: f32,
    pub emitter_max_speed: f32,
    pub emitter_max_speed_scale: f32,

    // === Spawner ===
    pub spawn_base_interval: f32,
    pub spawn_interval_decay: f32,
    pub spawn_min_interval: f32,
    /// Scheduled interval is multiplied by a factor drawn from this range
    pub spawn_jitter_min: f32,
    pub spawn_jitter_max: f32,
    /// Horizontal scatter around the emitter center
    pub spawn_offset_base: f32,
    pub spawn_offset_scale: f32,
    pub spawn_offset_cap: f32,
    pub hazard_chance_base: f32,
    pub hazard_chance_scale: f32,
    pub hazard_chance_cap: f32,
    pub impairer_chance_base: f32,
    pub impairer_chance_scale: f32,
    pub impairer_chance_cap: f32,
    /// Fall speed (px/s) at level 0 and gain per level
    pub fall_base_speed: f32,
    pub fall_speed_scale: f32,

    // === Homing ===
    /// Share of fall speed spent steering toward the player
    pub homing_fraction: f32,
    /// Share of fall speed kept as straight downward motion
    pub homing_fall_fraction: f32,

    // === Difficulty ===
    /// Seconds of play per difficulty level
    pub level_duration: f32,

    // === Bonus round ===
    /// Score points per bonus tier
    pub bonus_tier_size: u64,
    pub bonus_win_chance: f32,
    pub bonus_spin_duration: f32,
    pub bonus_shuffle_interval: f32,
    pub bonus_display_delay: f32,
    pub countdown_seconds: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 300.0,
            impair_duration: 2.0,

            emitter_ease_rate: 5.0,
            emitter_flip_cooldown: 0.5,
            emitter_jitter_time_freq: 5.0,
            emitter_jitter_segment_freq: 3.0,
            emitter_jitter_amplitude: 8.0,
            segment_min_base: 1.5,
            segment_min_decay: 0.1,
            segment_min_floor: 0.5,
            segment_max_base: 2.0,
            segment_max_decay: 0.15,
            segment_max_floor: 0.8,
            emitter_min_speed: 50.0,
            emitter_min_speed_scale: 20.0,
            emitter_max_speed: 150.0,
            emitter_max_speed_scale: 30.0,

            spawn_base_interval: 2.5,
            spawn_interval_decay: 0.3,
            spawn_min_interval: 0.8,
            spawn_jitter_min: 0.6,
            spawn_jitter_max: 1.4,
            spawn_offset_base: 60.0,
            spawn_offset_scale: 10.0,
            spawn_offset_cap: 100.0,
            hazard_chance_base: 0.12,
            hazard_chance_scale: 0.03,
            hazard_chance_cap: 0.25,
            impairer_chance_base: 0.1,
            impairer_chance_scale: 0.02,
            impairer_chance_cap: 0.2,
            fall_base_speed: 150.0,
            fall_speed_scale: 50.0,

            homing_fraction: 0.4,
            homing_fall_fraction: 0.85,

            level_duration: 10.0,

            bonus_tier_size: 20,
            bonus_win_chance: 0.02,
            bonus_spin_duration: 1.6,
            bonus_shuffle_interval: 0.08,
            bonus_display_delay: 1.5,
            countdown_seconds: 3,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load tuning from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Base spawn interval for a level, before jitter
    pub fn spawn_interval(&self, level: u32) -> f32 {
        (self.spawn_base_interval - level as f32 * self.spawn_interval_decay)
            .max(self.spawn_min_interval)
    }

    pub fn spawn_offset_range(&self, level: u32) -> f32 {
        (self.spawn_offset_base + level as f32 * self.spawn_offset_scale).min(self.spawn_offset_cap)
    }

    pub fn hazard_chance(&self, level: u32) -> f32 {
        (self.hazard_chance_base + level as f32 * self.hazard_chance_scale)
            .min(self.hazard_chance_cap)
    }

    pub fn impairer_chance(&self, level: u32) -> f32 {
        (self.impairer_chance_base + level as f32 * self.impairer_chance_scale)
            .min(self.impairer_chance_cap)
    }

    pub fn fall_speed(&self, level: u32) -> f32 {
        self.fall_base_speed + level as f32 * self.fall_speed_scale
    }

    /// Segment duration range `(min, max)` for a level; `max >= min` always
    pub fn segment_range(&self, level: u32) -> (f32, f32) {
        let level = level as f32;
        let min = (self.segment_min_base - level * self.segment_min_decay).max(self.segment_min_floor);
        let max = (self.segment_max_base - level * self.segment_max_decay).max(self.segment_max_floor);
        (min, max.max(min))
    }

    /// Target speed range `(min, max)` for a level
    pub fn emitter_speed_range(&self, level: u32) -> (f32, f32) {
        let level = level as f32;
        (
            self.emitter_min_speed + level * self.emitter_min_speed_scale,
            self.emitter_max_speed + level * self.emitter_max_speed_scale,
        )
    }
}
