//! Data-driven game balance
//!
//! Every scoring constant, speed, timer and particle count the simulation uses
//! is read from a `Tuning` owned by the session. Tile geometry stays in
//! `consts`. The defaults are the fixed-maze table (10 / 50 / 200 / 1000); a
//! JSON override may replace any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Balance table for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Player speed (pixels/tick)
    pub player_speed: f32,
    /// Lives at session start
    pub start_lives: u8,
    /// Power mode duration (ticks)
    pub power_duration_ticks: u32,
    /// Forced invulnerability after a respawn (ticks)
    pub grace_ticks: u32,
    /// Player-enemy contact distance (pixels)
    pub collision_radius: f32,
    /// Enemy speed multiplier while frightened
    pub frightened_speed_factor: f32,
    /// Enemy base speed added per cleared level
    pub enemy_speed_step: f32,
    /// Ticks between patrol heading changes
    pub patrol_interval_ticks: u32,
    /// Ticks between random heading changes
    pub random_interval_ticks: u32,
    /// How far ahead of the player an ambusher aims (pixels)
    pub ambush_lookahead: f32,
    /// Ticks a bounced enemy holds its inverted heading
    pub bounce_hold_ticks: u32,

    pub pellet_score: u64,
    pub power_pellet_score: u64,
    pub enemy_eaten_score: u64,
    pub level_bonus: u64,

    // Particle counts
    pub pellet_burst: usize,
    pub power_burst: usize,
    pub enemy_eaten_burst: usize,
    pub death_burst: usize,
    pub level_shower: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: PLAYER_SPEED,
            start_lives: START_LIVES,
            power_duration_ticks: POWER_DURATION_TICKS,
            grace_ticks: GRACE_TICKS,
            collision_radius: COLLISION_RADIUS,
            frightened_speed_factor: FRIGHTENED_SPEED_FACTOR,
            enemy_speed_step: ENEMY_SPEED_STEP,
            patrol_interval_ticks: PATROL_INTERVAL_TICKS,
            random_interval_ticks: RANDOM_INTERVAL_TICKS,
            ambush_lookahead: AMBUSH_LOOKAHEAD,
            bounce_hold_ticks: BOUNCE_HOLD_TICKS,
            pellet_score: PELLET_SCORE,
            power_pellet_score: POWER_PELLET_SCORE,
            enemy_eaten_score: ENEMY_EATEN_SCORE,
            level_bonus: LEVEL_BONUS,
            pellet_burst: PELLET_BURST,
            power_burst: POWER_BURST,
            enemy_eaten_burst: ENEMY_EATEN_BURST,
            death_burst: DEATH_BURST,
            level_shower: LEVEL_SHOWER,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override on top of the defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read and validate a JSON override from disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject values that would break the simulation invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Faster than half a tile per tick would let the leading-edge check skip a wall
        if !(self.player_speed > 0.0 && self.player_speed < TILE_SIZE / 2.0) {
            return Err(ConfigError::Invalid {
                field: "player_speed",
                reason: format!("{} is outside (0, {})", self.player_speed, TILE_SIZE / 2.0),
            });
        }
        if self.start_lives == 0 {
            return Err(ConfigError::Invalid {
                field: "start_lives",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.power_duration_ticks == 0 {
            return Err(ConfigError::Invalid {
                field: "power_duration_ticks",
                reason: "must be non-zero".to_string(),
            });
        }
        if !(self.collision_radius > 0.0) {
            return Err(ConfigError::Invalid {
                field: "collision_radius",
                reason: format!("{} must be positive", self.collision_radius),
            });
        }
        if !(self.frightened_speed_factor > 0.0 && self.frightened_speed_factor <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "frightened_speed_factor",
                reason: format!("{} is outside (0, 1]", self.frightened_speed_factor),
            });
        }
        if !(0.0..=MAX_ENEMY_SPEED_STEP).contains(&self.enemy_speed_step) {
            return Err(ConfigError::Invalid {
                field: "enemy_speed_step",
                reason: format!(
                    "{} is outside [0, {MAX_ENEMY_SPEED_STEP}]",
                    self.enemy_speed_step
                ),
            });
        }
        if self.patrol_interval_ticks == 0 {
            return Err(ConfigError::Invalid {
                field: "patrol_interval_ticks",
                reason: "must be non-zero".to_string(),
            });
        }
        if self.random_interval_ticks == 0 {
            return Err(ConfigError::Invalid {
                field: "random_interval_ticks",
                reason: "must be non-zero".to_string(),
            });
        }
        Ok(())
    }

    /// Enemy speed for a kind's base speed on the given level (1-based),
    /// capped at `MAX_ENEMY_SPEED`
    pub fn enemy_speed(&self, kind_speed: f32, level: u32) -> f32 {
        (kind_speed + self.enemy_speed_step * level.saturating_sub(1) as f32).min(MAX_ENEMY_SPEED)
    }
}
