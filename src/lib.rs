//! Pac-BOP - A neon maze chase arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (maze, movement, enemies, scoring)
//! - `renderer`: Per-frame draw policy over an abstract 2D sink
//! - `platform`: Browser/native platform abstraction
//! - `persistence`: Key-value storage for the best score and preferences
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{ConfigError, LayoutError, StorageError};
pub use highscores::HighScore;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

use glam::{IVec2, Vec2};

/// Game configuration constants
pub mod consts {
    /// Simulation rate: one tick per animation frame, nominally 60 Hz
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Edge length of one maze tile in logical pixels
    pub const TILE_SIZE: f32 = 20.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 2.0;
    pub const PLAYER_SIZE: f32 = TILE_SIZE * 0.8;
    pub const START_LIVES: u8 = 3;

    /// Enemy defaults
    pub const ENEMY_SIZE: f32 = TILE_SIZE * 0.7;
    pub const MAX_ENEMIES: usize = 4;
    /// Speed multiplier while frightened
    pub const FRIGHTENED_SPEED_FACTOR: f32 = 0.5;
    /// Base speed added per level cleared
    pub const ENEMY_SPEED_STEP: f32 = 0.2;
    /// Largest accepted per-level speed step
    pub const MAX_ENEMY_SPEED_STEP: f32 = 1.0;
    /// Enemy speed ceiling; stays under half a tile so wall checks cannot skip a tile
    pub const MAX_ENEMY_SPEED: f32 = TILE_SIZE / 4.0;
    /// Patrol heading change interval (2000 ms)
    pub const PATROL_INTERVAL_TICKS: u32 = 120;
    /// Random heading change interval (1000 ms)
    pub const RANDOM_INTERVAL_TICKS: u32 = 60;
    /// How far ahead of the player an ambusher aims, in pixels
    pub const AMBUSH_LOOKAHEAD: f32 = 50.0;
    /// Ticks a bounced enemy keeps its inverted heading before re-aiming
    pub const BOUNCE_HOLD_TICKS: u32 = 20;

    /// Power mode duration (5 s)
    pub const POWER_DURATION_TICKS: u32 = 300;
    /// Invulnerability after a respawn (2 s)
    pub const GRACE_TICKS: u32 = 120;
    /// Player-enemy contact distance
    pub const COLLISION_RADIUS: f32 = TILE_SIZE * 0.8;

    /// Scoring table
    pub const PELLET_SCORE: u64 = 10;
    pub const POWER_PELLET_SCORE: u64 = 50;
    pub const ENEMY_EATEN_SCORE: u64 = 200;
    pub const LEVEL_BONUS: u64 = 1000;

    /// Particle bursts
    pub const PELLET_BURST: usize = 3;
    pub const POWER_BURST: usize = 10;
    pub const ENEMY_EATEN_BURST: usize = 8;
    pub const DEATH_BURST: usize = 15;
    pub const LEVEL_SHOWER: usize = 50;
}

/// Tile cell containing a logical pixel position
#[inline]
pub fn cell_of(pos: Vec2) -> IVec2 {
    (pos / consts::TILE_SIZE).floor().as_ivec2()
}

/// Pixel centre of a tile cell
#[inline]
pub fn cell_center(cell: IVec2) -> Vec2 {
    (cell.as_vec2() + Vec2::splat(0.5)) * consts::TILE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_of_floors_negative_positions() {
        assert_eq!(cell_of(Vec2::new(-0.5, 10.0)), IVec2::new(-1, 0));
        assert_eq!(cell_of(Vec2::new(19.99, 20.0)), IVec2::new(0, 1));
    }

    #[test]
    fn test_cell_center_round_trips() {
        let cell = IVec2::new(14, 11);
        assert_eq!(cell_center(cell), Vec2::new(290.0, 230.0));
        assert_eq!(cell_of(cell_center(cell)), cell);
    }
}
