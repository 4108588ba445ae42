//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per tick, counted in ticks (no wall-clock time)
//! - Seeded RNG only
//! - Stable iteration order (enemies by id)
//! - No rendering or platform dependencies

pub mod behavior;
pub mod collision;
pub mod maze;
pub mod particles;
pub mod state;
pub mod tick;

pub use behavior::{Quarry, steer};
pub use collision::{MoveCheck, in_contact, check_move, wrap_tunnel};
pub use maze::{DEFAULT_LAYOUT, MazeGrid, MazeLayout, Tile};
pub use particles::MAX_PARTICLES;
pub use state::{
    Behavior, Direction, ENEMY_KINDS, Enemy, EnemyKind, GameEvent, GamePhase, GameState, Hue,
    Particle, Player, enemy_count_for_level,
};
pub use tick::{TickInput, tick};
