//! Error types for the fallible edges of the game.
//!
//! The simulation itself never fails; these cover layout parsing, balance
//! configuration and the key-value store.

use thiserror::Error;

/// Errors produced while parsing a textual maze layout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Layout has no rows")]
    Empty,

    #[error("Unknown character {ch:?} at column {col}, row {row}")]
    UnknownCharacter { ch: char, col: usize, row: usize },

    #[error("Row {row} has width {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Layout has no player spawn ('P')")]
    MissingPlayerSpawn,

    #[error("Layout has {0} player spawns, expected exactly one")]
    DuplicatePlayerSpawn(usize),

    #[error("Layout has no enemy spawns ('G')")]
    MissingEnemySpawns,
}

/// Errors produced while loading balance configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid tuning JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid tuning value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Errors reported by a key-value store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Storage is unavailable")]
    Unavailable,

    #[error("Storage rejected write to `{0}`")]
    WriteRejected(String),
}
