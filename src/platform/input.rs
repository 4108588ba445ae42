//! Keyboard mapping
//!
//! Event handlers never touch the game state. They translate a key into an
//! `Intent` and fold it into the pending `TickInput`, which the next tick
//! consumes.

use crate::sim::{Direction, GamePhase, TickInput};

/// What a key press asks the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Move(Direction),
    TogglePause,
    Start,
    Restart,
    /// Display preference, handled by the host rather than the tick
    CycleQuality,
}

/// Map a `KeyboardEvent.key` value to an intent
pub fn intent_for_key(key: &str, phase: GamePhase) -> Option<Intent> {
    let intent = match key {
        "ArrowUp" | "w" | "W" => Intent::Move(Direction::Up),
        "ArrowDown" | "s" | "S" => Intent::Move(Direction::Down),
        "ArrowLeft" | "a" | "A" => Intent::Move(Direction::Left),
        "ArrowRight" | "d" | "D" => Intent::Move(Direction::Right),
        " " | "Escape" | "p" | "P" => Intent::TogglePause,
        "Enter" if phase == GamePhase::GameOver => Intent::Restart,
        "Enter" => Intent::Start,
        "q" | "Q" => Intent::CycleQuality,
        _ => return None,
    };
    Some(intent)
}

/// Fold an intent into the input for the next tick
pub fn apply_intent(input: &mut TickInput, intent: Intent) {
    match intent {
        Intent::Move(dir) => input.direction = Some(dir),
        // Two presses before a tick cancel out
        Intent::TogglePause => input.pause = !input.pause,
        Intent::Start => input.start = true,
        Intent::Restart => input.restart = true,
        Intent::CycleQuality => {}
    }
}
