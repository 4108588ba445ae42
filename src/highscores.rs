//! Best-score persistence
//!
//! Stored as a plain integer string under `pacBopHighScore`. Storage problems
//! never interrupt play: they are logged and the in-memory value stands.

use crate::persistence::KeyValueStore;

/// Best score across sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "pacBopHighScore";

    /// Read the stored best; missing or garbled values count as 0
    pub fn load(store: &impl KeyValueStore) -> Self {
        let Some(raw) = store.get(Self::STORAGE_KEY) else {
            log::info!("No high score found, starting fresh");
            return Self::default();
        };

        match raw.trim().parse::<u64>() {
            Ok(best) => {
                log::info!("Loaded high score {best}");
                Self { best }
            }
            Err(e) => {
                log::warn!("Ignoring stored high score {raw:?}: {e}");
                Self::default()
            }
        }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Offer a finished run's score; returns true when it set a new best.
    ///
    /// The new best is kept in memory even if the write fails.
    pub fn record(&mut self, store: &mut impl KeyValueStore, score: u64) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        match store.set(Self::STORAGE_KEY, &score.to_string()) {
            Ok(()) => log::info!("New high score {score} saved"),
            Err(e) => log::warn!("Could not save high score {score}: {e}"),
        }
        true
    }
}
