//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (key names to intents)
//! - Storage (LocalStorage on web)

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod storage;

pub use input::{Intent, apply_intent, intent_for_key};
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;
