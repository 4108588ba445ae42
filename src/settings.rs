//! Game settings and preferences
//!
//! Persisted as JSON next to the high score, under `pacBopSettings`.

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::persistence::KeyValueStore;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Next preset in the Low -> Medium -> High cycle
    pub fn next(&self) -> Self {
        match self {
            QualityPreset::Low => QualityPreset::Medium,
            QualityPreset::Medium => QualityPreset::High,
            QualityPreset::High => QualityPreset::Low,
        }
    }

    /// Maximum particles drawn per frame
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 64,
            QualityPreset::Medium => 256,
            QualityPreset::High => 512,
        }
    }

    /// Neon glow (shadow blur) on walls and entities
    pub fn glow_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    /// Particle effects (bursts, level shower)
    pub particles: bool,
    /// Glow around walls and entities
    pub glow: bool,

    /// Show FPS counter
    pub show_fps: bool,

    /// Reduced motion (no pulsing power pellets or flashing)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            glow: true,
            show_fps: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "pacBopSettings";

    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;
        self.glow = preset.glow_enabled();
    }

    /// Step to the next quality preset and persist the result.
    ///
    /// The new preset applies even when the write fails.
    pub fn cycle_quality(&mut self, store: &mut impl KeyValueStore) -> QualityPreset {
        self.apply_preset(self.quality.next());
        log::info!("Quality set to {}", self.quality.as_str());
        if let Err(e) = self.save(store) {
            log::warn!("Could not save settings: {e}");
        }
        self.quality
    }

    /// Effective glow (respects the preset)
    pub fn effective_glow(&self) -> bool {
        self.glow && self.quality.glow_enabled()
    }

    /// Effective pulse animation (respects reduced_motion)
    pub fn effective_pulse(&self) -> bool {
        !self.reduced_motion
    }

    /// Effective particle draw cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Load settings, falling back to defaults when absent or unreadable
    pub fn load(store: &impl KeyValueStore) -> Self {
        let Some(json) = store.get(Self::STORAGE_KEY) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings
            }
            Err(e) => {
                log::warn!("Ignoring stored settings: {e}");
                Self::default()
            }
        }
    }

    /// Save settings
    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)
            .map_err(|e| StorageError::WriteRejected(format!("{}: {e}", Self::STORAGE_KEY)))?;
        store.set(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_cycle_quality_persists() {
        let mut store = MemoryStore::new();
        let mut settings = Settings::default();

        assert_eq!(settings.cycle_quality(&mut store), QualityPreset::High);
        assert_eq!(Settings::load(&store).quality, QualityPreset::High);

        assert_eq!(settings.cycle_quality(&mut store), QualityPreset::Low);
        assert!(!settings.effective_glow());
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_cycle_quality_survives_failed_write() {
        let mut store = MemoryStore::read_only();
        let mut settings = Settings::default();
        assert_eq!(settings.cycle_quality(&mut store), QualityPreset::High);
        assert_eq!(settings.max_particles(), 512);
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_low_preset_drops_glow() {
        let settings = Settings::from_preset(QualityPreset::Low);
        assert!(!settings.effective_glow());
        assert_eq!(settings.max_particles(), 64);

        let mut settings = Settings::default();
        settings.particles = false;
        assert_eq!(settings.max_particles(), 0);
    }

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        let mut settings = Settings::from_preset(QualityPreset::High);
        settings.reduced_motion = true;
        settings.save(&mut store).unwrap();

        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_partial_and_corrupt_json() {
        let mut store = MemoryStore::new();
        store.set(Settings::STORAGE_KEY, r#"{"show_fps":false}"#).unwrap();
        let loaded = Settings::load(&store);
        assert!(!loaded.show_fps);
        assert_eq!(loaded.quality, QualityPreset::Medium);

        store.set(Settings::STORAGE_KEY, "{oops").unwrap();
        assert_eq!(Settings::load(&store), Settings::default());
    }
}
