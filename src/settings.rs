//! Display settings and preferences
//!
//! Persisted separately from the high score, as JSON under its own key.

use serde::{Deserialize, Serialize};

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

    /// Next preset, wrapping High back to Low
    pub fn next(&self) -> Self {
        match self {
            QualityPreset::Low => QualityPreset::Medium,
            QualityPreset::Medium => QualityPreset::High,
            QualityPreset::High => QualityPreset::Low,
        }
    }

    /// Maximum particles drawn per frame for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }

    /// Triangle fan segments per circle
    pub fn circle_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 12,
            QualityPreset::Medium => 24,
            QualityPreset::High => 40,
        }
    }
}

/// Player-facing display preferences
///
/// None of these affect the simulation; they only change what gets drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Player trail
    pub trails: bool,
    /// Burst particles
    pub particles: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// Opaque frame clear instead of the translucent motion-blur fade
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            trails: true,
            particles: true,
            show_fps: false,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective particle draw cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Alpha of the per-frame background fade
    pub fn fade_alpha(&self) -> f32 {
        if self.reduced_motion { 1.0 } else { 0.1 }
    }

    /// Storage key
    pub const STORAGE_KEY: &'static str = "orb_rush_settings";

    /// Load settings, falling back to defaults on missing or bad data
    pub fn load(store: &impl KeyValueStore) -> Self {
        if let Some(json) = store.get(Self::STORAGE_KEY) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Discarding unreadable settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings
    pub fn save(&self, store: &mut impl KeyValueStore) {
        match serde_json::to_string(self) {
            Ok(json) => {
                if store.set(Self::STORAGE_KEY, &json) {
                    log::info!("Settings saved");
                }
            }
            Err(e) => log::error!("Failed to encode settings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_preset_cycle_wraps() {
        let mut preset = QualityPreset::Low;
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(preset.as_str());
            preset = preset.next();
        }
        assert_eq!(seen, ["Low", "Medium", "High"]);
        assert_eq!(preset, QualityPreset::Low);
    }

    #[test]
    fn test_particles_toggle_zeroes_cap() {
        let mut settings = Settings {
            quality: QualityPreset::High,
            ..Settings::default()
        };
        assert_eq!(settings.max_particles(), 2000);
        settings.particles = false;
        assert_eq!(settings.max_particles(), 0);
    }

    #[test]
    fn test_reduced_motion_fade() {
        let mut settings = Settings::default();
        assert!((settings.fade_alpha() - 0.1).abs() < 1e-6);
        settings.reduced_motion = true;
        assert_eq!(settings.fade_alpha(), 1.0);
    }

    #[test]
    fn test_store_round_trip() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            quality: QualityPreset::Low,
            trails: false,
            ..Settings::default()
        };
        settings.save(&mut store);
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_partial_and_bad_json() {
        let store = MemoryStore::with_entry(Settings::STORAGE_KEY, r#"{"show_fps":true}"#);
        let loaded = Settings::load(&store);
        assert!(loaded.show_fps);
        assert_eq!(loaded.quality, QualityPreset::Medium);

        let store = MemoryStore::with_entry(Settings::STORAGE_KEY, "{not json");
        assert_eq!(Settings::load(&store), Settings::default());
    }
}
