//! Data-driven game balance
//!
//! Every gameplay constant lives here so a run can be rebalanced from a JSON
//! file without touching the simulation code. `Tuning::default()` is the
//! shipped balance.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Particle burst parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurstTuning {
    /// Particles per burst
    pub count: u32,
    /// Max absolute velocity per axis; each axis is uniform in [-speed, speed)
    pub speed: f32,
    pub size_min: f32,
    pub size_max: f32,
    /// Life lost per frame (life starts at 1.0)
    pub decay: f32,
}

/// Complete balance sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Radius at run start
    pub player_start_size: f32,
    /// Fraction of the remaining distance to the target covered per frame
    pub follow_factor: f32,
    /// Run ends once the player radius drops to this or below
    pub death_size: f32,
    /// Maximum trail samples kept
    pub trail_length: usize,
    /// Alpha of the newest trail sample approaches this value
    pub trail_alpha_scale: f32,

    // === Pickups ===
    pub pickup_spawn_base: f32,
    pub pickup_spawn_per_level: f32,
    /// Distance kept from viewport edges when placing pickups
    pub pickup_edge_inset: f32,
    pub pickup_size_min: f32,
    pub pickup_size_max: f32,
    /// Time-to-live in milliseconds
    pub pickup_ttl_ms: f64,
    /// Pulse phase advance per frame (radians)
    pub pulse_step: f32,
    /// Pulse factor is `1 + sin(phase) * amplitude`
    pub pulse_amplitude: f32,
    /// Player radius gained per unit of pickup size
    pub pickup_growth: f32,
    pub pickup_burst: BurstTuning,

    // === Obstacles ===
    pub obstacle_spawn_base: f32,
    pub obstacle_spawn_per_level: f32,
    /// How far outside the edge obstacles appear
    pub obstacle_spawn_offset: f32,
    pub obstacle_speed_min: f32,
    pub obstacle_speed_max: f32,
    /// Lateral drift is uniform in [-drift, drift)
    pub obstacle_drift: f32,
    pub obstacle_size_min: f32,
    pub obstacle_size_max: f32,
    /// Rotation speed is uniform in [-spin, spin)
    pub obstacle_spin: f32,
    /// Speed multiplier is `1 + level * obstacle_speed_per_level`
    pub obstacle_speed_per_level: f32,
    /// Player radius lost per unit of obstacle size
    pub obstacle_damage: f32,
    /// Obstacles further than this outside the viewport are discarded
    pub obstacle_despawn_margin: f32,
    pub impact_burst: BurstTuning,

    // === Particles ===
    /// Velocity multiplier per frame
    pub particle_damping: f32,

    // === Progression ===
    /// Score needed per difficulty level
    pub points_per_level: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_start_size: 20.0,
            follow_factor: 0.1,
            death_size: 5.0,
            trail_length: 15,
            trail_alpha_scale: 0.5,

            pickup_spawn_base: 0.02,
            pickup_spawn_per_level: 0.005,
            pickup_edge_inset: 20.0,
            pickup_size_min: 8.0,
            pickup_size_max: 20.0,
            pickup_ttl_ms: 8000.0,
            pulse_step: 0.2,
            pulse_amplitude: 0.3,
            pickup_growth: 0.1,
            pickup_burst: BurstTuning {
                count: 8,
                speed: 5.0,
                size_min: 2.0,
                size_max: 6.0,
                decay: 0.02,
            },

            obstacle_spawn_base: 0.008,
            obstacle_spawn_per_level: 0.002,
            obstacle_spawn_offset: 20.0,
            obstacle_speed_min: 1.0,
            obstacle_speed_max: 3.0,
            obstacle_drift: 1.0,
            obstacle_size_min: 15.0,
            obstacle_size_max: 25.0,
            obstacle_spin: 0.1,
            obstacle_speed_per_level: 0.1,
            obstacle_damage: 0.15,
            obstacle_despawn_margin: 50.0,
            impact_burst: BurstTuning {
                count: 12,
                speed: 7.5,
                size_min: 1.0,
                size_max: 4.0,
                decay: 0.03,
            },

            particle_damping: 0.98,

            points_per_level: 200,
        }
    }
}

/// Why a tuning sheet was rejected
#[derive(Debug)]
pub enum TuningError {
    /// Not valid JSON for a `Tuning`
    Parse(serde_json::Error),
    /// Parsed, but a value is out of range
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(err) => write!(f, "tuning parse error: {}", err),
            TuningError::Invalid { field, reason } => {
                write!(f, "invalid tuning value `{}`: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(err) => Some(err),
            TuningError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        TuningError::Parse(err)
    }
}

impl Tuning {
    /// Parse and validate a JSON balance sheet. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Serialize to pretty JSON (for dumping the defaults as a template)
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Check every value is usable by the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        if !(self.follow_factor > 0.0 && self.follow_factor <= 1.0) {
            return invalid("follow_factor", "must be in (0, 1]");
        }
        if self.trail_length == 0 {
            return invalid("trail_length", "must be at least 1");
        }
        if self.player_start_size <= self.death_size {
            return invalid("player_start_size", "must exceed death_size");
        }
        if self.points_per_level == 0 {
            return invalid("points_per_level", "must be positive");
        }
        if !(0.0..=1.0).contains(&self.particle_damping) {
            return invalid("particle_damping", "must be in [0, 1]");
        }
        if self.pickup_ttl_ms <= 0.0 {
            return invalid("pickup_ttl_ms", "must be positive");
        }
        for (field, p) in [
            ("pickup_spawn_base", self.pickup_spawn_base),
            ("pickup_spawn_per_level", self.pickup_spawn_per_level),
            ("obstacle_spawn_base", self.obstacle_spawn_base),
            ("obstacle_spawn_per_level", self.obstacle_spawn_per_level),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return invalid(field, "probability must be in [0, 1]");
            }
        }
        for (field, min, max) in [
            ("pickup_size_min", self.pickup_size_min, self.pickup_size_max),
            ("obstacle_size_min", self.obstacle_size_min, self.obstacle_size_max),
            ("obstacle_speed_min", self.obstacle_speed_min, self.obstacle_speed_max),
            (
                "pickup_burst.size_min",
                self.pickup_burst.size_min,
                self.pickup_burst.size_max,
            ),
            (
                "impact_burst.size_min",
                self.impact_burst.size_min,
                self.impact_burst.size_max,
            ),
        ] {
            if !(min >= 0.0 && min <= max) {
                return invalid(field, "range must be non-negative and ordered");
            }
        }
        if self.pickup_burst.decay <= 0.0 || self.impact_burst.decay <= 0.0 {
            return invalid("burst.decay", "must be positive so particles die");
        }
        Ok(())
    }

    /// Chance of a pickup spawning this frame
    #[inline]
    pub fn pickup_chance(&self, level: u32) -> f32 {
        self.pickup_spawn_base + level as f32 * self.pickup_spawn_per_level
    }

    /// Chance of an obstacle spawning this frame
    #[inline]
    pub fn obstacle_chance(&self, level: u32) -> f32 {
        self.obstacle_spawn_base + level as f32 * self.obstacle_spawn_per_level
    }

    /// Obstacle velocity multiplier at a level
    #[inline]
    pub fn obstacle_speed_scale(&self, level: u32) -> f32 {
        1.0 + level as f32 * self.obstacle_speed_per_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let tuning = Tuning::from_json(r#"{ "pickup_ttl_ms": 4000.0, "trail_length": 5 }"#)
            .expect("valid tuning");
        assert_eq!(tuning.pickup_ttl_ms, 4000.0);
        assert_eq!(tuning.trail_length, 5);
        assert_eq!(tuning.points_per_level, 200);
    }

    #[test]
    fn test_json_round_trip_of_defaults() {
        let json = Tuning::default().to_json();
        assert_eq!(Tuning::from_json(&json).unwrap(), Tuning::default());
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Tuning::from_json(r#"{ "trail_length": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "trail_length", .. }));

        let err = Tuning::from_json(r#"{ "obstacle_spawn_base": 1.5 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "obstacle_spawn_base", .. }));

        let err = Tuning::from_json("not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
        assert!(err.to_string().starts_with("tuning parse error"));
    }

    #[test]
    fn test_difficulty_curves() {
        let t = Tuning::default();
        assert!((t.pickup_chance(1) - 0.025).abs() < 1e-6);
        assert!((t.obstacle_chance(1) - 0.010).abs() < 1e-6);
        assert!((t.obstacle_speed_scale(3) - 1.3).abs() < 1e-6);
    }
}
