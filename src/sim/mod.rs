//! Per-frame simulation module
//!
//! All gameplay logic lives here. This module must stay platform-free:
//! - One tick per displayed frame, whole-frame steps
//! - Seeded RNG only
//! - Wall-clock time is passed in, never read
//! - No rendering or platform dependencies

pub mod collision;
pub mod integrate;
pub mod progression;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{CollisionOutcome, circles_overlap, emit_burst};
pub use progression::level_for_score;
pub use spawn::{Edge, spawn_obstacle, spawn_pickup};
pub use state::{
    GameEvent, GameState, Obstacle, Particle, Pickup, Player, RunPhase, RunSummary, TrailPoint,
    pulse_factor,
};
pub use tick::tick;
