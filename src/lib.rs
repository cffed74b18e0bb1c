//! Orb Rush - grow your orb, dodge the blocks
//!
//! Core modules:
//! - `sim`: Per-frame simulation (spawning, integration, collisions, progression)
//! - `renderer`: Frame composition and the WebGPU pipeline
//! - `game`: Run lifecycle shell tying simulation, storage and UI together
//! - `platform`: Browser/native platform abstraction
//! - `persistence`: Key/value storage (LocalStorage on web)
//! - `tuning`: Data-driven game balance

pub mod color;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use game::Game;
pub use highscores::HighScore;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Logical surface width; all entity coordinates live in this space
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    /// Logical surface height
    pub const VIEWPORT_HEIGHT: f32 = 600.0;
}

/// Logical viewport size as a vector
#[inline]
pub fn viewport() -> Vec2 {
    Vec2::new(consts::VIEWPORT_WIDTH, consts::VIEWPORT_HEIGHT)
}
