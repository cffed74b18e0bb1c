//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock time and FPS measurement
//! - Pointer coordinate mapping

pub mod input;
pub mod time;

pub use input::surface_to_sim;
pub use time::{FpsCounter, now_ms};
