//! Difficulty level derived from score

use super::state::{GameEvent, GameState};

/// `floor(score / points_per_level) + 1`
#[inline]
pub fn level_for_score(score: u64, points_per_level: u64) -> u32 {
    let tier = score / points_per_level.max(1);
    u32::try_from(tier).unwrap_or(u32::MAX - 1) + 1
}

/// Recompute the level; it never drops within a run
pub fn advance(state: &mut GameState) -> Option<u32> {
    let level = level_for_score(state.score, state.tuning.points_per_level);
    if level > state.level {
        state.level = level;
        state.events.push(GameEvent::LevelUp { level });
        log::info!("Level {} reached at score {}", level, state.score);
        Some(level)
    } else {
        None
    }
}
