//! Per-frame simulation tick
//!
//! spawn -> integrate -> collide -> progress. Rendering is composed from the
//! resulting state by the caller, after the tick returns.

use super::collision::{CollisionOutcome, resolve};
use super::integrate::integrate;
use super::progression::advance;
use super::spawn::spawn;
use super::state::{GameEvent, GameState, RunPhase};

/// Advance the game state by one frame at wall-clock `now_ms`.
///
/// Returns `None` without touching anything when the run is idle or paused.
pub fn tick(state: &mut GameState, now_ms: f64) -> Option<CollisionOutcome> {
    if state.phase != RunPhase::Running {
        return None;
    }

    state.events.clear();
    state.now_ms = now_ms;
    state.ticks += 1;

    spawn(state);
    integrate(state);
    let outcome = resolve(state);
    advance(state);

    if outcome.run_over {
        let summary = state.end_run();
        state.events.push(GameEvent::RunEnded(summary));
    }

    Some(outcome)
}
