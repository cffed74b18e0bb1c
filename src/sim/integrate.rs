//! Integrator: per-frame motion
//!
//! Positions advance by whole-frame steps (no dt). Only obstacles speed up with
//! the level; pickups and particles are level-independent.

use super::state::GameState;

/// Advance player, trail, pickup pulses, obstacles and particles by one frame
pub fn integrate(state: &mut GameState) {
    let tuning = &state.tuning;

    state.player.follow_target(tuning.follow_factor);
    state
        .player
        .record_trail(tuning.trail_length, tuning.trail_alpha_scale);

    for pickup in &mut state.pickups {
        pickup.pulse += tuning.pulse_step;
    }

    let speed_scale = tuning.obstacle_speed_scale(state.level);
    for obstacle in &mut state.obstacles {
        obstacle.pos += obstacle.vel * speed_scale;
        obstacle.rotation += obstacle.rotation_speed;
    }

    for particle in &mut state.particles {
        particle.pos += particle.vel;
        particle.vel *= tuning.particle_damping;
        particle.life -= particle.decay;
    }
}
