//! Collision detection and response
//!
//! Everything is a circle test against the player: pickups use their pulsed
//! radius, obstacles their half-width. Removals rebuild each collection from its
//! survivors so an entity is visited at most once per tick.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::spawn::uniform;
use super::state::{GameEvent, GameState, Particle};
use crate::color::{Rgba, palette};
use crate::tuning::BurstTuning;

/// What the resolver did this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionOutcome {
    pub collected: u32,
    pub expired: u32,
    pub hits: u32,
    /// Obstacles culled for leaving the arena
    pub escaped: u32,
    /// The player shrank to the death size; remaining obstacles were skipped
    pub run_over: bool,
}

/// Strict overlap: centers closer than `reach`
#[inline]
pub fn circles_overlap(a: Vec2, b: Vec2, reach: f32) -> bool {
    a.distance(b) < reach
}

/// Resolve every player interaction for this tick
pub fn resolve(state: &mut GameState) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();
    resolve_pickups(state, &mut outcome);
    resolve_obstacles(state, &mut outcome);
    cull_particles(state);
    outcome
}

fn resolve_pickups(state: &mut GameState, outcome: &mut CollisionOutcome) {
    let pickups = std::mem::take(&mut state.pickups);
    let mut survivors = Vec::with_capacity(pickups.len());

    for pickup in pickups {
        let reach = state.player.size + pickup.pulsed_radius(state.tuning.pulse_amplitude);
        if circles_overlap(pickup.pos, state.player.pos, reach) {
            let points = pickup.size.floor() as u64;
            state.score += points;
            state.player.size += pickup.size * state.tuning.pickup_growth;
            emit_burst(
                &mut state.rng,
                &mut state.particles,
                pickup.pos,
                pickup.color,
                &state.tuning.pickup_burst,
            );
            state.events.push(GameEvent::PickupCollected {
                points,
                pos: pickup.pos,
            });
            outcome.collected += 1;
            continue;
        }

        if pickup.is_expired(state.now_ms, state.tuning.pickup_ttl_ms) {
            state.events.push(GameEvent::PickupExpired { pos: pickup.pos });
            outcome.expired += 1;
            continue;
        }

        survivors.push(pickup);
    }

    state.pickups = survivors;
}

fn resolve_obstacles(state: &mut GameState, outcome: &mut CollisionOutcome) {
    let mut pending = std::mem::take(&mut state.obstacles).into_iter();
    let mut survivors = Vec::with_capacity(pending.len());

    for obstacle in pending.by_ref() {
        let reach = state.player.size + obstacle.size;
        if circles_overlap(obstacle.pos, state.player.pos, reach) {
            let damage = obstacle.size * state.tuning.obstacle_damage;
            state.player.size -= damage;
            emit_burst(
                &mut state.rng,
                &mut state.particles,
                state.player.pos,
                palette::IMPACT,
                &state.tuning.impact_burst,
            );
            state.events.push(GameEvent::ObstacleHit {
                damage,
                size_after: state.player.size,
            });
            outcome.hits += 1;

            if state.player.size <= state.tuning.death_size {
                outcome.run_over = true;
                break;
            }
            continue;
        }

        if obstacle.is_out_of_bounds(state.viewport, state.tuning.obstacle_despawn_margin) {
            outcome.escaped += 1;
            continue;
        }

        survivors.push(obstacle);
    }

    // Early exit leaves the rest untouched for this tick
    survivors.extend(pending);
    state.obstacles = survivors;
}

fn cull_particles(state: &mut GameState) {
    let particles = std::mem::take(&mut state.particles);
    state.particles = particles.into_iter().filter(|p| p.life > 0.0).collect();
}

/// Push `burst.count` particles at `origin`
pub fn emit_burst(
    rng: &mut Pcg32,
    particles: &mut Vec<Particle>,
    origin: Vec2,
    color: Rgba,
    burst: &BurstTuning,
) {
    particles.reserve(burst.count as usize);
    for _ in 0..burst.count {
        let vel = Vec2::new(
            uniform(rng, -burst.speed, burst.speed),
            uniform(rng, -burst.speed, burst.speed),
        );
        particles.push(Particle {
            pos: origin,
            vel,
            size: uniform(rng, burst.size_min, burst.size_max),
            color,
            life: 1.0,
            decay: burst.decay,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Obstacle, Pickup};
    use crate::tuning::Tuning;
    use crate::viewport;
    use rand::SeedableRng;

    fn running_state() -> GameState {
        let mut state = GameState::new(9, Tuning::default(), viewport(), 0);
        state.start_run(9);
        state
    }

    fn pickup_at(pos: Vec2, size: f32, pulse: f32, created_ms: f64) -> Pickup {
        Pickup {
            pos,
            size,
            color: palette::PLAYER,
            pulse,
            created_ms,
        }
    }

    fn obstacle_at(pos: Vec2, size: f32) -> Obstacle {
        Obstacle {
            pos,
            vel: Vec2::ZERO,
            size,
            color: palette::OBSTACLE,
            rotation: 0.0,
            rotation_speed: 0.0,
        }
    }

    #[test]
    fn test_overlap_is_strict() {
        assert!(circles_overlap(Vec2::ZERO, Vec2::new(9.99, 0.0), 10.0));
        assert!(!circles_overlap(Vec2::ZERO, Vec2::new(10.0, 0.0), 10.0));
    }

    #[test]
    fn test_pulse_inflates_pickup_reach() {
        let mut state = running_state();
        let center = state.player.pos;
        // Player 20 + pickup 10 = 30 at rest; at pulse π/2 the reach is 33
        state
            .pickups
            .push(pickup_at(center + Vec2::new(32.0, 0.0), 10.0, std::f32::consts::FRAC_PI_2, 0.0));
        state
            .pickups
            .push(pickup_at(center + Vec2::new(-32.0, 0.0), 10.0, 0.0, 0.0));
        let outcome = resolve(&mut state);
        assert_eq!(outcome.collected, 1);
        assert_eq!(state.pickups.len(), 1);
        assert_eq!(state.pickups[0].pos.x, center.x - 32.0);
    }

    #[test]
    fn test_collect_scores_floor_and_grows() {
        let mut state = running_state();
        let center = state.player.pos;
        state.pickups.push(pickup_at(center, 12.7, 0.0, 0.0));
        let outcome = resolve(&mut state);
        assert_eq!(outcome.collected, 1);
        assert_eq!(state.score, 12);
        assert!((state.player.size - 21.27).abs() < 1e-4);
        assert_eq!(state.particles.len(), 8);
        for p in &state.particles {
            assert_eq!(p.pos, center);
            assert!(p.vel.x >= -5.0 && p.vel.x < 5.0);
            assert!(p.vel.y >= -5.0 && p.vel.y < 5.0);
            assert!(p.size >= 2.0 && p.size < 6.0);
            assert_eq!(p.life, 1.0);
            assert_eq!(p.decay, 0.02);
            assert_eq!(p.color, palette::PLAYER);
        }
    }

    #[test]
    fn test_expired_pickup_removed_without_score() {
        let mut state = running_state();
        state.now_ms = 10_000.0;
        state
            .pickups
            .push(pickup_at(Vec2::new(30.0, 30.0), 10.0, 0.0, 1_999.0));
        state
            .pickups
            .push(pickup_at(Vec2::new(60.0, 30.0), 10.0, 0.0, 2_000.0));
        let outcome = resolve(&mut state);
        assert_eq!(outcome.expired, 1);
        assert_eq!(state.pickups.len(), 1);
        assert_eq!(state.score, 0);
        assert!(matches!(state.events[0], GameEvent::PickupExpired { .. }));
    }

    #[test]
    fn test_obstacle_hit_shrinks_player() {
        let mut state = running_state();
        let center = state.player.pos;
        state.obstacles.push(obstacle_at(center, 15.0));
        let outcome = resolve(&mut state);
        assert_eq!(outcome.hits, 1);
        assert!(!outcome.run_over);
        assert!((state.player.size - 17.75).abs() < 1e-4);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.particles.len(), 12);
        for p in &state.particles {
            assert!(p.vel.x >= -7.5 && p.vel.x < 7.5);
            assert!(p.size >= 1.0 && p.size < 4.0);
            assert_eq!(p.color, palette::IMPACT);
            assert_eq!(p.decay, 0.03);
        }
    }

    #[test]
    fn test_fatal_hit_skips_remaining_obstacles() {
        let mut state = running_state();
        let center = state.player.pos;
        state.player.size = 7.0;
        for _ in 0..3 {
            state.obstacles.push(obstacle_at(center, 20.0));
        }
        let outcome = resolve(&mut state);
        assert!(outcome.run_over);
        assert_eq!(outcome.hits, 1);
        assert!((state.player.size - 4.0).abs() < 1e-5);
        assert_eq!(state.obstacles.len(), 2, "untested obstacles survive");
        assert_eq!(state.particles.len(), 12);
    }

    #[test]
    fn test_escaped_obstacles_culled() {
        let mut state = running_state();
        state.obstacles.push(obstacle_at(Vec2::new(-60.0, 300.0), 15.0));
        state.obstacles.push(obstacle_at(Vec2::new(-40.0, 300.0), 15.0));
        let outcome = resolve(&mut state);
        assert_eq!(outcome.escaped, 1);
        assert_eq!(state.obstacles.len(), 1);
    }

    #[test]
    fn test_dead_particles_culled() {
        let mut state = running_state();
        let mut rng = Pcg32::seed_from_u64(1);
        emit_burst(
            &mut rng,
            &mut state.particles,
            Vec2::ZERO,
            palette::IMPACT,
            &state.tuning.impact_burst,
        );
        state.particles[0].life = 0.0;
        state.particles[1].life = -0.01;
        resolve(&mut state);
        assert_eq!(state.particles.len(), 10);
    }

    #[test]
    fn test_collected_pickup_not_also_expired() {
        let mut state = running_state();
        let center = state.player.pos;
        state.now_ms = 10_000.0;
        state.pickups.push(pickup_at(center, 10.0, 0.0, 0.0));
        let outcome = resolve(&mut state);
        assert_eq!(outcome.collected, 1);
        assert_eq!(outcome.expired, 0);
        assert_eq!(state.particles.len(), 8);
        assert!(
            !state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::PickupExpired { .. }))
        );
    }

    #[test]
    fn test_hit_obstacle_not_also_escaped() {
        let mut state = running_state();
        // Player parked at the left edge so it can touch an out-of-bounds block
        state.player.pos = Vec2::new(-40.0, 300.0);
        state.obstacles.push(obstacle_at(Vec2::new(-60.0, 300.0), 15.0));
        let outcome = resolve(&mut state);
        assert_eq!(outcome.hits, 1);
        assert_eq!(outcome.escaped, 0);
        assert!(state.obstacles.is_empty());
    }
}
