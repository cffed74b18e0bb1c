//! Spawner: probabilistic pickup and obstacle creation
//!
//! Spawn chances grow with the level. There is no cap on concurrent entities;
//! TTL expiry and off-screen culling keep the counts in check.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{GameState, Obstacle, Pickup};
use crate::color::{hsl, palette};
use crate::tuning::Tuning;

/// Uniform sample in [min, max); never panics on an empty range
#[inline]
pub(crate) fn uniform(rng: &mut Pcg32, min: f32, max: f32) -> f32 {
    min + rng.random::<f32>() * (max - min)
}

/// Viewport edge an obstacle enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Unit vector pointing into the viewport
    pub fn inward(self) -> Vec2 {
        match self {
            Edge::Top => Vec2::Y,
            Edge::Right => Vec2::NEG_X,
            Edge::Bottom => Vec2::NEG_Y,
            Edge::Left => Vec2::X,
        }
    }
}

/// Roll both spawn chances for this frame
pub fn spawn(state: &mut GameState) {
    let level = state.level;

    if state.rng.random::<f32>() < state.tuning.pickup_chance(level) {
        let pickup = spawn_pickup(&mut state.rng, &state.tuning, state.viewport, state.now_ms);
        log::debug!("Pickup spawned at {:?} (size {:.1})", pickup.pos, pickup.size);
        state.pickups.push(pickup);
    }

    if state.rng.random::<f32>() < state.tuning.obstacle_chance(level) {
        let edge = Edge::ALL[state.rng.random_range(0..Edge::ALL.len())];
        let obstacle = spawn_obstacle(&mut state.rng, &state.tuning, state.viewport, edge);
        log::debug!("Obstacle spawned from {:?} at {:?}", edge, obstacle.pos);
        state.obstacles.push(obstacle);
    }
}

/// A pickup somewhere inside the inset viewport
pub fn spawn_pickup(rng: &mut Pcg32, tuning: &Tuning, viewport: Vec2, now_ms: f64) -> Pickup {
    let inset = tuning.pickup_edge_inset;
    let pos = Vec2::new(
        uniform(rng, inset, viewport.x - inset),
        uniform(rng, inset, viewport.y - inset),
    );
    let size = uniform(rng, tuning.pickup_size_min, tuning.pickup_size_max);
    let hue = uniform(rng, 0.0, 360.0);
    let pulse = uniform(rng, 0.0, std::f32::consts::TAU);

    Pickup {
        pos,
        size,
        color: hsl(hue, 0.7, 0.6),
        pulse,
        created_ms: now_ms,
    }
}

/// An obstacle just outside `edge`, heading inward with some lateral drift
pub fn spawn_obstacle(rng: &mut Pcg32, tuning: &Tuning, viewport: Vec2, edge: Edge) -> Obstacle {
    let offset = tuning.obstacle_spawn_offset;
    let inward_speed = uniform(rng, tuning.obstacle_speed_min, tuning.obstacle_speed_max);
    let drift = uniform(rng, -tuning.obstacle_drift, tuning.obstacle_drift);

    let (pos, vel) = match edge {
        Edge::Top => (
            Vec2::new(uniform(rng, 0.0, viewport.x), -offset),
            Vec2::new(drift, inward_speed),
        ),
        Edge::Right => (
            Vec2::new(viewport.x + offset, uniform(rng, 0.0, viewport.y)),
            Vec2::new(-inward_speed, drift),
        ),
        Edge::Bottom => (
            Vec2::new(uniform(rng, 0.0, viewport.x), viewport.y + offset),
            Vec2::new(drift, -inward_speed),
        ),
        Edge::Left => (
            Vec2::new(-offset, uniform(rng, 0.0, viewport.y)),
            Vec2::new(inward_speed, drift),
        ),
    };

    Obstacle {
        pos,
        vel,
        size: uniform(rng, tuning.obstacle_size_min, tuning.obstacle_size_max),
        color: palette::OBSTACLE,
        rotation: 0.0,
        rotation_speed: uniform(rng, -tuning.obstacle_spin, tuning.obstacle_spin),
    }
}
