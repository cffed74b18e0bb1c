//! Game state and core simulation types
//!
//! One `GameState` value owns every entity and the run bookkeeping. The tick
//! pipeline borrows it mutably; nothing else holds onto entities.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::color::{Rgba, palette};
use crate::tuning::Tuning;

/// Current phase of the run lifecycle
///
/// The "ended" state is transient: a run that ends drops straight back to
/// `Idle` and reports a `GameEvent::RunEnded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Start screen shown, loop not ticking
    Idle,
    /// Active gameplay
    Running,
    /// Loop ticks are no-ops until resumed
    Paused,
}

/// Trail sample for the player afterimage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub pos: Vec2,
    /// Recomputed for every sample each frame from its index
    pub alpha: f32,
}

/// The player orb
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    /// Where the pointer last was; the orb eases toward it
    pub target: Vec2,
    /// Radius
    pub size: f32,
    pub color: Rgba,
    /// Oldest first, newest last
    pub trail: VecDeque<TrailPoint>,
}

impl Player {
    pub fn new(center: Vec2, size: f32) -> Self {
        Self {
            pos: center,
            target: center,
            size,
            color: palette::PLAYER,
            trail: VecDeque::new(),
        }
    }

    /// Exponential follow: cover `factor` of the remaining distance
    pub fn follow_target(&mut self, factor: f32) {
        self.pos += (self.target - self.pos) * factor;
    }

    /// Append the current position to the trail and refresh every alpha
    pub fn record_trail(&mut self, max_len: usize, alpha_scale: f32) {
        self.trail.push_back(TrailPoint {
            pos: self.pos,
            alpha: 1.0,
        });
        while self.trail.len() > max_len {
            self.trail.pop_front();
        }

        let len = self.trail.len() as f32;
        for (i, point) in self.trail.iter_mut().enumerate() {
            point.alpha = i as f32 / len * alpha_scale;
        }
    }
}

/// Pulse multiplier for a pickup phase: `1 + sin(phase) * amplitude`
#[inline]
pub fn pulse_factor(phase: f32, amplitude: f32) -> f32 {
    1.0 + phase.sin() * amplitude
}

/// A collectible orb
#[derive(Debug, Clone)]
pub struct Pickup {
    pub pos: Vec2,
    pub size: f32,
    pub color: Rgba,
    /// Pulse phase in radians, advances every frame
    pub pulse: f32,
    /// Wall-clock creation time (ms)
    pub created_ms: f64,
}

impl Pickup {
    /// Draw and hit radius after pulse scaling
    #[inline]
    pub fn pulsed_radius(&self, amplitude: f32) -> f32 {
        self.size * pulse_factor(self.pulse, amplitude)
    }

    /// Whether the pickup has outlived its TTL at `now_ms`
    #[inline]
    pub fn is_expired(&self, now_ms: f64, ttl_ms: f64) -> bool {
        now_ms - self.created_ms > ttl_ms
    }
}

/// A spinning square that drifts across the arena
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Half-width of the square, also the hit radius
    pub size: f32,
    pub color: Rgba,
    /// Radians
    pub rotation: f32,
    /// Radians per frame, unaffected by level
    pub rotation_speed: f32,
}

impl Obstacle {
    /// Outside the viewport extended by `margin` on every side
    pub fn is_out_of_bounds(&self, viewport: Vec2, margin: f32) -> bool {
        self.pos.x < -margin
            || self.pos.x > viewport.x + margin
            || self.pos.y < -margin
            || self.pos.y > viewport.y + margin
    }
}

/// A particle for visual effects
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: Rgba,
    /// 1.0 at birth, dead at or below 0
    pub life: f32,
    /// Life lost per frame
    pub decay: f32,
}

/// End-of-run report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub score: u64,
    pub level: u32,
    /// High score after the run was folded in
    pub high_score: u64,
    /// The run beat the previous high score
    pub new_record: bool,
}

/// Things that happened during a tick, drained by the shell
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    PickupCollected { points: u64, pos: Vec2 },
    PickupExpired { pos: Vec2 },
    ObstacleHit { damage: f32, size_after: f32 },
    LevelUp { level: u32 },
    RunEnded(RunSummary),
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed of the current run
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    /// Logical surface size
    pub viewport: Vec2,
    pub phase: RunPhase,
    pub score: u64,
    /// Derived from score, never decreases within a run
    pub level: u32,
    pub high_score: u64,
    /// Ticks simulated in the current run
    pub ticks: u64,
    /// Wall-clock time of the latest tick (ms)
    pub now_ms: f64,
    pub player: Player,
    pub pickups: Vec<Pickup>,
    pub obstacles: Vec<Obstacle>,
    pub particles: Vec<Particle>,
    /// Events from the latest tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Idle state with the player parked at the viewport center
    pub fn new(seed: u64, tuning: Tuning, viewport: Vec2, high_score: u64) -> Self {
        let player = Player::new(viewport / 2.0, tuning.player_start_size);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            viewport,
            phase: RunPhase::Idle,
            score: 0,
            level: 1,
            high_score,
            ticks: 0,
            now_ms: 0.0,
            player,
            pickups: Vec::new(),
            obstacles: Vec::new(),
            particles: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Idle -> Running. Resets score, level and every collection; keeps the
    /// high score. Ignored unless idle.
    pub fn start_run(&mut self, seed: u64) -> bool {
        if self.phase != RunPhase::Idle {
            return false;
        }

        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.score = 0;
        self.level = 1;
        self.ticks = 0;
        self.player = Player::new(self.viewport / 2.0, self.tuning.player_start_size);
        self.pickups.clear();
        self.obstacles.clear();
        self.particles.clear();
        self.events.clear();
        self.phase = RunPhase::Running;

        log::info!("Run started (seed {}, high score {})", seed, self.high_score);
        true
    }

    /// Running/Paused -> Idle, folding the score into the high score
    pub fn end_run(&mut self) -> RunSummary {
        let new_record = self.score > self.high_score;
        if new_record {
            self.high_score = self.score;
        }
        self.phase = RunPhase::Idle;

        log::info!(
            "Run ended: score {}, level {}, high score {}{}",
            self.score,
            self.level,
            self.high_score,
            if new_record { " (new record)" } else { "" }
        );

        RunSummary {
            score: self.score,
            level: self.level,
            high_score: self.high_score,
            new_record,
        }
    }

    /// Running <-> Paused. Returns the new phase.
    pub fn toggle_pause(&mut self) -> RunPhase {
        match self.phase {
            RunPhase::Running => self.pause(),
            RunPhase::Paused => self.resume(),
            RunPhase::Idle => {}
        }
        self.phase
    }

    /// Pause if running (no-op otherwise)
    pub fn pause(&mut self) {
        if self.phase == RunPhase::Running {
            self.phase = RunPhase::Paused;
        }
    }

    /// Resume if paused (no-op otherwise)
    pub fn resume(&mut self) {
        if self.phase == RunPhase::Paused {
            self.phase = RunPhase::Running;
        }
    }

    /// Whether ticks do anything right now
    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    /// Pointer input: only the target moves, and only during a run
    pub fn set_target(&mut self, target: Vec2) {
        if self.phase != RunPhase::Idle {
            self.player.target = target;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport;

    #[test]
    fn test_trail_is_bounded_and_alphas_recomputed() {
        let mut player = Player::new(Vec2::ZERO, 20.0);
        for i in 0..40 {
            player.pos = Vec2::new(i as f32, 0.0);
            player.record_trail(15, 0.5);
            assert!(player.trail.len() <= 15);
        }
        assert_eq!(player.trail.len(), 15);
        // Oldest evicted, newest last
        assert_eq!(player.trail.front().unwrap().pos.x, 25.0);
        assert_eq!(player.trail.back().unwrap().pos.x, 39.0);
        for (i, point) in player.trail.iter().enumerate() {
            assert!((point.alpha - i as f32 / 15.0 * 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn test_follow_target_eases() {
        let mut player = Player::new(Vec2::ZERO, 20.0);
        player.target = Vec2::new(100.0, -50.0);
        player.follow_target(0.1);
        assert!((player.pos - Vec2::new(10.0, -5.0)).length() < 1e-5);
        player.follow_target(0.1);
        assert!((player.pos - Vec2::new(19.0, -9.5)).length() < 1e-4);
    }

    #[test]
    fn test_pickup_expiry_is_strict() {
        let pickup = Pickup {
            pos: Vec2::ZERO,
            size: 10.0,
            color: palette::PLAYER,
            pulse: 0.0,
            created_ms: 1000.0,
        };
        assert!(!pickup.is_expired(9000.0, 8000.0));
        assert!(pickup.is_expired(9000.5, 8000.0));
    }

    #[test]
    fn test_obstacle_bounds_margin() {
        let mut obstacle = Obstacle {
            pos: Vec2::new(-20.0, 300.0),
            vel: Vec2::ZERO,
            size: 15.0,
            color: palette::OBSTACLE,
            rotation: 0.0,
            rotation_speed: 0.0,
        };
        let vp = viewport();
        assert!(!obstacle.is_out_of_bounds(vp, 50.0));
        obstacle.pos.x = -50.5;
        assert!(obstacle.is_out_of_bounds(vp, 50.0));
        obstacle.pos = Vec2::new(400.0, vp.y + 51.0);
        assert!(obstacle.is_out_of_bounds(vp, 50.0));
    }

    #[test]
    fn test_start_run_resets_but_keeps_high_score() {
        let mut state = GameState::new(1, Tuning::default(), viewport(), 777);
        assert!(state.start_run(2));
        state.score = 450;
        state.level = 3;
        state.player.size = 33.0;
        state.player.pos = Vec2::new(10.0, 10.0);
        state.particles.push(Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size: 1.0,
            color: palette::IMPACT,
            life: 1.0,
            decay: 0.03,
        });

        let summary = state.end_run();
        assert_eq!(summary.score, 450);
        assert!(!summary.new_record);
        assert_eq!(state.phase, RunPhase::Idle);

        assert!(state.start_run(3));
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.high_score, 777);
        assert!(state.particles.is_empty());
        assert!(state.pickups.is_empty());
        assert!(state.obstacles.is_empty());
        assert_eq!(state.player.pos, viewport() / 2.0);
        assert_eq!(state.player.size, 20.0);
        assert!(state.player.trail.is_empty());
    }

    #[test]
    fn test_end_run_records_high_score() {
        let mut state = GameState::new(1, Tuning::default(), viewport(), 100);
        state.start_run(1);
        state.score = 101;
        let summary = state.end_run();
        assert!(summary.new_record);
        assert_eq!(summary.high_score, 101);
        assert_eq!(state.high_score, 101);
    }

    #[test]
    fn test_pause_cycle() {
        let mut state = GameState::new(1, Tuning::default(), viewport(), 0);
        assert_eq!(state.toggle_pause(), RunPhase::Idle);
        state.start_run(1);
        assert_eq!(state.toggle_pause(), RunPhase::Paused);
        assert!(!state.start_run(5), "start ignored while paused");
        assert_eq!(state.toggle_pause(), RunPhase::Running);
        state.pause();
        assert!(!state.is_running());
        state.resume();
        assert!(state.is_running());
    }

    #[test]
    fn test_target_ignored_when_idle() {
        let mut state = GameState::new(1, Tuning::default(), viewport(), 0);
        state.set_target(Vec2::new(5.0, 5.0));
        assert_eq!(state.player.target, viewport() / 2.0);
        state.start_run(1);
        state.set_target(Vec2::new(5.0, 5.0));
        assert_eq!(state.player.target, Vec2::new(5.0, 5.0));
    }
}
