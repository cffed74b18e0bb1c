//! Frame composition
//!
//! Turns a `GameState` into an ordered list of draw commands. Back-to-front:
//! background fade, trail, player, pickups, obstacles, particles.

use glam::Vec2;

use crate::color::{Rgba, palette, rgb8, with_alpha};
use crate::settings::Settings;
use crate::sim::GameState;

/// Outer colour of the player gradient
const PLAYER_RIM: Rgba = rgb8(0, 255, 255, 0.3);
/// Outer colour of the obstacle gradient
const OBSTACLE_RIM: Rgba = rgb8(255, 68, 68, 0.3);

/// One drawing primitive in logical (800x600) coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCmd {
    /// Full-surface translucent fill over the previous frame
    Fade { color: Rgba },
    /// Flat filled circle
    Circle { center: Vec2, radius: f32, color: Rgba },
    /// Radial gradient disk, `inner` at the centre to `outer` at the rim
    RadialDisk {
        center: Vec2,
        radius: f32,
        inner: Rgba,
        outer: Rgba,
    },
    /// Rotated square with a radial gradient of radius `half_extent`
    GradientSquare {
        center: Vec2,
        half_extent: f32,
        rotation: f32,
        inner: Rgba,
        outer: Rgba,
    },
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct DrawList {
    pub commands: Vec<DrawCmd>,
    pub viewport: Vec2,
    pub circle_segments: u32,
}

impl DrawList {
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Compose the draw list for the current state
pub fn compose(state: &GameState, settings: &Settings) -> DrawList {
    let amplitude = state.tuning.pulse_amplitude;
    let max_particles = settings.max_particles();
    let capacity = 2
        + state.player.trail.len()
        + state.pickups.len()
        + state.obstacles.len()
        + state.particles.len().min(max_particles);
    let mut commands = Vec::with_capacity(capacity);

    commands.push(DrawCmd::Fade {
        color: with_alpha(palette::BACKGROUND, settings.fade_alpha()),
    });

    if settings.trails {
        let player = &state.player;
        let len = player.trail.len() as f32;
        for (i, point) in player.trail.iter().enumerate() {
            commands.push(DrawCmd::Circle {
                center: point.pos,
                radius: player.size * (i as f32 / len),
                color: with_alpha(player.color, point.alpha),
            });
        }
    }

    commands.push(DrawCmd::RadialDisk {
        center: state.player.pos,
        radius: state.player.size,
        inner: state.player.color,
        outer: PLAYER_RIM,
    });

    for pickup in &state.pickups {
        commands.push(DrawCmd::RadialDisk {
            center: pickup.pos,
            radius: pickup.pulsed_radius(amplitude),
            inner: pickup.color,
            outer: palette::PICKUP_RIM,
        });
    }

    for obstacle in &state.obstacles {
        commands.push(DrawCmd::GradientSquare {
            center: obstacle.pos,
            half_extent: obstacle.size,
            rotation: obstacle.rotation,
            inner: obstacle.color,
            outer: OBSTACLE_RIM,
        });
    }

    for particle in state.particles.iter().take(max_particles) {
        commands.push(DrawCmd::Circle {
            center: particle.pos,
            radius: particle.size,
            color: with_alpha(particle.color, particle.life),
        });
    }

    DrawList {
        commands,
        viewport: state.viewport,
        circle_segments: settings.quality.circle_segments(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::QualityPreset;
    use crate::sim::{Obstacle, Particle, Pickup};
    use crate::tuning::Tuning;
    use crate::viewport;

    fn populated_state() -> GameState {
        let mut state = GameState::new(7, Tuning::default(), viewport(), 0);
        state.start_run(7);
        state.player.record_trail(15, 0.5);
        state.player.record_trail(15, 0.5);
        state.pickups.push(Pickup {
            pos: Vec2::new(100.0, 100.0),
            size: 10.0,
            color: palette::PLAYER,
            pulse: 0.0,
            created_ms: 0.0,
        });
        state.obstacles.push(Obstacle {
            pos: Vec2::new(200.0, 50.0),
            vel: Vec2::ZERO,
            size: 20.0,
            color: palette::OBSTACLE,
            rotation: 0.5,
            rotation_speed: 0.0,
        });
        for _ in 0..3 {
            state.particles.push(Particle {
                pos: Vec2::new(300.0, 300.0),
                vel: Vec2::ZERO,
                size: 3.0,
                color: palette::IMPACT,
                life: 0.4,
                decay: 0.03,
            });
        }
        state
    }

    #[test]
    fn test_draw_order() {
        let list = compose(&populated_state(), &Settings::default());
        let kinds: Vec<&str> = list
            .commands
            .iter()
            .map(|c| match c {
                DrawCmd::Fade { .. } => "fade",
                DrawCmd::Circle { .. } => "circle",
                DrawCmd::RadialDisk { .. } => "disk",
                DrawCmd::GradientSquare { .. } => "square",
            })
            .collect();
        assert_eq!(
            kinds,
            [
                "fade", "circle", "circle", "disk", "disk", "square", "circle", "circle",
                "circle"
            ]
        );
        assert_eq!(list.circle_segments, 24);
    }

    #[test]
    fn test_fade_and_trail_values() {
        let list = compose(&populated_state(), &Settings::default());
        match list.commands[0] {
            DrawCmd::Fade { color } => assert!((color[3] - 0.1).abs() < 1e-6),
            other => panic!("expected fade, got {:?}", other),
        }
        // Second trail sample: radius 20 * 1/2, alpha 1/2 * 0.5
        match list.commands[2] {
            DrawCmd::Circle { radius, color, .. } => {
                assert!((radius - 10.0).abs() < 1e-5);
                assert!((color[3] - 0.25).abs() < 1e-5);
            }
            other => panic!("expected trail circle, got {:?}", other),
        }
    }

    #[test]
    fn test_pickup_radius_pulses_and_particle_alpha_is_life() {
        let list = compose(&populated_state(), &Settings::default());
        match list.commands[4] {
            DrawCmd::RadialDisk { radius, outer, .. } => {
                // pulse 0 -> factor 1
                assert!((radius - 10.0).abs() < 1e-5);
                assert_eq!(outer, palette::PICKUP_RIM);
            }
            other => panic!("expected pickup disk, got {:?}", other),
        }
        match list.commands[6] {
            DrawCmd::Circle { color, .. } => assert!((color[3] - 0.4).abs() < 1e-6),
            other => panic!("expected particle, got {:?}", other),
        }
    }

    #[test]
    fn test_settings_only_change_what_is_drawn() {
        let state = populated_state();
        let settings = Settings {
            quality: QualityPreset::Low,
            trails: false,
            particles: false,
            reduced_motion: true,
            ..Settings::default()
        };
        let list = compose(&state, &settings);
        assert_eq!(list.len(), 4);
        assert_eq!(list.circle_segments, 12);
        assert!(matches!(list.commands[0], DrawCmd::Fade { color } if color[3] == 1.0));
        assert_eq!(state.particles.len(), 3);
    }
}
