//! Game shell
//!
//! Owns the simulation state plus its collaborators (storage, UI sink) and
//! drives one tick + render per display refresh. Platform entry points only
//! forward input and call `frame`.

use glam::Vec2;

use crate::highscores::HighScore;
use crate::persistence::KeyValueStore;
use crate::renderer::{RenderSurface, compose};
use crate::settings::{QualityPreset, Settings};
use crate::sim::{GameEvent, GameState, RunPhase, tick};
use crate::tuning::Tuning;
use crate::ui::{RunSignal, UiSink};
use crate::viewport;

pub struct Game<S: KeyValueStore, U: UiSink> {
    pub state: GameState,
    pub settings: Settings,
    store: S,
    ui: U,
}

impl<S: KeyValueStore, U: UiSink> Game<S, U> {
    /// Load the high score and show the start screen
    pub fn new(tuning: Tuning, settings: Settings, store: S, ui: U, seed: u64) -> Self {
        let high = HighScore::load(&store);
        let mut game = Self {
            state: GameState::new(seed, tuning, viewport(), high.score),
            settings,
            store,
            ui,
        };
        game.signal_run_state();
        game
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Begin a new run (ignored unless idle)
    pub fn start(&mut self, seed: u64) -> bool {
        let started = self.state.start_run(seed);
        if started {
            self.signal_run_state();
            self.ui.score(self.state.score, self.state.level);
        }
        started
    }

    pub fn toggle_pause(&mut self) -> RunPhase {
        let phase = self.state.toggle_pause();
        log::info!("Phase now {:?}", phase);
        phase
    }

    pub fn pause(&mut self) {
        if self.state.is_running() {
            self.state.pause();
            log::info!("Paused");
        }
    }

    /// Pointer/touch position in logical coordinates
    pub fn pointer_moved(&mut self, pos: Vec2) {
        self.state.set_target(pos);
    }

    /// Replace display settings, persisting them
    pub fn apply_settings(&mut self, settings: Settings) {
        settings.save(&mut self.store);
        self.settings = settings;
    }

    /// Show or hide the FPS readout
    pub fn toggle_fps(&mut self) -> bool {
        let settings = Settings {
            show_fps: !self.settings.show_fps,
            ..self.settings.clone()
        };
        self.apply_settings(settings);
        self.settings.show_fps
    }

    /// Step to the next quality preset
    pub fn cycle_quality(&mut self) -> QualityPreset {
        let quality = self.settings.quality.next();
        log::info!("Quality: {}", quality.as_str());
        self.apply_settings(Settings {
            quality,
            ..self.settings.clone()
        });
        quality
    }

    /// Report a frame-rate sample; hidden unless enabled in settings
    pub fn report_fps(&mut self, fps: u32) {
        let shown = self.settings.show_fps.then_some(fps);
        self.ui.fps(shown);
    }

    /// One display refresh: tick, draw, report.
    ///
    /// Returns whether a tick ran. Nothing happens while idle or paused, or
    /// when there is no surface to draw on.
    pub fn frame(&mut self, now_ms: f64, surface: Option<&mut dyn RenderSurface>) -> bool {
        let Some(surface) = surface else {
            return false;
        };
        if tick(&mut self.state, now_ms).is_none() {
            return false;
        }

        surface.present(&compose(&self.state, &self.settings));
        self.ui.score(self.state.score, self.state.level);
        self.drain_events();
        true
    }

    fn drain_events(&mut self) {
        for event in std::mem::take(&mut self.state.events) {
            match event {
                GameEvent::PickupCollected { points, pos } => {
                    log::debug!("Pickup +{} at ({:.0}, {:.0})", points, pos.x, pos.y);
                }
                GameEvent::PickupExpired { pos } => {
                    log::debug!("Pickup expired at ({:.0}, {:.0})", pos.x, pos.y);
                }
                GameEvent::ObstacleHit { damage, size_after } => {
                    log::debug!("Hit for {:.2}, size now {:.2}", damage, size_after);
                }
                GameEvent::LevelUp { level } => {
                    log::info!("Level up: {}", level);
                }
                GameEvent::RunEnded(summary) => {
                    if summary.new_record {
                        HighScore::new(summary.high_score).save(&mut self.store);
                    }
                    self.signal_run_state();
                }
            }
        }
    }

    fn signal_run_state(&mut self) {
        let phase = self.state.phase;
        self.ui.run_state(RunSignal {
            show_start_screen: phase == RunPhase::Idle,
            is_running: phase != RunPhase::Idle,
            high_score: self.state.high_score,
        });
    }
}
