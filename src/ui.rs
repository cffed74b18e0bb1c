//! UI collaborator seam
//!
//! The game shell reports score and run-state changes through `UiSink`; the
//! browser build writes them into the DOM HUD, tests record them.

/// Run-state change pushed to the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSignal {
    /// Start screen visible (idle, waiting for a new run)
    pub show_start_screen: bool,
    /// A run is in progress (running or paused)
    pub is_running: bool,
    /// Best score, shown on the start screen when > 0
    pub high_score: u64,
}

/// Receiver for HUD updates
pub trait UiSink {
    /// Called once per running frame
    fn score(&mut self, score: u64, level: u32);
    /// Called on every run-state change
    fn run_state(&mut self, signal: RunSignal);
    /// Frame rate readout, `None` when it should be hidden
    fn fps(&mut self, _fps: Option<u32>) {}
}

/// Sink that discards everything (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullUi;

impl UiSink for NullUi {
    fn score(&mut self, _score: u64, _level: u32) {}
    fn run_state(&mut self, _signal: RunSignal) {}
}
