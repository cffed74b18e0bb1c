//! Wall-clock time and frame rate

/// Milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

const WINDOW: usize = 60;

/// Rolling FPS over the last 60 frame timestamps
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; WINDOW],
    frame_index: usize,
    frames_seen: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; WINDOW],
            frame_index: 0,
            frames_seen: 0,
            fps: 0,
        }
    }
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame at `time` (ms) and return the current estimate
    pub fn record(&mut self, time: f64) -> u32 {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % WINDOW;
        self.frames_seen = (self.frames_seen + 1).min(WINDOW);

        // Oldest sample sits at the next write slot once the window is full
        if self.frames_seen == WINDOW {
            let elapsed = time - self.frame_times[self.frame_index];
            if elapsed > 0.0 {
                self.fps = ((WINDOW - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
        self.fps
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steady_sixty_hz() {
        let mut counter = FpsCounter::new();
        for i in 0..120 {
            counter.record(i as f64 * 1000.0 / 60.0);
        }
        assert_eq!(counter.fps(), 60);
    }

    #[test]
    fn test_zero_until_window_fills() {
        let mut counter = FpsCounter::new();
        for i in 0..(WINDOW - 1) {
            assert_eq!(counter.record(i as f64 * 16.0), 0);
        }
        assert!(counter.record(WINDOW as f64 * 16.0) > 0);
    }

    #[test]
    fn test_now_is_positive() {
        assert!(now_ms() > 0.0);
    }
}
