//! Frame delta clock.

use web_time::Instant;

/// Per-frame delta clock with a smoothed FPS readout.
///
/// The first tick after construction or [`reset`](Self::reset) yields a zero
/// delta, so a loop that was suspended never sees the suspended interval as
/// one giant frame.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Last frame timestamp
    last_frame: Option<Instant>,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameClock {
    /// Clock with no frame observed yet.
    pub fn new() -> Self {
        Self {
            last_frame: None,
            smoothed_fps: 60.0, // Start with reasonable default
            smoothing: 0.05,    /* 5% new value, 95% old value for smooth
                                 * display */
        }
    }

    /// Record a frame at `now` and return the seconds elapsed since the
    /// previous one.
    pub fn tick(&mut self, now: Instant) -> f32 {
        let Some(last) = self.last_frame.replace(now) else {
            return 0.0;
        };

        let frame_time = now.saturating_duration_since(last).as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
        frame_time
    }

    /// Forget the previous frame; the next tick yields zero.
    pub fn reset(&mut self) {
        self.last_frame = None;
    }

    /// Get the current FPS (smoothed)
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
