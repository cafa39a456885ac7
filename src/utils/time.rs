#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Wall-clock delta tracker for components ticked without an explicit `dt`.
pub struct Timer {
    last_update: Option<Instant>,
    /// Time since last tick
    pub delta: Duration,
    /// Total number of ticks
    pub frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Creates a timer that reports a zero delta on its first tick.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_update: None,
            delta: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Samples the clock and returns the elapsed seconds since the previous tick.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.delta = self
            .last_update
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last_update = Some(now);
        self.frame_count += 1;
        self.dt_seconds()
    }

    /// Forgets the previous sample so the next tick starts from zero.
    pub fn reset(&mut self) {
        self.last_update = None;
        self.delta = Duration::ZERO;
    }

    #[must_use]
    pub fn dt_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }
}
