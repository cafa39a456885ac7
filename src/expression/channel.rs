/// Default fraction of the remaining distance covered per tick.
pub const DEFAULT_CHANNEL_RATE: f32 = 0.1;

/// Blink channels close and open within a few frames.
pub const BLINK_CHANNEL_RATE: f32 = 0.5;

/// Below this distance `current` snaps to `target`.
pub const SNAP_EPSILON: f32 = 0.001;

/// One morph channel's smoothed value.
#[derive(Debug, Clone, PartialEq)]
pub struct MorphChannel {
    pub name: String,
    pub current: f32,
    pub target: f32,
    pub rate: f32,
}

impl MorphChannel {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            current: 0.0,
            target: 0.0,
            rate: DEFAULT_CHANNEL_RATE,
        }
    }

    pub fn set_target(&mut self, value: f32) {
        self.target = value.clamp(0.0, 1.0);
    }

    /// One exponential smoothing step toward `target`.
    pub fn step(&mut self) {
        let diff = self.target - self.current;
        if diff.abs() > SNAP_EPSILON {
            self.current += diff * self.rate;
        } else {
            self.current = self.target;
        }
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }
}
