use serde::{Deserialize, Serialize};

/// Procedural breathing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreathingConfig {
    pub enabled: bool,
    /// Breaths per minute.
    pub rate: f32,
    /// Overall amplitude, `[0, 1]`.
    pub depth: f32,
    /// Chest pitch amplitude in radians at full depth, `[0, 1]`.
    pub chest_expansion: f32,
    /// Shoulder roll amplitude in radians at full depth, `[0, 1]`.
    pub shoulder_movement: f32,
}

impl Default for BreathingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rate: 15.0,
            depth: 0.5,
            chest_expansion: 0.1,
            shoulder_movement: 0.05,
        }
    }
}

impl BreathingConfig {
    /// Copy with every field forced into its valid range.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            enabled: self.enabled,
            rate: self.rate.max(0.0),
            depth: self.depth.clamp(0.0, 1.0),
            chest_expansion: self.chest_expansion.clamp(0.0, 1.0),
            shoulder_movement: self.shoulder_movement.clamp(0.0, 1.0),
        }
    }

    /// Seconds per breath, `None` when the rate is zero.
    #[must_use]
    pub fn period(&self) -> Option<f32> {
        (self.rate > 0.0).then(|| 60.0 / self.rate)
    }
}

/// Procedural blinking parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlinkingConfig {
    pub enabled: bool,
    /// Blinks per minute.
    pub frequency: f32,
    /// Shortest close-and-open cycle, seconds.
    pub min_duration: f32,
    /// Longest close-and-open cycle, seconds.
    pub max_duration: f32,
    /// Jitter the interval between blinks by ±50%.
    pub randomize: bool,
}

impl Default for BlinkingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            frequency: 15.0,
            min_duration: 0.1,
            max_duration: 0.2,
            randomize: true,
        }
    }
}

impl BlinkingConfig {
    /// Copy with non-negative values and `min_duration <= max_duration`.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let a = self.min_duration.max(0.0);
        let b = self.max_duration.max(0.0);
        Self {
            enabled: self.enabled,
            frequency: self.frequency.max(0.0),
            min_duration: a.min(b),
            max_duration: a.max(b),
            randomize: self.randomize,
        }
    }

    /// Mean seconds between blinks, `None` when the frequency is zero.
    #[must_use]
    pub fn interval(&self) -> Option<f32> {
        (self.frequency > 0.0).then(|| 60.0 / self.frequency)
    }
}
