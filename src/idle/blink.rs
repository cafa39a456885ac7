use rand::rngs::StdRng;
use rand::RngExt;
use serde::Serialize;

use crate::idle::config::BlinkingConfig;
use crate::utils::easing::pulse;

/// Snapshot of the blink timer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BlinkState {
    pub is_blinking: bool,
    /// `0 → 1` across one close-and-open cycle.
    pub blink_progress: f32,
    pub blink_duration: f32,
    /// Seconds spent open since the last blink.
    pub blink_timer: f32,
    pub next_blink_time: f32,
}

/// What the presenter should write to the blink channels this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlinkOutput {
    /// Eyes open, nothing to write.
    Idle,
    /// Mid-blink value in `[0, 1]`.
    Closing(f32),
    /// Cycle finished; force the eyes fully open.
    Opened,
}

/// Time-driven `Open → Closing → Open` blink cycle.
#[derive(Debug, Clone)]
pub struct Blinker {
    state: BlinkState,
}

impl Blinker {
    #[must_use]
    pub fn new(config: &BlinkingConfig, rng: &mut StdRng) -> Self {
        let mut blinker = Self {
            state: BlinkState {
                is_blinking: false,
                blink_progress: 0.0,
                blink_duration: config.min_duration,
                blink_timer: 0.0,
                next_blink_time: 0.0,
            },
        };
        blinker.reset(config, rng);
        blinker
    }

    #[must_use]
    pub fn state(&self) -> BlinkState {
        self.state
    }

    #[must_use]
    pub fn is_blinking(&self) -> bool {
        self.state.is_blinking
    }

    /// Back to `Open` with a freshly drawn interval.
    pub fn reset(&mut self, config: &BlinkingConfig, rng: &mut StdRng) {
        self.state.is_blinking = false;
        self.state.blink_progress = 0.0;
        self.state.blink_timer = 0.0;
        self.state.next_blink_time = next_interval(config, rng);
    }

    pub fn update(&mut self, dt: f32, config: &BlinkingConfig, rng: &mut StdRng) -> BlinkOutput {
        let s = &mut self.state;

        if !s.is_blinking {
            s.blink_timer += dt;
            if s.blink_timer < s.next_blink_time {
                return BlinkOutput::Idle;
            }
            s.is_blinking = true;
            s.blink_progress = 0.0;
            s.blink_duration = draw_duration(config, rng);
            return BlinkOutput::Closing(0.0);
        }

        s.blink_progress += if s.blink_duration > 0.0 {
            dt / s.blink_duration
        } else {
            1.0
        };

        if s.blink_progress >= 1.0 {
            self.reset(config, rng);
            return BlinkOutput::Opened;
        }
        BlinkOutput::Closing(pulse(s.blink_progress))
    }
}

fn next_interval(config: &BlinkingConfig, rng: &mut StdRng) -> f32 {
    let Some(interval) = config.interval() else {
        return f32::INFINITY;
    };
    if config.randomize {
        interval * rng.random_range(0.5..=1.5_f32)
    } else {
        interval
    }
}

fn draw_duration(config: &BlinkingConfig, rng: &mut StdRng) -> f32 {
    if config.max_duration > config.min_duration {
        rng.random_range(config.min_duration..=config.max_duration)
    } else {
        config.min_duration
    }
}
