use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::character::{Character, Skeleton};
use crate::expression::ExpressionBoard;
use crate::idle::blink::{BlinkOutput, BlinkState, Blinker};
use crate::idle::breathing::{BaselinePose, breathing_phase};
use crate::idle::config::{BlinkingConfig, BreathingConfig};

/// Largest step the blink timer takes in one tick, seconds.
pub const MAX_BLINK_STEP: f32 = 0.1;

/// Procedural idle motion: breathing on torso bones and periodic blinks.
///
/// Runs on delta time only and never reads clip state. While it is running
/// it owns the breathing bones' rotations; [`IdlePresenter::stop`] puts them
/// back exactly on the baseline so clip playback starts from an un-offset
/// rest pose.
pub struct IdlePresenter {
    breathing: BreathingConfig,
    blinking: BlinkingConfig,
    baseline: BaselinePose,
    initialized: bool,
    is_running: bool,
    breathing_time: f32,
    blinker: Blinker,
    rng: StdRng,
}

impl Default for IdlePresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl IdlePresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Deterministic blink jitter.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let blinking = BlinkingConfig::default();
        let blinker = Blinker::new(&blinking, &mut rng);
        Self {
            breathing: BreathingConfig::default(),
            blinking,
            baseline: BaselinePose::default(),
            initialized: false,
            is_running: false,
            breathing_time: 0.0,
            blinker,
            rng,
        }
    }

    /// Captures the baseline pose of the character's breathing bones.
    pub fn initialize(&mut self, character: &Character) {
        self.baseline = BaselinePose::capture(&character.skeleton, character.format);
        self.initialized = true;
        self.breathing_time = 0.0;
        self.blinker.reset(&self.blinking, &mut self.rng);

        if self.baseline.is_empty() {
            log::warn!("IdlePresenter: no breathing bones found on '{}'", character.name);
        } else {
            log::info!(
                "IdlePresenter: bound to '{}' ({} breathing bones)",
                character.name,
                self.baseline.len()
            );
        }
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn start(&mut self) {
        self.is_running = true;
    }

    /// Stops and restores the baseline pose and open eyes.
    pub fn stop(&mut self, skeleton: &mut Skeleton, board: &mut ExpressionBoard) {
        self.is_running = false;
        self.reset(skeleton, board);
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.is_running
    }

    /// Breathing bones back to the baseline, blink forced open, timers rewound.
    pub fn reset(&mut self, skeleton: &mut Skeleton, board: &mut ExpressionBoard) {
        self.baseline.restore(skeleton);
        board.snap_both_eyes_blink(0.0);
        self.breathing_time = 0.0;
        self.blinker.reset(&self.blinking, &mut self.rng);
    }

    /// Advances breathing by `delta_time` and the blink cycle by at most
    /// [`MAX_BLINK_STEP`].
    pub fn update(&mut self, delta_time: f32, skeleton: &mut Skeleton, board: &mut ExpressionBoard) {
        if !self.is_running || !self.initialized {
            return;
        }
        let dt = delta_time.max(0.0);

        if self.breathing.enabled {
            self.breathing_time += dt;
            let phase = breathing_phase(self.breathing_time, &self.breathing);
            self.baseline.apply(skeleton, phase, &self.breathing);
        } else {
            self.baseline.restore(skeleton);
        }

        if self.blinking.enabled {
            match self.blinker.update(dt.min(MAX_BLINK_STEP), &self.blinking, &mut self.rng) {
                BlinkOutput::Idle => {}
                BlinkOutput::Closing(value) => board.set_both_eyes_blink(value),
                BlinkOutput::Opened => board.snap_both_eyes_blink(0.0),
            }
        } else if self.blinker.is_blinking() {
            self.blinker.reset(&self.blinking, &mut self.rng);
            board.snap_both_eyes_blink(0.0);
        }
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    #[must_use]
    pub fn breathing_config(&self) -> BreathingConfig {
        self.breathing
    }

    /// Values are clamped into range.
    pub fn set_breathing_config(&mut self, config: BreathingConfig) {
        self.breathing = config.sanitized();
    }

    #[must_use]
    pub fn blinking_config(&self) -> BlinkingConfig {
        self.blinking
    }

    /// Values are clamped into range. An in-progress blink finishes with its
    /// drawn duration; the next interval uses the new settings.
    pub fn set_blinking_config(&mut self, config: BlinkingConfig) {
        self.blinking = config.sanitized();
        if !self.blinker.is_blinking() {
            self.blinker.reset(&self.blinking, &mut self.rng);
        }
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    #[must_use]
    pub fn blink_state(&self) -> BlinkState {
        self.blinker.state()
    }

    #[must_use]
    pub fn breathing_time(&self) -> f32 {
        self.breathing_time
    }

    #[must_use]
    pub fn breathing_phase(&self) -> f32 {
        breathing_phase(self.breathing_time, &self.breathing)
    }

    #[must_use]
    pub fn baseline(&self) -> &BaselinePose {
        &self.baseline
    }

    #[must_use]
    pub fn breathing_bone_count(&self) -> usize {
        self.baseline.len()
    }

    /// Unbinds without touching the skeleton; call [`IdlePresenter::stop`]
    /// first to restore the baseline.
    pub fn dispose(&mut self) {
        self.is_running = false;
        self.initialized = false;
        self.baseline = BaselinePose::default();
        log::info!("IdlePresenter: disposed");
    }
}
