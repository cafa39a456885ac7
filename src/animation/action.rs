use std::sync::Arc;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::animation::{
    binding::PropertyBinding,
    clip::{AnimationClip, TrackData},
    tracks::KeyframeCursor,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    Once,
    Loop,
}

/// Evaluation layer. Higher layers are blended over lower ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipLayer {
    #[default]
    Base,
    Overlay,
    /// Contributes its delta from the rest pose on top of lower layers.
    Additive,
}

impl ClipLayer {
    #[must_use]
    pub fn priority(self) -> u8 {
        match self {
            ClipLayer::Base => 0,
            ClipLayer::Overlay => 1,
            ClipLayer::Additive => 2,
        }
    }
}

pub const DEFAULT_FADE_SECONDS: f32 = 0.2;

/// Registration parameters of a clip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipSettings {
    pub layer: ClipLayer,
    /// Target blend weight once fully faded in.
    pub weight: f32,
    pub fade_in: f32,
    pub fade_out: f32,
}

impl Default for ClipSettings {
    fn default() -> Self {
        Self {
            layer: ClipLayer::Base,
            weight: 1.0,
            fade_in: DEFAULT_FADE_SECONDS,
            fade_out: DEFAULT_FADE_SECONDS,
        }
    }
}

/// Lifecycle of an action's contribution to the pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionState {
    /// Not evaluated.
    Inactive,
    /// Evaluated; weight may be fading in.
    Active,
    /// Evaluated while the weight fades to zero, then becomes `Inactive`.
    Stopping,
}

#[derive(Debug, Clone, Copy)]
struct WeightFade {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
}

/// Playback instance of a registered clip.
#[derive(Debug, Clone)]
pub struct AnimationAction {
    clip: Arc<AnimationClip>,
    settings: ClipSettings,

    pub time: f32,
    pub time_scale: f32,
    pub loop_mode: LoopMode,
    pub paused: bool,

    state: ActionState,
    weight: f32,
    fade: Option<WeightFade>,

    pub bindings: Vec<PropertyBinding>,
    pub(crate) track_cursors: Vec<KeyframeCursor>,
}

impl AnimationAction {
    #[must_use]
    pub fn new(clip: Arc<AnimationClip>, settings: ClipSettings, bindings: Vec<PropertyBinding>) -> Self {
        let track_count = clip.tracks.len();
        Self {
            clip,
            settings,
            time: 0.0,
            time_scale: 1.0,
            loop_mode: LoopMode::Loop,
            paused: false,
            state: ActionState::Inactive,
            weight: 0.0,
            fade: None,
            bindings,
            track_cursors: vec![KeyframeCursor::default(); track_count],
        }
    }

    #[must_use]
    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    #[must_use]
    pub fn settings(&self) -> &ClipSettings {
        &self.settings
    }

    #[must_use]
    pub fn state(&self) -> ActionState {
        self.state
    }

    /// Effective weight this tick, including any fade in progress.
    #[must_use]
    pub fn weight(&self) -> f32 {
        self.weight
    }

    #[must_use]
    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    /// Contributes to the pose this tick.
    #[must_use]
    pub fn is_effective(&self) -> bool {
        self.state != ActionState::Inactive && self.weight > 0.0
    }

    /// Restarts from time 0 and fades the weight from 0 to the registered
    /// target over `fade_in` seconds.
    pub fn start(&mut self, fade_in: f32) {
        self.time = 0.0;
        self.paused = false;
        self.state = ActionState::Active;
        self.weight = 0.0;
        self.fade_to(self.settings.weight, fade_in);
    }

    /// Fades to zero over `fade_out` seconds, then becomes inactive.
    pub fn begin_stop(&mut self, fade_out: f32) {
        if self.state == ActionState::Inactive {
            return;
        }
        self.state = ActionState::Stopping;
        self.fade_to(0.0, fade_out);
        self.finish_stop_if_silent();
    }

    /// Drops the action out of evaluation immediately.
    pub fn deactivate(&mut self) {
        self.state = ActionState::Inactive;
        self.weight = 0.0;
        self.fade = None;
        self.time = 0.0;
        self.paused = false;
    }

    fn fade_to(&mut self, target: f32, duration: f32) {
        if duration <= 0.0 {
            self.weight = target;
            self.fade = None;
        } else {
            self.fade = Some(WeightFade {
                from: self.weight,
                to: target,
                duration,
                elapsed: 0.0,
            });
        }
    }

    fn finish_stop_if_silent(&mut self) {
        if self.state == ActionState::Stopping && self.fade.is_none() && self.weight <= 0.0 {
            self.deactivate();
        }
    }

    /// Advances playback time and the weight fade.
    pub fn update(&mut self, dt: f32) {
        if self.state == ActionState::Inactive {
            return;
        }

        self.advance_fade(dt);
        if self.state == ActionState::Inactive {
            return;
        }
        self.advance_time(dt);
    }

    fn advance_fade(&mut self, dt: f32) {
        if let Some(fade) = self.fade.as_mut() {
            fade.elapsed += dt;
            if fade.elapsed >= fade.duration {
                self.weight = fade.to;
                self.fade = None;
            } else {
                let t = fade.elapsed / fade.duration;
                self.weight = fade.from + (fade.to - fade.from) * t;
            }
        }
        self.finish_stop_if_silent();
    }

    fn advance_time(&mut self, dt: f32) {
        if self.paused {
            return;
        }

        let duration = self.clip.duration;
        if duration <= 0.0 {
            return;
        }

        self.time += dt * self.time_scale;

        match self.loop_mode {
            LoopMode::Once => {
                // Hold the end pose.
                if self.time >= duration {
                    self.time = duration;
                    self.paused = true;
                } else if self.time < 0.0 {
                    self.time = 0.0;
                    self.paused = true;
                }
            }
            LoopMode::Loop => {
                if self.time >= duration {
                    self.time %= duration;
                } else if self.time < 0.0 {
                    // Reverse playback
                    self.time = duration + (self.time % duration);
                }
            }
        }
    }

    /// Gets the value of the specified track at the current time.
    pub fn sample_track(&mut self, track_index: usize) -> Option<TrackValue> {
        let track = self.clip.tracks.get(track_index)?;
        let cursor = self.track_cursors.get_mut(track_index)?;

        match &track.data {
            TrackData::Vector3(t) => t.sample_with_cursor(self.time, cursor).map(TrackValue::Vector3),
            TrackData::Quaternion(t) => t.sample_with_cursor(self.time, cursor).map(TrackValue::Quaternion),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum TrackValue {
    Vector3(Vec3),
    Quaternion(Quat),
}
