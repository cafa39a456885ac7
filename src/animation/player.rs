use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::animation::action::{ActionState, AnimationAction, ClipLayer, ClipSettings, LoopMode};
use crate::animation::binder::Binder;
use crate::animation::clip::AnimationClip;
use crate::animation::mixer::PoseMixer;
use crate::character::{BoneHandle, Character, Skeleton};
use crate::errors::{Result, RigError};
use crate::utils::time::Timer;

/// Playback state of the current clip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub is_paused: bool,
    /// Seconds, within `[0, duration]`.
    pub current_time: f32,
    pub duration: f32,
    pub speed: f32,
    #[serde(rename = "loop")]
    pub looping: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            is_playing: false,
            is_paused: false,
            current_time: 0.0,
            duration: 0.0,
            speed: 1.0,
            looping: true,
        }
    }
}

/// Snapshot of a registered clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipInfo {
    pub id: String,
    pub name: String,
    pub duration: f32,
    pub layer: ClipLayer,
    pub weight: f32,
    pub fade_in: f32,
    pub fade_out: f32,
    pub track_count: usize,
    pub bound_track_count: usize,
    /// Weight contributed this tick.
    pub effective_weight: f32,
    pub is_active: bool,
}

struct Binding {
    bones: FxHashMap<String, BoneHandle>,
}

/// Keyframe clip playback for one character.
///
/// Holds any number of registered clips and one *current* clip. Switching
/// clips crossfades: the outgoing clip fades over its own registered
/// `fade_out` while the incoming one rises over the `fade_in` passed to
/// [`ClipPlayer::play`].
///
/// The player only stores binding state; bones are written through the
/// `&mut Skeleton` passed to [`ClipPlayer::update`].
pub struct ClipPlayer {
    binding: Option<Binding>,
    actions: FxHashMap<String, AnimationAction>,
    current: Option<String>,
    state: PlaybackState,
    mixer: PoseMixer,
    timer: Timer,
}

impl Default for ClipPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            binding: None,
            actions: FxHashMap::default(),
            current: None,
            state: PlaybackState::default(),
            mixer: PoseMixer::default(),
            timer: Timer::new(),
        }
    }

    /// Binds the player to `character` and registers its preloaded clips
    /// under their own names.
    ///
    /// A player serves one character; calling this again rebinds and drops
    /// every registered clip.
    pub fn initialize(&mut self, character: &Character) {
        let skeleton = &character.skeleton;
        let bones = skeleton
            .iter()
            .map(|(handle, bone)| (bone.name.clone(), handle))
            .collect();

        let binding = Binding { bones };
        self.mixer = PoseMixer::new(skeleton.rest_pose());
        self.actions.clear();
        self.current = None;
        self.state = PlaybackState::default();
        self.timer.reset();

        for clip in &character.clips {
            let action = build_action(&binding, &self.state, &clip.name, Arc::clone(clip), ClipSettings::default());
            self.actions.insert(clip.name.clone(), action);
        }
        self.binding = Some(binding);

        log::info!(
            "ClipPlayer: bound to '{}' ({} bones, {} preloaded clips)",
            character.name,
            skeleton.len(),
            character.clips.len()
        );
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.binding.is_some()
    }

    /// Registers `clip` under `id` with default settings.
    pub fn add_clip(&mut self, id: impl Into<String>, clip: impl Into<Arc<AnimationClip>>) -> Result<()> {
        self.add_clip_with(id, clip, ClipSettings::default())
    }

    /// Registers `clip` under `id`. An existing registration is replaced.
    pub fn add_clip_with(
        &mut self,
        id: impl Into<String>,
        clip: impl Into<Arc<AnimationClip>>,
        settings: ClipSettings,
    ) -> Result<()> {
        let binding = self.binding.as_ref().ok_or(RigError::NotInitialized("ClipPlayer"))?;
        let id = id.into();
        let action = build_action(binding, &self.state, &id, clip.into(), settings);

        if self.actions.insert(id.clone(), action).is_some() && self.current.as_deref() == Some(id.as_str()) {
            // The replaced action was current; the fresh one starts silent.
            self.current = None;
            self.state.is_playing = false;
            self.state.is_paused = false;
            self.state.current_time = 0.0;
        }
        Ok(())
    }

    /// Unregisters `id`. Removing the current clip resets playback state.
    pub fn remove_clip(&mut self, id: &str) -> bool {
        let removed = self.actions.remove(id).is_some();
        if removed && self.current.as_deref() == Some(id) {
            self.current = None;
            self.reset_state();
        }
        removed
    }

    /// Unregisters every clip.
    pub fn clear(&mut self) {
        self.actions.clear();
        self.current = None;
        self.reset_state();
    }

    #[must_use]
    pub fn has_clip(&self, id: &str) -> bool {
        self.actions.contains_key(id)
    }

    /// Registered ids, sorted.
    #[must_use]
    pub fn clip_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.actions.keys().cloned().collect();
        ids.sort();
        ids
    }

    #[must_use]
    pub fn current_clip(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Makes `id` the current clip, crossfading from the previous one.
    pub fn play(&mut self, id: &str, fade_in: f32) -> Result<()> {
        if !self.actions.contains_key(id) {
            return Err(RigError::ClipNotFound(id.to_string()));
        }

        if let Some(previous) = self.current.take()
            && previous != id
            && let Some(action) = self.actions.get_mut(&previous)
        {
            let fade_out = action.settings().fade_out;
            action.begin_stop(fade_out);
        }

        let speed = self.state.speed;
        let looping = self.state.looping;
        let action = self
            .actions
            .get_mut(id)
            .ok_or_else(|| RigError::ClipNotFound(id.to_string()))?;
        action.time_scale = speed;
        action.loop_mode = loop_mode(looping);
        action.start(fade_in);

        self.state.duration = action.clip().duration;
        self.state.current_time = 0.0;
        self.state.is_playing = true;
        self.state.is_paused = false;
        self.current = Some(id.to_string());

        log::debug!("ClipPlayer: play '{id}' (fade in {fade_in:.2}s)");
        Ok(())
    }

    /// [`ClipPlayer::play`] with the default 0.2s fade.
    pub fn play_with_default_fade(&mut self, id: &str) -> Result<()> {
        self.play(id, crate::animation::action::DEFAULT_FADE_SECONDS)
    }

    pub fn pause(&mut self) {
        if let Some(action) = self.current_action_mut() {
            action.paused = true;
            self.state.is_paused = true;
            self.state.is_playing = false;
        }
    }

    pub fn resume(&mut self) {
        if let Some(action) = self.current_action_mut() {
            action.paused = false;
            self.state.is_paused = false;
            self.state.is_playing = true;
        }
    }

    /// Fades the current clip out over `fade_out` seconds.
    ///
    /// State reporting flips immediately; the action keeps contributing as
    /// `Stopping` until the fade elapses in [`ClipPlayer::update`].
    pub fn stop(&mut self, fade_out: f32) {
        if let Some(id) = self.current.take()
            && let Some(action) = self.actions.get_mut(&id)
        {
            action.begin_stop(fade_out);
        }
        self.state.current_time = 0.0;
        self.state.is_playing = false;
        self.state.is_paused = false;
    }

    /// Sets the playback position of the current clip, clamped to its duration.
    pub fn seek(&mut self, time: f32) {
        let Some(action) = self.current_action_mut() else {
            return;
        };
        let time = time.clamp(0.0, action.clip().duration);
        action.time = time;
        self.state.current_time = time;
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.state.speed = speed;
        if let Some(action) = self.current_action_mut() {
            action.time_scale = speed;
        }
    }

    pub fn set_loop(&mut self, looping: bool) {
        self.state.looping = looping;
        if let Some(action) = self.current_action_mut() {
            action.loop_mode = loop_mode(looping);
        }
    }

    /// Crossfades `from` out and `to` in over `duration`, outside the
    /// current-clip bookkeeping.
    pub fn blend(&mut self, from: &str, to: &str, duration: f32) -> Result<()> {
        for id in [from, to] {
            if !self.actions.contains_key(id) {
                return Err(RigError::ClipNotFound(id.to_string()));
            }
        }

        if let Some(action) = self.actions.get_mut(from) {
            action.begin_stop(duration);
        }
        if let Some(action) = self.actions.get_mut(to) {
            action.time_scale = self.state.speed;
            action.loop_mode = loop_mode(self.state.looping);
            action.start(duration);
        }
        log::debug!("ClipPlayer: blend '{from}' -> '{to}' over {duration:.2}s");
        Ok(())
    }

    /// Starts `id` alongside the current clip (typically an `Overlay` or
    /// `Additive` layer) without changing which clip is current.
    pub fn activate(&mut self, id: &str, fade_in: f32) -> Result<()> {
        let speed = self.state.speed;
        let looping = self.state.looping;
        let action = self
            .actions
            .get_mut(id)
            .ok_or_else(|| RigError::ClipNotFound(id.to_string()))?;
        action.time_scale = speed;
        action.loop_mode = loop_mode(looping);
        action.start(fade_in);
        Ok(())
    }

    /// Fades out a clip started with [`ClipPlayer::activate`] over its
    /// registered `fade_out`.
    pub fn deactivate(&mut self, id: &str) -> Result<()> {
        let action = self
            .actions
            .get_mut(id)
            .ok_or_else(|| RigError::ClipNotFound(id.to_string()))?;
        let fade_out = action.settings().fade_out;
        action.begin_stop(fade_out);
        Ok(())
    }

    /// Advances all actions by `dt` seconds and writes the blended pose.
    pub fn update(&mut self, dt: f32, skeleton: &mut Skeleton) {
        if self.binding.is_none() {
            return;
        }

        for action in self.actions.values_mut() {
            action.update(dt);
        }

        self.sync_state();

        let mut ordered: Vec<(&String, &mut AnimationAction)> = self
            .actions
            .iter_mut()
            .filter(|(_, a)| a.state() != ActionState::Inactive)
            .collect();
        ordered.sort_by(|(a_id, a), (b_id, b)| {
            a.settings()
                .layer
                .cmp(&b.settings().layer)
                .then_with(|| a_id.cmp(b_id))
        });
        let mut ordered: Vec<&mut AnimationAction> = ordered.into_iter().map(|(_, a)| a).collect();

        self.mixer.apply(&mut ordered, skeleton);
    }

    /// [`ClipPlayer::update`] with the wall-clock delta since the last tick.
    pub fn tick(&mut self, skeleton: &mut Skeleton) {
        let dt = self.timer.tick();
        self.update(dt, skeleton);
    }

    /// Reads the playback position back from the current action so the
    /// reported time is the time the pose was sampled at.
    fn sync_state(&mut self) {
        if !self.state.is_playing || self.state.is_paused {
            return;
        }
        let Some(action) = self.current_action_mut() else {
            return;
        };

        let time = action.time;
        // A non-looping action pauses itself on reaching either end.
        let reached_end =
            action.loop_mode == LoopMode::Once && (action.paused || action.clip().duration <= 0.0);

        self.state.current_time = time;
        if reached_end {
            // End of clip holds the last pose.
            self.pause();
        }
    }

    /// Writes the bind pose captured at [`ClipPlayer::initialize`] to every bone.
    pub fn restore_rest_pose(&self, skeleton: &mut Skeleton) {
        self.mixer.restore_rest(skeleton);
    }

    /// Owned copy of the playback state.
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[must_use]
    pub fn clip_info(&self, id: &str) -> Option<ClipInfo> {
        let action = self.actions.get(id)?;
        let clip = action.clip();
        let settings = action.settings();
        Some(ClipInfo {
            id: id.to_string(),
            name: clip.name.clone(),
            duration: clip.duration,
            layer: settings.layer,
            weight: settings.weight,
            fade_in: settings.fade_in,
            fade_out: settings.fade_out,
            track_count: clip.tracks.len(),
            bound_track_count: action.bindings.len(),
            effective_weight: action.weight(),
            is_active: action.state() != ActionState::Inactive,
        })
    }

    /// Effective weight of `id` this tick.
    #[must_use]
    pub fn clip_weight(&self, id: &str) -> Option<f32> {
        self.actions.get(id).map(AnimationAction::weight)
    }

    #[must_use]
    pub fn clip_state(&self, id: &str) -> Option<ActionState> {
        self.actions.get(id).map(AnimationAction::state)
    }

    /// Drops every clip and unbinds from the character.
    pub fn dispose(&mut self) {
        self.clear();
        self.binding = None;
        self.mixer = PoseMixer::default();
        log::info!("ClipPlayer: disposed");
    }

    fn current_action_mut(&mut self) -> Option<&mut AnimationAction> {
        let id = self.current.as_ref()?;
        self.actions.get_mut(id)
    }

    fn reset_state(&mut self) {
        let speed = self.state.speed;
        let looping = self.state.looping;
        self.state = PlaybackState {
            speed,
            looping,
            ..PlaybackState::default()
        };
    }
}

fn build_action(
    binding: &Binding,
    state: &PlaybackState,
    id: &str,
    clip: Arc<AnimationClip>,
    settings: ClipSettings,
) -> AnimationAction {
    let bindings = Binder::bind_with(|name| binding.bones.get(name).copied(), &clip);
    log::debug!(
        "ClipPlayer: registered '{id}' ({} of {} tracks bound, {:.2}s)",
        bindings.len(),
        clip.tracks.len(),
        clip.duration
    );

    let mut action = AnimationAction::new(clip, settings, bindings);
    action.time_scale = state.speed;
    action.loop_mode = loop_mode(state.looping);
    action
}

fn loop_mode(looping: bool) -> LoopMode {
    if looping { LoopMode::Loop } else { LoopMode::Once }
}
