use rustc_hash::FxHashMap;

use crate::character::{Character, ModelFormat, MorphChannelStore};
use crate::errors::{Result, RigError};
use crate::expression::channel::{BLINK_CHANNEL_RATE, MorphChannel};
use crate::expression::preset::{ActivePreset, Preset, PresetDocument, builtin_expressions, builtin_visemes};

/// Owner of every morph-channel write for one character.
///
/// Callers set *targets* (directly, through expression presets, visemes or
/// the blink wrappers); [`ExpressionBoard::update`] smooths each channel's
/// current value toward its target and writes it to the live store.
/// Several logical writers may touch the same channel; the last call wins.
pub struct ExpressionBoard {
    channels: Vec<MorphChannel>,
    index: FxHashMap<String, usize>,
    expressions: FxHashMap<String, Preset>,
    visemes: FxHashMap<String, Preset>,
    active_expression: Option<ActivePreset>,
    active_viseme: Option<ActivePreset>,
    blink_left: Option<usize>,
    blink_right: Option<usize>,
    initialized: bool,
}

impl Default for ExpressionBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionBoard {
    /// Creates an unbound board with the built-in presets registered.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Self {
            channels: Vec::new(),
            index: FxHashMap::default(),
            expressions: FxHashMap::default(),
            visemes: FxHashMap::default(),
            active_expression: None,
            active_viseme: None,
            blink_left: None,
            blink_right: None,
            initialized: false,
        };
        for preset in builtin_expressions() {
            board.register_expression(preset);
        }
        for preset in builtin_visemes() {
            board.register_viseme(preset);
        }
        board
    }

    /// Creates one channel per declared morph channel, all at 0.
    pub fn initialize(&mut self, character: &Character) {
        self.channels = character.morphs.names().iter().map(MorphChannel::new).collect();
        self.index = self
            .channels
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.clone(), i))
            .collect();
        self.active_expression = None;
        self.active_viseme = None;

        let (left, right) = self.resolve_blink_channels(character.format);
        self.blink_left = left;
        self.blink_right = right;
        for i in [left, right].into_iter().flatten() {
            self.channels[i].rate = BLINK_CHANNEL_RATE;
        }
        if left.is_none() || right.is_none() {
            log::warn!(
                "ExpressionBoard: '{}' has no complete eye-blink channel pair",
                character.name
            );
        }

        self.initialized = true;
        log::info!(
            "ExpressionBoard: bound to '{}' ({} channels)",
            character.name,
            self.channels.len()
        );
    }

    /// Format-specific names first, then every other known convention.
    fn resolve_blink_channels(&self, format: ModelFormat) -> (Option<usize>, Option<usize>) {
        let preferred = std::iter::once(format).chain(ModelFormat::ALL.into_iter().filter(|f| *f != format));
        for candidate in preferred {
            let (l, r) = candidate.blink_channels();
            let pair = (self.index.get(l).copied(), self.index.get(r).copied());
            if pair.0.is_some() || pair.1.is_some() {
                return pair;
            }
        }
        (None, None)
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// One smoothing step on every channel, written to `store`.
    pub fn update(&mut self, store: &mut MorphChannelStore) {
        for channel in &mut self.channels {
            channel.step();
            store.set(&channel.name, channel.current);
        }
    }

    // ========================================================================
    // Direct channel access
    // ========================================================================

    /// Sets a channel's target, clamped to `[0, 1]`. Unknown names are ignored.
    pub fn set_blend_shape(&mut self, name: &str, value: f32) {
        if let Some(channel) = self.channel_mut(name) {
            channel.set_target(value);
        }
    }

    /// Current (smoothed) value of a channel.
    #[must_use]
    pub fn blend_shape(&self, name: &str) -> Option<f32> {
        self.channel(name).map(|c| c.current)
    }

    #[must_use]
    pub fn blend_shape_target(&self, name: &str) -> Option<f32> {
        self.channel(name).map(|c| c.target)
    }

    /// Per-tick smoothing fraction for one channel, clamped to `(0, 1]`.
    pub fn set_channel_rate(&mut self, name: &str, rate: f32) {
        if let Some(channel) = self.channel_mut(name) {
            channel.rate = rate.clamp(f32::EPSILON, 1.0);
        }
    }

    #[must_use]
    pub fn channel_rate(&self, name: &str) -> Option<f32> {
        self.channel(name).map(|c| c.rate)
    }

    #[must_use]
    pub fn channel_names(&self) -> Vec<&str> {
        self.channels.iter().map(|c| c.name.as_str()).collect()
    }

    fn channel(&self, name: &str) -> Option<&MorphChannel> {
        self.index.get(name).map(|&i| &self.channels[i])
    }

    fn channel_mut(&mut self, name: &str) -> Option<&mut MorphChannel> {
        self.index.get(name).map(|&i| &mut self.channels[i])
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    /// Registers (or replaces) an expression preset.
    pub fn register_expression(&mut self, preset: Preset) {
        self.expressions.insert(preset.name.clone(), preset);
    }

    /// Sets each channel of `name` to `value × weight`; other channels keep
    /// their targets.
    pub fn set_expression(&mut self, name: &str, weight: f32) -> Result<()> {
        self.ensure_initialized()?;
        let preset = self
            .expressions
            .get(name)
            .ok_or_else(|| RigError::PresetNotFound(name.to_string()))?;

        apply_preset(&mut self.channels, &self.index, preset, weight);
        self.active_expression = Some(ActivePreset {
            name: name.to_string(),
            weight,
        });
        Ok(())
    }

    #[must_use]
    pub fn expression(&self) -> Option<ActivePreset> {
        self.active_expression.clone()
    }

    /// Drives the last-applied expression's channels back to 0.
    pub fn clear_expression(&mut self) {
        if let Some(active) = self.active_expression.take()
            && let Some(preset) = self.expressions.get(&active.name)
        {
            apply_preset(&mut self.channels, &self.index, preset, 0.0);
        }
    }

    #[must_use]
    pub fn expression_names(&self) -> Vec<&str> {
        sorted_names(&self.expressions)
    }

    // ========================================================================
    // Lip-sync
    // ========================================================================

    /// Registers (or replaces) a viseme preset.
    pub fn register_viseme(&mut self, preset: Preset) {
        self.visemes.insert(preset.name.clone(), preset);
    }

    pub fn set_lip_sync(&mut self, viseme: &str, weight: f32) -> Result<()> {
        self.ensure_initialized()?;
        let preset = self
            .visemes
            .get(viseme)
            .ok_or_else(|| RigError::VisemeNotFound(viseme.to_string()))?;

        apply_preset(&mut self.channels, &self.index, preset, weight);
        self.active_viseme = Some(ActivePreset {
            name: viseme.to_string(),
            weight,
        });
        Ok(())
    }

    #[must_use]
    pub fn lip_sync(&self) -> Option<ActivePreset> {
        self.active_viseme.clone()
    }

    pub fn clear_lip_sync(&mut self) {
        if let Some(active) = self.active_viseme.take()
            && let Some(preset) = self.visemes.get(&active.name)
        {
            apply_preset(&mut self.channels, &self.index, preset, 0.0);
        }
    }

    #[must_use]
    pub fn viseme_names(&self) -> Vec<&str> {
        sorted_names(&self.visemes)
    }

    /// Registers every preset in a [`PresetDocument`] JSON string.
    /// Returns how many presets were added.
    pub fn load_presets_json(&mut self, json: &str) -> Result<usize> {
        let document: PresetDocument = serde_json::from_str(json)?;
        let (expressions, visemes) = document.into_presets();
        let count = expressions.len() + visemes.len();
        for preset in expressions {
            self.register_expression(preset);
        }
        for preset in visemes {
            self.register_viseme(preset);
        }
        log::debug!("ExpressionBoard: loaded {count} presets");
        Ok(count)
    }

    // ========================================================================
    // Eye blink
    // ========================================================================

    pub fn set_eye_blink(&mut self, left: f32, right: f32) {
        if let Some(i) = self.blink_left {
            self.channels[i].set_target(left);
        }
        if let Some(i) = self.blink_right {
            self.channels[i].set_target(right);
        }
    }

    pub fn set_both_eyes_blink(&mut self, value: f32) {
        self.set_eye_blink(value, value);
    }

    /// Sets both blink channels' target *and* current value, skipping the
    /// smoothing.
    pub fn snap_both_eyes_blink(&mut self, value: f32) {
        for i in [self.blink_left, self.blink_right].into_iter().flatten() {
            let channel = &mut self.channels[i];
            channel.set_target(value);
            channel.current = channel.target;
        }
    }

    /// Current `(left, right)` blink values; 0 for a missing channel.
    #[must_use]
    pub fn eye_blink(&self) -> (f32, f32) {
        let value = |slot: Option<usize>| slot.map_or(0.0, |i| self.channels[i].current);
        (value(self.blink_left), value(self.blink_right))
    }

    #[must_use]
    pub fn has_blink_channels(&self) -> bool {
        self.blink_left.is_some() && self.blink_right.is_some()
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Targets every channel at 0 and forgets the active presets. Values
    /// ease out over the following ticks.
    pub fn reset(&mut self) {
        for channel in &mut self.channels {
            channel.target = 0.0;
        }
        self.active_expression = None;
        self.active_viseme = None;
    }

    /// Unbinds from the character. Registered presets are kept.
    pub fn dispose(&mut self) {
        self.channels.clear();
        self.index.clear();
        self.active_expression = None;
        self.active_viseme = None;
        self.blink_left = None;
        self.blink_right = None;
        self.initialized = false;
        log::info!("ExpressionBoard: disposed");
    }

    fn ensure_initialized(&self) -> Result<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(RigError::NotInitialized("ExpressionBoard"))
        }
    }
}

fn apply_preset(channels: &mut [MorphChannel], index: &FxHashMap<String, usize>, preset: &Preset, weight: f32) {
    for (name, value) in &preset.values {
        if let Some(&i) = index.get(name) {
            channels[i].set_target(value * weight);
        }
    }
}

fn sorted_names(presets: &FxHashMap<String, Preset>) -> Vec<&str> {
    let mut names: Vec<&str> = presets.keys().map(String::as_str).collect();
    names.sort_unstable();
    names
}
