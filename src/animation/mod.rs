//! Keyframe clip playback
//!
//! - [`KeyframeTrack`]: cursor-cached keyframe sampling (linear, step, cubic spline)
//! - [`AnimationClip`]: immutable set of bone tracks with a fixed duration
//! - [`AnimationAction`]: one playing instance of a clip, with weight fades
//! - [`ClipPlayer`]: registered clips, the current clip and crossfades

pub mod action;
pub mod binder;
pub mod binding;
pub mod clip;
pub mod mixer;
pub mod player;
pub mod tracks;
pub mod values;

pub use action::{ActionState, AnimationAction, ClipLayer, ClipSettings, DEFAULT_FADE_SECONDS, LoopMode};
pub use binder::Binder;
pub use binding::{PropertyBinding, TargetPath};
pub use clip::{AnimationClip, Track, TrackData, TrackMeta};
pub use mixer::PoseMixer;
pub use player::{ClipInfo, ClipPlayer, PlaybackState};
pub use tracks::{InterpolationMode, KeyframeCursor, KeyframeTrack};
