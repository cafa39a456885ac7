#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! Per-frame animation and expression core for skinned characters.
//!
//! Three tick-driven components share one character pose:
//!
//! - [`ClipPlayer`]: keyframe clips with crossfades
//! - [`ExpressionBoard`]: smoothed morph-channel targets, presets and visemes
//! - [`IdlePresenter`]: procedural breathing and blinking
//!
//! [`CharacterRig`] composes them and decides which one drives the skeleton.

pub mod animation;
pub mod character;
pub mod errors;
pub mod expression;
pub mod idle;
pub mod rig;
pub mod utils;

pub use animation::{AnimationClip, ClipInfo, ClipLayer, ClipPlayer, ClipSettings, PlaybackState};
pub use character::{BoneHandle, Character, ModelFormat, MorphChannelStore, Skeleton, Transform};
pub use errors::{Result, RigError};
pub use expression::{ActivePreset, ExpressionBoard, Preset};
pub use idle::{BlinkingConfig, BreathingConfig, IdlePresenter};
pub use rig::{CharacterRig, DriveMode};
