//! Morph-target expression blending
//!
//! [`ExpressionBoard`] owns every morph channel of a character. Expressions
//! and visemes are [`Preset`]s that set channel targets; each tick the board
//! eases channel values toward their targets.

pub mod board;
pub mod channel;
pub mod preset;

pub use board::ExpressionBoard;
pub use channel::{BLINK_CHANNEL_RATE, DEFAULT_CHANNEL_RATE, MorphChannel, SNAP_EPSILON};
pub use preset::{ActivePreset, Preset, PresetDocument, builtin_expressions, builtin_visemes};
