//! Procedural idle motion
//!
//! [`IdlePresenter`] drives low-amplitude breathing on the torso bones and a
//! periodic blink through the [`ExpressionBoard`](crate::expression::ExpressionBoard).

pub mod blink;
pub mod breathing;
pub mod config;
pub mod presenter;

pub use blink::{BlinkOutput, BlinkState, Blinker};
pub use breathing::{BaselineBone, BaselinePose, BreathingRole, breathing_phase, offset_angle};
pub use config::{BlinkingConfig, BreathingConfig};
pub use presenter::{IdlePresenter, MAX_BLINK_STEP};
