//! Utility Module
//!
//! Small helpers shared by the animation, expression and idle systems:
//!
//! - [`time`]: Wall-clock delta tracking for hosts that do not supply `dt`
//! - [`easing`]: Easing curves used by procedural motion
//!
//! ```rust,ignore
//! use myth_character::utils::easing::ease_in_out_quad;
//!
//! assert_eq!(ease_in_out_quad(0.5), 0.5);
//! ```

pub mod easing;
pub mod time;

pub use time::Timer;
