//! Error Types
//!
//! This module defines the error types used by the character rig.
//!
//! # Overview
//!
//! The main error type [`RigError`] covers every failure the animation and
//! expression core can report:
//! - Components used before being bound to a character
//! - Unknown clip, expression or viseme identifiers
//! - Malformed preset documents
//!
//! Unknown morph-channel names passed to the direct setters are *not* errors;
//! channel availability varies by loaded character, so those writes are dropped.
//!
//! # Usage
//!
//! All fallible public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, RigError>`.
//!
//! ```rust,ignore
//! use myth_character::errors::{RigError, Result};
//!
//! fn start(player: &mut ClipPlayer) -> Result<()> {
//!     player.play("idle", 0.2)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the character rig.
///
/// Every variant is recoverable: the caller may retry with a valid id.
#[derive(Error, Debug)]
pub enum RigError {
    // ========================================================================
    // Lifecycle Errors
    // ========================================================================
    /// The component has not been bound to a character yet.
    #[error("{0} is not initialized; call initialize() with a character first")]
    NotInitialized(&'static str),

    // ========================================================================
    // Lookup Errors
    // ========================================================================
    /// No clip is registered under the requested id.
    #[error("Clip not found: {0}")]
    ClipNotFound(String),

    /// No expression preset is registered under the requested name.
    #[error("Expression preset not found: {0}")]
    PresetNotFound(String),

    /// No viseme preset is registered under the requested name.
    #[error("Viseme preset not found: {0}")]
    VisemeNotFound(String),

    // ========================================================================
    // Format & Parsing Errors
    // ========================================================================
    /// Preset document could not be parsed.
    #[error("Preset parse error: {0}")]
    PresetParse(#[from] serde_json::Error),
}

/// Alias for `Result<T, RigError>`.
pub type Result<T> = std::result::Result<T, RigError>;
