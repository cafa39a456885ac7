//! Composition root for one character.

use crate::animation::ClipPlayer;
use crate::character::Character;
use crate::errors::{Result, RigError};
use crate::expression::ExpressionBoard;
use crate::idle::IdlePresenter;

/// Which component writes bone rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriveMode {
    /// Keyframe clips drive the skeleton.
    Clip,
    /// Procedural breathing drives the torso bones.
    #[default]
    Idle,
}

/// Owns a character and the three per-tick components bound to it.
///
/// Exactly one of [`ClipPlayer`] and [`IdlePresenter`] writes bones at a
/// time, selected by [`DriveMode`]. The [`ExpressionBoard`] is ticked after
/// the skeleton driver so blink writes made by the presenter land in the
/// same frame.
pub struct CharacterRig {
    pub character: Character,
    pub player: ClipPlayer,
    pub board: ExpressionBoard,
    pub idle: IdlePresenter,
    mode: DriveMode,
}

impl CharacterRig {
    /// Binds fresh components to `character` and starts in [`DriveMode::Idle`].
    #[must_use]
    pub fn new(character: Character) -> Self {
        Self::with_components(character, ClipPlayer::new(), ExpressionBoard::new(), IdlePresenter::new())
    }

    /// Binds the given components to `character`.
    #[must_use]
    pub fn with_components(
        character: Character,
        mut player: ClipPlayer,
        mut board: ExpressionBoard,
        mut idle: IdlePresenter,
    ) -> Self {
        player.initialize(&character);
        board.initialize(&character);
        idle.initialize(&character);
        idle.start();

        Self {
            character,
            player,
            board,
            idle,
            mode: DriveMode::Idle,
        }
    }

    #[must_use]
    pub fn drive_mode(&self) -> DriveMode {
        self.mode
    }

    /// Hands the skeleton to the other driver.
    ///
    /// Entering `Clip` stops the presenter, which restores the baseline
    /// pose. Entering `Idle` stops clip playback without a fade and puts the
    /// skeleton back in its bind pose.
    pub fn set_drive_mode(&mut self, mode: DriveMode) {
        if mode == self.mode {
            return;
        }
        match mode {
            DriveMode::Clip => {
                self.idle.stop(&mut self.character.skeleton, &mut self.board);
            }
            DriveMode::Idle => {
                self.player.stop(0.0);
                self.player.restore_rest_pose(&mut self.character.skeleton);
                self.idle.start();
            }
        }
        log::info!("CharacterRig: drive mode {:?} -> {mode:?}", self.mode);
        self.mode = mode;
    }

    /// Switches to [`DriveMode::Clip`] and plays `id`.
    pub fn play(&mut self, id: &str, fade_in: f32) -> Result<()> {
        if !self.player.has_clip(id) {
            return Err(RigError::ClipNotFound(id.to_string()));
        }
        self.set_drive_mode(DriveMode::Clip);
        self.player.play(id, fade_in)
    }

    pub fn set_expression(&mut self, name: &str, weight: f32) -> Result<()> {
        self.board.set_expression(name, weight)
    }

    pub fn set_lip_sync(&mut self, viseme: &str, weight: f32) -> Result<()> {
        self.board.set_lip_sync(viseme, weight)
    }

    /// One frame: skeleton driver, then expression smoothing into the
    /// character's morph store.
    pub fn update(&mut self, dt: f32) {
        match self.mode {
            DriveMode::Clip => self.player.update(dt, &mut self.character.skeleton),
            DriveMode::Idle => self.idle.update(dt, &mut self.character.skeleton, &mut self.board),
        }
        self.board.update(&mut self.character.morphs);
    }

    /// Releases all components. Idle offsets are removed first.
    pub fn dispose(&mut self) {
        self.idle.stop(&mut self.character.skeleton, &mut self.board);
        self.idle.dispose();
        self.player.dispose();
        self.board.dispose();
    }
}
