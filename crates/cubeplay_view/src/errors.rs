use cubeplay_core::{CubeError, ValidationError};
use cubeplay_notation::{InvalidMoveNotation, Move};
use thiserror::Error;

/// Error that stopped playback.
///
/// This is recorded on the player and reported to listeners. It is never
/// returned from a control method.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("error applying move {index} ({mv}): {source}")]
pub struct AnimationError {
    /// Index of the move in the sequence.
    pub index: usize,
    /// Move that could not be applied.
    pub mv: Move,
    /// Underlying error.
    #[source]
    pub source: CubeError,
}

/// Error starting a playback session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlayerError {
    /// The player has been closed.
    #[error("player is closed")]
    Closed,
    /// The move list or cube string is invalid.
    #[error(transparent)]
    Cube(#[from] CubeError),
}

impl From<InvalidMoveNotation> for PlayerError {
    fn from(value: InvalidMoveNotation) -> Self {
        Self::Cube(value.into())
    }
}
impl From<ValidationError> for PlayerError {
    fn from(value: ValidationError) -> Self {
        Self::Cube(value.into())
    }
}
