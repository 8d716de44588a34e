use std::convert::Infallible;

use cubeplay_notation::{InvalidFace, InvalidMoveNotation};
use itertools::Itertools;
use thiserror::Error;

use crate::ValidationIssue;

/// Error produced when a cube string violates a primary invariant: length,
/// alphabet, or color distribution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid cube string: {}", .errors.iter().join("; "))]
pub struct ValidationError {
    /// Every violated invariant. This is never empty.
    pub errors: Vec<ValidationIssue>,
}

/// Error produced by the rotation engine.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RotationError {
    /// Face symbol is not one of `URFDLB`.
    #[error("unknown face {0:?}")]
    UnknownFace(char),
    /// Turn count is a multiple of 4, so it does not reduce to 1, 2, or 3.
    #[error("turn count {0} does not reduce to 1, 2, or 3 quarter turns")]
    IrreducibleTurns(i32),
}

/// Error produced by cube state operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CubeError {
    /// Cube string is invalid.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Move token is invalid.
    #[error(transparent)]
    Notation(#[from] InvalidMoveNotation),
    /// Rotation parameters are invalid.
    #[error(transparent)]
    Rotation(#[from] RotationError),
    /// Sticker symbol is invalid.
    #[error(transparent)]
    Symbol(#[from] InvalidFace),
    /// Sticker position is outside the 3x3 grid.
    #[error("sticker position ({row}, {col}) is out of range; row and column must be 0, 1, or 2")]
    OutOfRange {
        /// Row requested.
        row: usize,
        /// Column requested.
        col: usize,
    },
}

impl From<Infallible> for CubeError {
    fn from(value: Infallible) -> Self {
        match value {}
    }
}
