use thiserror::Error;

/// Error produced when a move token does not match the grammar
/// `FACE[MODIFIER]`.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum InvalidMoveNotation {
    /// Token contains no characters other than whitespace.
    #[error("empty move")]
    Empty,
    /// First character is not one of `URFDLB` (in either case).
    #[error("unknown face {face:?} in move {token:?}")]
    UnknownFace {
        /// Whole token.
        token: String,
        /// Offending character.
        face: char,
    },
    /// Suffix after the face letter is not one of ``, `'`, or `2`.
    #[error("unknown modifier {modifier:?} in move {token:?}; expected nothing, `'`, or `2`")]
    UnknownModifier {
        /// Whole token.
        token: String,
        /// Offending suffix.
        modifier: String,
    },
}

/// Error produced when a character is not one of the six face symbols.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[error("invalid face symbol {0:?}; expected one of U, R, F, D, L, B")]
pub struct InvalidFace(pub char);
