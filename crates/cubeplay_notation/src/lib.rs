//! Face-turn notation for the 3x3x3 cube.
//!
//! A move is a face letter followed by an optional modifier: `R` is a
//! clockwise quarter turn, `R2` is a half turn, and `R'` is a counterclockwise
//! quarter turn. Face letters are case-insensitive; modifiers are not.

mod errors;
mod face;
mod moves;
mod parse;
mod sequence;

pub use errors::{InvalidFace, InvalidMoveNotation};
pub use face::Face;
pub use moves::{Move, Turn};
pub use parse::{parse_move, parse_moves};
pub use sequence::MoveSequence;
