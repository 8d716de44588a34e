use crate::{Face, InvalidMoveNotation, Move, MoveSequence, Turn};

/// Parses a single move token such as `R`, `u2`, or `F'`.
///
/// Leading and trailing whitespace is ignored. The face letter is
/// case-insensitive; the modifier must be exactly one of ``, `'`, or `2`.
pub fn parse_move(token: &str) -> Result<Move, InvalidMoveNotation> {
    let token = token.trim();
    let mut chars = token.chars();
    let face_char = chars.next().ok_or(InvalidMoveNotation::Empty)?;

    let face = Face::try_from(face_char.to_ascii_uppercase()).map_err(|_| {
        InvalidMoveNotation::UnknownFace {
            token: token.to_owned(),
            face: face_char,
        }
    })?;

    let modifier = chars.as_str();
    let turn =
        Turn::from_suffix(modifier).ok_or_else(|| InvalidMoveNotation::UnknownModifier {
            token: token.to_owned(),
            modifier: modifier.to_owned(),
        })?;

    Ok(Move { face, turn })
}

/// Parses a whitespace-separated sequence of moves such as `R U R' U'`.
///
/// An empty or all-whitespace string is the empty sequence.
pub fn parse_moves(s: &str) -> Result<MoveSequence, InvalidMoveNotation> {
    s.split_whitespace().map(parse_move).collect()
}
