//! Face-turn permutations.
//!
//! Each face turn is described by a [`FaceTurn`] table entry and applied by
//! one generic routine. A clockwise quarter turn cycles the face's own corner
//! and edge stickers and cycles the four strips of three stickers on the
//! adjacent faces. Half turns and counterclockwise turns are repeated
//! clockwise quarter turns.

use std::fmt;

use cubeplay_notation::{Face, Move, Turn};

use crate::{CUBE_STRING_LEN, CubeError, CubeState, RotationError};

/// Row of a face, left to right.
const fn row(r: usize) -> [usize; 3] {
    [r * 3, r * 3 + 1, r * 3 + 2]
}
/// Column of a face, top to bottom.
const fn col(c: usize) -> [usize; 3] {
    [c, c + 3, c + 6]
}
/// Reverses a strip.
const fn rev([a, b, c]: [usize; 3]) -> [usize; 3] {
    [c, b, a]
}

/// Three stickers along one edge of a face.
#[derive(Debug, Copy, Clone)]
struct Strip {
    face: Face,
    /// Sticker indices within the face. The sticker at position `k` moves to
    /// position `k` of the next strip in the cycle.
    stickers: [usize; 3],
}
const fn strip(face: Face, stickers: [usize; 3]) -> Strip {
    Strip { face, stickers }
}

/// Permutation table for a clockwise quarter turn of one face.
#[derive(Debug, Copy, Clone)]
struct FaceTurn {
    /// Corner stickers of the turning face; each moves to the next.
    corners: [usize; 4],
    /// Edge stickers of the turning face; each moves to the next.
    edges: [usize; 4],
    /// Adjacent strips; each moves to the next.
    strips: [Strip; 4],
}

/// Own-face cycles for a face whose grid is seen from outside the cube.
const CLOCKWISE_CORNERS: [usize; 4] = [0, 2, 8, 6];
const CLOCKWISE_EDGES: [usize; 4] = [1, 5, 7, 3];

/// Permutation tables, indexed by face.
///
/// The Back block is stored as seen through the cube from the front, so its
/// own cycles run the other way and the strips that touch it are reversed
/// relative to their neighbors.
const FACE_TURNS: [FaceTurn; 6] = {
    use Face::*;
    [
        // Up
        FaceTurn {
            corners: CLOCKWISE_CORNERS,
            edges: CLOCKWISE_EDGES,
            strips: [
                strip(Right, row(0)),
                strip(Front, row(0)),
                strip(Left, row(0)),
                strip(Back, rev(row(0))),
            ],
        },
        // Right
        FaceTurn {
            corners: CLOCKWISE_CORNERS,
            edges: CLOCKWISE_EDGES,
            strips: [
                strip(Up, col(2)),
                strip(Back, rev(col(2))),
                strip(Down, col(2)),
                strip(Front, col(2)),
            ],
        },
        // Front
        FaceTurn {
            corners: CLOCKWISE_CORNERS,
            edges: CLOCKWISE_EDGES,
            strips: [
                strip(Up, row(2)),
                strip(Right, col(0)),
                strip(Down, rev(row(0))),
                strip(Left, rev(col(2))),
            ],
        },
        // Down
        FaceTurn {
            corners: CLOCKWISE_CORNERS,
            edges: CLOCKWISE_EDGES,
            strips: [
                strip(Right, row(2)),
                strip(Back, rev(row(2))),
                strip(Left, row(2)),
                strip(Front, row(2)),
            ],
        },
        // Left
        FaceTurn {
            corners: CLOCKWISE_CORNERS,
            edges: CLOCKWISE_EDGES,
            strips: [
                strip(Up, col(0)),
                strip(Front, col(0)),
                strip(Down, col(0)),
                strip(Back, rev(col(0))),
            ],
        },
        // Back
        FaceTurn {
            corners: [0, 6, 8, 2],
            edges: [1, 3, 7, 5],
            strips: [
                strip(Up, row(0)),
                strip(Left, rev(col(0))),
                strip(Down, rev(row(2))),
                strip(Right, col(2)),
            ],
        },
    ]
};

/// Moves the sticker at `indices[i]` to `indices[i + 1]`, wrapping around.
fn cycle<const N: usize>(facelets: &mut [Face; CUBE_STRING_LEN], indices: [usize; N]) {
    let Some(&last) = indices.last() else {
        return;
    };
    let buffer = facelets[last];
    for i in (1..N).rev() {
        facelets[indices[i]] = facelets[indices[i - 1]];
    }
    facelets[indices[0]] = buffer;
}

/// Applies a clockwise quarter turn of `face` in place.
fn quarter_turn(facelets: &mut [Face; CUBE_STRING_LEN], face: Face) {
    let FaceTurn {
        corners,
        edges,
        strips,
    } = FACE_TURNS[face.index()];
    let base = face.offset();
    cycle(facelets, corners.map(|i| base + i));
    cycle(facelets, edges.map(|i| base + i));
    for k in 0..3 {
        cycle(facelets, strips.map(|s| s.face.offset() + s.stickers[k]));
    }
}

/// Returns the cube state after `turns` clockwise quarter turns of `face`.
///
/// `turns` is reduced modulo 4, so `-1` is a counterclockwise turn. Returns an
/// error if it reduces to 0.
pub fn rotate(cube: &CubeState, face: Face, turns: i32) -> Result<CubeState, RotationError> {
    let turn = Turn::from_count(turns).ok_or(RotationError::IrreducibleTurns(turns))?;
    Ok(apply_move(cube, Move::new(face, turn)))
}

/// Same as [`rotate()`], but on a raw cube string.
///
/// The cube string must have the right length and alphabet; color
/// distribution is not checked.
///
/// The Back block must be in the layout [`CubeState`] uses. Strings from a
/// Kociemba-style solver must go through [`CubeState::from_kociemba_str()`]
/// first.
pub fn rotate_str(cube: &str, face: char, turns: i32) -> Result<String, CubeError> {
    let face = Face::try_from(face).map_err(|e| RotationError::UnknownFace(e.0))?;
    let cube = CubeState::parse_facelets(cube)?;
    Ok(rotate(&cube, face, turns)?.to_string())
}

/// Returns the cube state after a move.
pub fn apply_move(cube: &CubeState, m: Move) -> CubeState {
    let mut ret = *cube;
    for _ in 0..m.turn.count() {
        quarter_turn(ret.facelets_mut(), m.face);
    }
    ret
}

/// Returns the cube state after a sequence of moves.
pub fn apply_moves(cube: &CubeState, moves: impl IntoIterator<Item = Move>) -> CubeState {
    moves
        .into_iter()
        .fold(*cube, |state, m| apply_move(&state, m))
}

/// Something that can apply moves to a cube state.
pub trait TwistEngine: fmt::Debug {
    /// Returns the cube state after `m`.
    fn twist(&self, cube: &CubeState, m: Move) -> Result<CubeState, CubeError>;
}

/// Rotation engine using the fixed permutation tables.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct RotationEngine;

impl TwistEngine for RotationEngine {
    fn twist(&self, cube: &CubeState, m: Move) -> Result<CubeState, CubeError> {
        Ok(rotate(cube, m.face, i32::from(m.turn.count()))?)
    }
}
