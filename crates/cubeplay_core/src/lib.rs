//! Cube state model and face-turn permutation engine for the 3x3x3 cube.
//!
//! The interchange format everywhere is the 54-symbol cube string: six
//! contiguous 9-symbol blocks in the order Up, Right, Front, Down, Left, Back,
//! each block row-major.

mod cube;
mod errors;
mod model;
mod notifier;
mod rotation;
mod validate;

/// Re-export of `cubeplay_notation`.
pub use cubeplay_notation as notation;

pub use cube::{CENTER_INDICES, CUBE_STRING_LEN, CubeState, FaceGrid, SOLVED_STRING, sticker_index};
pub use errors::{CubeError, RotationError, ValidationError};
pub use model::{CubeEvent, CubeModel};
pub use notifier::{ChangeNotifier, Listener, ListenerId};
pub use rotation::{RotationEngine, TwistEngine, apply_move, apply_moves, rotate, rotate_str};
pub use validate::{ValidationIssue, ValidationReport, validate_cube_str};

/// Prelude of common imports.
pub mod prelude {
    pub use cubeplay_notation::{Face, InvalidMoveNotation, Move, MoveSequence, Turn};

    pub use crate::{
        CubeError, CubeEvent, CubeModel, CubeState, FaceGrid, RotationEngine, TwistEngine,
        ValidationError, ValidationReport,
    };
}
