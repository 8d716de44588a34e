use std::fmt;
use std::str::FromStr;

use cubeplay_notation::Face;
use strum::VariantArray;

use crate::{CubeError, ValidationError, ValidationIssue, ValidationReport, validate_cube_str};

/// Number of symbols in a cube string.
pub const CUBE_STRING_LEN: usize = 54;

/// Indices of the six center stickers in a cube string.
pub const CENTER_INDICES: [usize; 6] = [4, 13, 22, 31, 40, 49];

/// Cube string for the solved cube.
pub const SOLVED_STRING: &str = "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";

/// Row-major 3x3 grid of stickers on one face.
pub type FaceGrid = [[Face; 3]; 3];

/// Returns the index into a cube string of the sticker at (`row`, `col`) on
/// `face`.
pub fn sticker_index(face: Face, row: usize, col: usize) -> Result<usize, CubeError> {
    if row > 2 || col > 2 {
        return Err(CubeError::OutOfRange { row, col });
    }
    Ok(face.offset() + row * 3 + col)
}

/// Colors of all 54 stickers, in cube string order.
///
/// Every value of this type has the right length and uses only the six face
/// symbols. Color distribution is not guaranteed; use [`CubeState::validate()`]
/// to check it.
///
/// The Back block is stored as seen through the cube from the front, so an `R`
/// carries Up's right column into Back indices 53, 50, and 47. Kociemba-style
/// solvers store Back as seen from behind; convert their strings with
/// [`CubeState::from_kociemba_str()`] and [`CubeState::to_kociemba_string()`].
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct CubeState([Face; CUBE_STRING_LEN]);

impl Default for CubeState {
    fn default() -> Self {
        Self::SOLVED
    }
}

impl CubeState {
    /// Solved cube.
    pub const SOLVED: Self = {
        const ORDER: [Face; 6] = [
            Face::Up,
            Face::Right,
            Face::Front,
            Face::Down,
            Face::Left,
            Face::Back,
        ];
        let mut facelets = [Face::Up; CUBE_STRING_LEN];
        let mut i = 0;
        while i < CUBE_STRING_LEN {
            facelets[i] = ORDER[i / Face::STICKER_COUNT];
            i += 1;
        }
        Self(facelets)
    };

    /// Constructs a cube state from sticker colors, without checking color
    /// distribution.
    pub const fn from_facelets(facelets: [Face; CUBE_STRING_LEN]) -> Self {
        Self(facelets)
    }

    /// Returns the sticker colors in cube string order.
    pub fn facelets(&self) -> &[Face; CUBE_STRING_LEN] {
        &self.0
    }
    pub(crate) fn facelets_mut(&mut self) -> &mut [Face; CUBE_STRING_LEN] {
        &mut self.0
    }

    /// Parses a cube string, checking only its length and alphabet.
    ///
    /// Use [`str::parse()`] to also check color distribution.
    pub fn parse_facelets(s: &str) -> Result<Self, ValidationError> {
        let mut facelets = [Face::Up; CUBE_STRING_LEN];
        let mut len = 0;
        let mut bad_symbols = vec![];
        for c in s.chars() {
            match Face::try_from(c) {
                Ok(face) => {
                    if let Some(slot) = facelets.get_mut(len) {
                        *slot = face;
                    }
                }
                Err(_) => {
                    if !bad_symbols.contains(&c) {
                        bad_symbols.push(c);
                    }
                }
            }
            len += 1;
        }

        let mut errors = vec![];
        if len != CUBE_STRING_LEN {
            errors.push(ValidationIssue::WrongLength { len });
        }
        if !bad_symbols.is_empty() {
            bad_symbols.sort_unstable();
            errors.push(ValidationIssue::InvalidSymbols {
                symbols: bad_symbols,
            });
        }
        if errors.is_empty() {
            Ok(Self(facelets))
        } else {
            Err(ValidationError { errors })
        }
    }

    /// Parses a cube string whose Back block is seen from behind, as Kociemba
    /// solvers write it. Every invariant is checked.
    pub fn from_kociemba_str(s: &str) -> Result<Self, ValidationError> {
        let mut cube: Self = s.parse()?;
        cube.mirror_back();
        Ok(cube)
    }
    /// Returns the cube string with the Back block seen from behind, as
    /// Kociemba solvers expect it.
    pub fn to_kociemba_string(&self) -> String {
        let mut cube = *self;
        cube.mirror_back();
        cube.to_string()
    }
    /// Swaps the left and right columns of the Back block.
    fn mirror_back(&mut self) {
        let base = Face::Back.offset();
        for row in 0..3 {
            self.0.swap(base + row * 3, base + row * 3 + 2);
        }
    }

    /// Returns the color of the sticker at (`row`, `col`) on `face`.
    pub fn sticker(&self, face: Face, row: usize, col: usize) -> Result<Face, CubeError> {
        Ok(self.0[sticker_index(face, row, col)?])
    }
    /// Sets the color of the sticker at (`row`, `col`) on `face`.
    pub fn set_sticker(
        &mut self,
        face: Face,
        row: usize,
        col: usize,
        color: Face,
    ) -> Result<(), CubeError> {
        self.0[sticker_index(face, row, col)?] = color;
        Ok(())
    }

    /// Returns the stickers of one face.
    pub fn face(&self, face: Face) -> FaceGrid {
        let base = face.offset();
        std::array::from_fn(|row| std::array::from_fn(|col| self.0[base + row * 3 + col]))
    }
    /// Replaces the stickers of one face.
    pub fn set_face(&mut self, face: Face, grid: FaceGrid) {
        let base = face.offset();
        for (row, colors) in grid.into_iter().enumerate() {
            self.0[base + row * 3..base + row * 3 + 3].copy_from_slice(&colors);
        }
    }

    /// Returns the colors of the six center stickers, in face order.
    pub fn centers(&self) -> [Face; 6] {
        CENTER_INDICES.map(|i| self.0[i])
    }

    /// Returns the number of stickers of each color, in face order.
    pub fn color_counts(&self) -> [usize; 6] {
        let mut counts = [0; 6];
        for &face in &self.0 {
            counts[face.index()] += 1;
        }
        counts
    }

    /// Returns whether every face is a single color.
    ///
    /// This does not require the faces to match their own symbols, so a solved
    /// cube in any orientation counts.
    pub fn is_solved(&self) -> bool {
        Face::VARIANTS.iter().all(|&face| {
            let stickers = &self.0[face.offset()..face.offset() + Face::STICKER_COUNT];
            stickers.iter().all(|&s| s == stickers[0])
        })
    }

    /// Checks the cube invariants. This never fails; problems are reported in
    /// the returned report.
    pub fn validate(&self) -> ValidationReport {
        validate_cube_str(&self.to_string())
    }
}

impl fmt::Display for CubeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for face in self.0 {
            write!(f, "{face}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for CubeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CubeState({:?})", self.to_string())
    }
}

/// Parses a cube string, checking every primary invariant. Secondary
/// invariant violations are logged as warnings.
impl FromStr for CubeState {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let report = validate_cube_str(s);
        report.ensure_valid()?;
        for warning in &report.warnings {
            log::warn!("{warning}");
        }
        Self::parse_facelets(s)
    }
}

impl serde::Serialize for CubeState {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for CubeState {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
