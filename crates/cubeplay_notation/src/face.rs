use std::fmt;

use strum::VariantArray;

use crate::InvalidFace;

/// Face of the cube.
///
/// Faces double as sticker colors: a solved cube has every sticker on the
/// [`Face::Up`] face colored `U`, and so on. Variants are declared in cube
/// string order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, VariantArray)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum Face {
    /// Up (`U`)
    Up,
    /// Right (`R`)
    Right,
    /// Front (`F`)
    Front,
    /// Down (`D`)
    Down,
    /// Left (`L`)
    Left,
    /// Back (`B`)
    Back,
}

impl Face {
    /// Number of stickers on one face.
    pub const STICKER_COUNT: usize = 9;

    /// Returns the position of the face in cube string order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the face at `index` in cube string order.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::VARIANTS.get(index).copied()
    }

    /// Returns the index of the first sticker of the face in a cube string.
    pub fn offset(self) -> usize {
        self.index() * Self::STICKER_COUNT
    }

    /// Returns the single-letter symbol for the face.
    pub fn symbol(self) -> char {
        match self {
            Face::Up => 'U',
            Face::Right => 'R',
            Face::Front => 'F',
            Face::Down => 'D',
            Face::Left => 'L',
            Face::Back => 'B',
        }
    }

    /// Returns the human-friendly name of the face.
    pub fn name(self) -> &'static str {
        match self {
            Face::Up => "Up",
            Face::Right => "Right",
            Face::Front => "Front",
            Face::Down => "Down",
            Face::Left => "Left",
            Face::Back => "Back",
        }
    }

    /// Returns the face on the opposite side of the cube.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Face::Up => Face::Down,
            Face::Right => Face::Left,
            Face::Front => Face::Back,
            Face::Down => Face::Up,
            Face::Left => Face::Right,
            Face::Back => Face::Front,
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Parses a cube string symbol. This is case-sensitive.
impl TryFrom<char> for Face {
    type Error = InvalidFace;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'U' => Ok(Face::Up),
            'R' => Ok(Face::Right),
            'F' => Ok(Face::Front),
            'D' => Ok(Face::Down),
            'L' => Ok(Face::Left),
            'B' => Ok(Face::Back),
            _ => Err(InvalidFace(c)),
        }
    }
}

impl From<Face> for char {
    fn from(face: Face) -> Self {
        face.symbol()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Face {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(self.symbol())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Face {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let c = char::deserialize(deserializer)?;
        Face::try_from(c).map_err(serde::de::Error::custom)
    }
}
