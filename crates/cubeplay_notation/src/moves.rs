use std::fmt;
use std::str::FromStr;

use crate::{Face, InvalidMoveNotation};

/// Magnitude and direction of a face turn.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum Turn {
    /// Quarter turn clockwise.
    ///
    /// Example: `R`
    #[default]
    Clockwise,
    /// Half turn.
    ///
    /// Example: `R2`
    Half,
    /// Quarter turn counterclockwise, equivalent to three clockwise quarter
    /// turns.
    ///
    /// Example: `R'`
    CounterClockwise,
}

impl Turn {
    /// Returns the number of clockwise quarter turns: 1, 2, or 3.
    pub fn count(self) -> u8 {
        match self {
            Turn::Clockwise => 1,
            Turn::Half => 2,
            Turn::CounterClockwise => 3,
        }
    }

    /// Returns the turn equivalent to `count` clockwise quarter turns, or
    /// `None` if `count` is a multiple of 4.
    ///
    /// Negative counts are counterclockwise.
    pub fn from_count(count: i32) -> Option<Self> {
        match count.rem_euclid(4) {
            1 => Some(Turn::Clockwise),
            2 => Some(Turn::Half),
            3 => Some(Turn::CounterClockwise),
            _ => None,
        }
    }

    /// Returns the turn that undoes this one.
    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Turn::Clockwise => Turn::CounterClockwise,
            Turn::Half => Turn::Half,
            Turn::CounterClockwise => Turn::Clockwise,
        }
    }

    /// Returns the notation suffix for the turn.
    pub fn suffix(self) -> &'static str {
        match self {
            Turn::Clockwise => "",
            Turn::Half => "2",
            Turn::CounterClockwise => "'",
        }
    }

    /// Returns the turn for a notation suffix, or `None` if the suffix is not
    /// recognized. This is case-sensitive.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "" => Some(Turn::Clockwise),
            "2" => Some(Turn::Half),
            "'" => Some(Turn::CounterClockwise),
            _ => None,
        }
    }
}

/// Single face turn.
///
/// Example: `U'`
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct Move {
    /// Face to turn.
    pub face: Face,
    /// Direction and magnitude of the turn.
    pub turn: Turn,
}

impl Move {
    /// Constructs a move.
    pub fn new(face: Face, turn: Turn) -> Self {
        Self { face, turn }
    }

    /// Returns the move that undoes this one.
    #[must_use]
    pub fn inverse(self) -> Self {
        Self {
            face: self.face,
            turn: self.turn.inverse(),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face, self.turn.suffix())
    }
}

impl FromStr for Move {
    type Err = InvalidMoveNotation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse_move(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Move {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Move {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
