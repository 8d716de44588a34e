use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use crate::{InvalidMoveNotation, Move};

/// Ordered, immutable list of moves.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct MoveSequence(Vec<Move>);

impl MoveSequence {
    /// Constructs an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of moves in the sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }
    /// Returns whether the sequence contains no moves.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the move at `index`, or `None` if it is out of bounds.
    pub fn get(&self, index: usize) -> Option<Move> {
        self.0.get(index).copied()
    }
    /// Returns the moves as a slice.
    pub fn as_slice(&self) -> &[Move] {
        &self.0
    }
    /// Iterates over the moves in order.
    pub fn iter(&self) -> impl '_ + DoubleEndedIterator<Item = Move> + ExactSizeIterator {
        self.0.iter().copied()
    }

    /// Returns the sequence that undoes this one: each move inverted, in
    /// reverse order.
    #[must_use]
    pub fn inverse(&self) -> Self {
        self.iter().rev().map(Move::inverse).collect()
    }
}

impl From<Vec<Move>> for MoveSequence {
    fn from(moves: Vec<Move>) -> Self {
        Self(moves)
    }
}

impl FromIterator<Move> for MoveSequence {
    fn from_iter<T: IntoIterator<Item = Move>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for MoveSequence {
    type Item = Move;
    type IntoIter = std::vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a MoveSequence {
    type Item = Move;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Move>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

impl Index<usize> for MoveSequence {
    type Output = Move;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl fmt::Display for MoveSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut is_first = true;
        for m in &self.0 {
            if is_first {
                is_first = false;
            } else {
                write!(f, " ")?;
            }
            write!(f, "{m}")?;
        }
        Ok(())
    }
}

impl FromStr for MoveSequence {
    type Err = InvalidMoveNotation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse_moves(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for MoveSequence {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for MoveSequence {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
