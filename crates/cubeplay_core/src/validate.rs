use cubeplay_notation::Face;
use itertools::Itertools;
use serde::Serialize;
use strum::VariantArray;
use thiserror::Error;

use crate::{CENTER_INDICES, CUBE_STRING_LEN, ValidationError};

/// Result of checking a cube string against the cube invariants.
#[derive(Serialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Whether there are no errors. Warnings do not affect validity.
    pub valid: bool,
    /// Violated primary invariants.
    pub errors: Vec<ValidationIssue>,
    /// Violated secondary invariants.
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Returns an error listing every violated primary invariant, if there
    /// are any.
    pub fn ensure_valid(&self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                errors: self.errors.clone(),
            })
        }
    }
}

/// Problem found in a cube string.
#[derive(Serialize, Error, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValidationIssue {
    /// Cube string is not exactly 54 symbols long.
    #[error("cube string must be exactly 54 characters, got {len}")]
    WrongLength {
        /// Actual length, in characters.
        len: usize,
    },
    /// Cube string contains symbols other than `URFDLB`.
    #[error(
        "cube string must only contain U, R, F, D, L, B; invalid characters: {}",
        .symbols.iter().map(|c| format!("{c:?}")).join(", ")
    )]
    InvalidSymbols {
        /// Each offending character, once, sorted.
        symbols: Vec<char>,
    },
    /// Some color does not appear exactly 9 times.
    #[error(
        "each color must appear exactly 9 times; current counts: {}",
        .counts.iter().map(|(c, n)| format!("{c}: {n}")).join(", ")
    )]
    UnevenDistribution {
        /// Count of each color that does not appear exactly 9 times.
        counts: Vec<(char, usize)>,
    },
    /// Two or more center stickers share a color.
    #[error(
        "center stickers should be distinct; repeated: {}",
        .symbols.iter().join(", ")
    )]
    DuplicateCenters {
        /// Each repeated center color, once.
        symbols: Vec<char>,
    },
}

/// Checks a cube string against the cube invariants.
///
/// Errors (primary invariants): length is 54, every symbol is one of
/// `URFDLB`, and every symbol occurs exactly 9 times. Warnings (secondary
/// invariant): the six center stickers are mutually distinct.
pub fn validate_cube_str(s: &str) -> ValidationReport {
    let symbols = s.chars().collect_vec();
    let mut errors = vec![];
    let mut warnings = vec![];

    if symbols.len() != CUBE_STRING_LEN {
        errors.push(ValidationIssue::WrongLength { len: symbols.len() });
    }

    let invalid = symbols
        .iter()
        .copied()
        .filter(|&c| Face::try_from(c).is_err())
        .sorted_unstable()
        .dedup()
        .collect_vec();
    if !invalid.is_empty() {
        errors.push(ValidationIssue::InvalidSymbols { symbols: invalid });
    }

    let counts = symbols.iter().copied().counts();
    let uneven = Face::VARIANTS
        .iter()
        .map(|face| face.symbol())
        .map(|c| (c, counts.get(&c).copied().unwrap_or(0)))
        .filter(|&(_, n)| n != Face::STICKER_COUNT)
        .collect_vec();
    if !uneven.is_empty() {
        errors.push(ValidationIssue::UnevenDistribution { counts: uneven });
    }

    let centers = CENTER_INDICES
        .iter()
        .filter_map(|&i| symbols.get(i))
        .copied()
        .filter(|&c| Face::try_from(c).is_ok())
        .collect_vec();
    let repeated = centers
        .iter()
        .copied()
        .duplicates()
        .sorted_unstable()
        .collect_vec();
    if !repeated.is_empty() {
        warnings.push(ValidationIssue::DuplicateCenters { symbols: repeated });
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
        warnings,
    }
}
