//! Dice range specifiers and outcome lookup.
//!
//! A dice table row names the faces it covers as either a single number
//! (`"4"`) or an inclusive pair (`"2-5"`).

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand::rngs::StdRng;
use tw_core::DiceOutcome;

use crate::diagnostics::{Diagnostic, Diagnostics};

/// An inclusive range of die faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollRange {
    /// Lowest covered face.
    pub start: u32,
    /// Highest covered face.
    pub end: u32,
}

impl RollRange {
    /// A range covering `start..=end`. Empty if `start > end`.
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// A range covering a single face.
    pub fn single(face: u32) -> Self {
        Self::new(face, face)
    }

    /// Whether the roll falls inside the range.
    pub fn contains(&self, roll: u32) -> bool {
        (self.start..=self.end).contains(&roll)
    }

    /// Whether the range covers no faces.
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// The covered faces in ascending order.
    pub fn faces(&self) -> impl Iterator<Item = u32> {
        self.start..=self.end
    }
}

impl fmt::Display for RollRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Why a range specifier could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// The specifier is blank.
    #[error("empty range specifier")]
    Empty,

    /// A bound is not a non-negative integer.
    #[error("invalid bound \"{0}\"")]
    InvalidBound(String),
}

impl FromStr for RollRange {
    type Err = RangeError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        parse_range(spec)
    }
}

/// Parse `"4"` or `"2-5"` into an inclusive range.
///
/// With more than one hyphen the first and last numbers are the bounds.
pub fn parse_range(spec: &str) -> Result<RollRange, RangeError> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Err(RangeError::Empty);
    }

    let mut parts = spec.split('-').map(str::trim);
    let first = parts.next().unwrap_or(spec);
    let last = parts.last().unwrap_or(first);

    let bound = |s: &str| {
        s.parse::<u32>()
            .map_err(|_| RangeError::InvalidBound(s.to_string()))
    };

    Ok(RollRange::new(bound(first)?, bound(last)?))
}

/// Find the outcome for a roll.
///
/// Outcomes are scanned in order; the first whose range contains the roll
/// wins. Unparseable rows are skipped with a diagnostic. If nothing covers
/// the roll, the first outcome is used. Returns `None` only for an empty
/// table.
pub fn resolve_roll<'a>(
    roll: u32,
    outcomes: &'a [DiceOutcome],
    diagnostics: &mut Diagnostics,
) -> Option<&'a DiceOutcome> {
    for outcome in outcomes {
        match parse_range(&outcome.val) {
            Ok(range) if range.contains(roll) => return Some(outcome),
            Ok(_) => {}
            Err(err) => diagnostics.push(Diagnostic::UnparseableRange {
                spec: outcome.val.clone(),
                reason: err.to_string(),
            }),
        }
    }

    let fallback = outcomes.first()?;
    diagnostics.push(Diagnostic::UnmatchedRoll { roll });
    Some(fallback)
}

/// Roll one die with the given number of sides.
pub fn roll_die(rng: &mut StdRng, sides: u32) -> u32 {
    rng.random_range(1..=sides.max(1))
}
