//! Grid coordinates and the generation counter.
//!
//! `Pos` orders row-major (`row` first, then `col`), which is the iteration
//! order of every pass over the grid.  Distances are integer-valued so that
//! "strictly closer" comparisons in the transition engine are exact.

use std::fmt;

// ── Pos ───────────────────────────────────────────────────────────────────────

/// A cell coordinate.  `(0, 0)` is the upper-left corner.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos {
    pub row: u32,
    pub col: u32,
}

impl Pos {
    #[inline]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Chebyshev (king-move) distance: `max(|Δrow|, |Δcol|)`.
    #[inline]
    pub fn chebyshev(self, other: Pos) -> u32 {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }

    /// Squared Euclidean distance.  Kept squared so radius tests stay integral.
    #[inline]
    pub fn euclidean_sq(self, other: Pos) -> u64 {
        let dr = self.row.abs_diff(other.row) as u64;
        let dc = self.col.abs_diff(other.col) as u64;
        (dr * dr).saturating_add(dc * dc)
    }
}

impl From<(u32, u32)> for Pos {
    #[inline]
    fn from((row, col): (u32, u32)) -> Self {
        Pos { row, col }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// ── Generation ────────────────────────────────────────────────────────────────

/// Discrete simulation time.  Generation 0 is the seed grid; every completed
/// transition advances the counter by exactly one.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Generation(pub u64);

impl Generation {
    pub const SEED: Generation = Generation(0);

    /// The generation immediately after `self`.
    #[inline]
    pub fn next(self) -> Generation {
        Generation(self.0 + 1)
    }
}

impl std::ops::Add<u64> for Generation {
    type Output = Generation;
    #[inline]
    fn add(self, rhs: u64) -> Generation {
        Generation(self.0 + rhs)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G{}", self.0)
    }
}
