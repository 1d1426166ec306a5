//! Fixed-size cell grid.
//!
//! # Data layout
//!
//! Cells are stored row-major in one `Vec<CellState>`:
//!
//! ```text
//! index(pos) = pos.row * width + pos.col
//! ```
//!
//! Iteration with [`Grid::positions`] visits cells in the same order, which is
//! the order every transition pass uses.  Dimensions never change after
//! construction; the automaton replaces whole grids rather than resizing.

use ev_core::{CellState, Pos};

use crate::{GridError, GridResult};

// ── StateCounts ───────────────────────────────────────────────────────────────

/// Number of cells in each state.  Indexed by [`CellState::index`].
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateCounts(pub [u64; CellState::COUNT]);

impl StateCounts {
    #[inline]
    pub fn get(&self, state: CellState) -> u64 {
        self.0[state.index()]
    }

    #[inline]
    pub fn add(&mut self, state: CellState) {
        self.0[state.index()] += 1;
    }

    /// Sum over all states; equals the grid's cell count.
    #[inline]
    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    #[inline]
    pub fn people(&self) -> u64 {
        self.get(CellState::Person)
    }
}

// ── Grid ──────────────────────────────────────────────────────────────────────

/// A `height × width` array of cell states.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    height: u32,
    width:  u32,
    cells:  Vec<CellState>,
}

impl Grid {
    /// A grid with every cell set to `state`.
    pub fn filled(height: u32, width: u32, state: CellState) -> GridResult<Self> {
        if height == 0 || width == 0 {
            return Err(GridError::ZeroDimension { height, width });
        }
        Ok(Self {
            height,
            width,
            cells: vec![state; height as usize * width as usize],
        })
    }

    /// Wrap an existing row-major cell vector.
    pub fn from_cells(height: u32, width: u32, cells: Vec<CellState>) -> GridResult<Self> {
        if height == 0 || width == 0 {
            return Err(GridError::ZeroDimension { height, width });
        }
        let expected = height as usize * width as usize;
        if cells.len() != expected {
            return Err(GridError::CellCountMismatch { expected, got: cells.len() });
        }
        Ok(Self { height, width, cells })
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    /// Reject a position that is off the grid.
    pub fn check(&self, pos: Pos) -> GridResult<()> {
        if self.contains(pos) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds { pos, height: self.height, width: self.width })
        }
    }

    // ── Indexing ──────────────────────────────────────────────────────────

    /// Row-major index of `pos`.  The caller guarantees `pos` is in bounds.
    #[inline]
    pub fn index_of(&self, pos: Pos) -> usize {
        pos.row as usize * self.width as usize + pos.col as usize
    }

    /// Inverse of [`index_of`](Self::index_of).
    #[inline]
    pub fn pos_of(&self, index: usize) -> Pos {
        let w = self.width as usize;
        Pos::new((index / w) as u32, (index % w) as u32)
    }

    #[inline]
    pub fn get(&self, pos: Pos) -> CellState {
        self.cells[self.index_of(pos)]
    }

    #[inline]
    pub fn set(&mut self, pos: Pos, state: CellState) {
        let i = self.index_of(pos);
        self.cells[i] = state;
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.height).flat_map(move |row| (0..self.width).map(move |col| Pos::new(row, col)))
    }

    /// Positions currently holding `state`, row-major.
    pub fn positions_of(&self, state: CellState) -> impl Iterator<Item = Pos> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |&(_, &s)| s == state)
            .map(|(i, _)| self.pos_of(i))
    }

    // ── Aggregates ────────────────────────────────────────────────────────

    pub fn count(&self, state: CellState) -> u64 {
        self.cells.iter().filter(|&&s| s == state).count() as u64
    }

    /// One pass over the grid counting every state.
    pub fn state_counts(&self) -> StateCounts {
        let mut counts = StateCounts::default();
        for &s in &self.cells {
            counts.add(s);
        }
        counts
    }
}

impl std::fmt::Display for Grid {
    /// One line per row: `.` empty, `P` person, `E` exit.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.chunks(self.width as usize) {
            for &s in row {
                let c = match s {
                    CellState::Empty  => '.',
                    CellState::Person => 'P',
                    CellState::Exit   => 'E',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
