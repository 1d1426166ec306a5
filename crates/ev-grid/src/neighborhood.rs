//! Precomputed, shuffled neighbor table.
//!
//! # Data layout
//!
//! Compressed Sparse Row: the neighbors of the cell with row-major index `i`
//! occupy
//!
//! ```text
//! entries[ offsets[i] .. offsets[i+1] ]
//! ```
//!
//! Each cell's slice is the [`cells_in_radius`] result shuffled exactly once
//! with the automaton's RNG at build time.  The order then stays fixed for the
//! lifetime of the table, so "first candidate wins" tie-breaks in the
//! transition engine carry no directional bias and are still reproducible.
//!
//! Grid dimensions and radius never change after construction, so the whole
//! table is built eagerly; lookups are a bounds check and a slice borrow.

use ev_core::{Metric, Pos, SimRng};

use crate::{GridError, GridResult, cells_in_radius};

/// Neighbor lists for every cell of a `height × width` grid.
pub struct NeighborhoodIndex {
    height:  u32,
    width:   u32,
    /// CSR row pointer.  Length = `height * width + 1`.
    offsets: Vec<usize>,
    entries: Vec<Pos>,
}

impl NeighborhoodIndex {
    /// Build and shuffle the table for every cell.
    ///
    /// Cells are visited in row-major order and each list is shuffled as it
    /// is produced, so the same `rng` state always yields the same table.
    pub fn build(
        height: u32,
        width:  u32,
        radius: u32,
        metric: Metric,
        rng:    &mut SimRng,
    ) -> GridResult<Self> {
        if height == 0 || width == 0 {
            return Err(GridError::ZeroDimension { height, width });
        }
        if radius == 0 {
            return Err(GridError::ZeroRadius);
        }

        let cell_count = height as usize * width as usize;
        let side = (radius as usize).saturating_mul(2).saturating_add(1);
        let mut offsets = Vec::with_capacity(cell_count + 1);
        let mut entries = Vec::with_capacity(cell_count.saturating_mul(side.saturating_mul(side)).min(1 << 24));
        offsets.push(0);

        for row in 0..height {
            for col in 0..width {
                let mut list = cells_in_radius(height, width, Pos::new(row, col), radius, metric);
                rng.shuffle(&mut list);
                entries.extend_from_slice(&list);
                offsets.push(entries.len());
            }
        }
        debug_assert_eq!(offsets.len(), cell_count + 1);

        Ok(Self { height, width, offsets, entries })
    }

    /// The cached neighbor list of `pos` (including `pos` itself).
    pub fn neighbors_of(&self, pos: Pos) -> GridResult<&[Pos]> {
        if pos.row >= self.height || pos.col >= self.width {
            return Err(GridError::OutOfBounds { pos, height: self.height, width: self.width });
        }
        let i = pos.row as usize * self.width as usize + pos.col as usize;
        Ok(&self.entries[self.offsets[i]..self.offsets[i + 1]])
    }

    /// Number of cells covered by the table.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Total number of (cell, neighbor) entries.
    #[inline]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}
