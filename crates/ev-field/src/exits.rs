//! The ordered exit set and its per-exit crowd measure.
//!
//! Capture areas are computed once at construction (grid dimensions and the
//! exit radius never change).  Crowd counts are recomputed from the current
//! grid at the start of every generation by [`ExitSet::refresh_crowd`].

use ev_core::{CellState, Metric, Pos};
use ev_grid::{Grid, GridError, cells_in_radius};

use crate::{FieldError, FieldResult};

#[cfg(feature = "fx-hash")]
type ExitIndexMap = rustc_hash::FxHashMap<Pos, usize>;
#[cfg(not(feature = "fx-hash"))]
type ExitIndexMap = std::collections::HashMap<Pos, usize>;

/// Exits in construction order, with cached capture areas.
///
/// The construction order is the sampling order used by exit choice and
/// is never changed.
pub struct ExitSet {
    positions: Vec<Pos>,
    index:     ExitIndexMap,
    /// Coordinates inside each exit's capture radius, row-major.
    areas:     Vec<Vec<Pos>>,
    /// Occupants inside each capture area as of the last refresh.
    crowd:     Vec<u32>,
}

impl ExitSet {
    /// Validate `exits` against the grid dimensions and cache their areas.
    pub fn new(
        height:      u32,
        width:       u32,
        exits:       &[Pos],
        exit_radius: u32,
        metric:      Metric,
    ) -> FieldResult<Self> {
        if height == 0 || width == 0 {
            return Err(GridError::ZeroDimension { height, width }.into());
        }
        if exits.is_empty() {
            return Err(FieldError::NoExits);
        }

        let mut index = ExitIndexMap::default();
        let mut areas = Vec::with_capacity(exits.len());
        for (i, &pos) in exits.iter().enumerate() {
            if pos.row >= height || pos.col >= width {
                return Err(GridError::OutOfBounds { pos, height, width }.into());
            }
            if index.insert(pos, i).is_some() {
                return Err(FieldError::DuplicateExit(pos));
            }
            areas.push(cells_in_radius(height, width, pos, exit_radius, metric));
        }

        Ok(Self {
            positions: exits.to_vec(),
            index,
            areas,
            crowd: vec![0; exits.len()],
        })
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Exit coordinates in construction order.
    #[inline]
    pub fn positions(&self) -> &[Pos] {
        &self.positions
    }

    /// Construction-order index of the exit at `pos`, if `pos` is an exit.
    #[inline]
    pub fn index_of(&self, pos: Pos) -> Option<usize> {
        self.index.get(&pos).copied()
    }

    #[inline]
    pub fn is_exit(&self, pos: Pos) -> bool {
        self.index.contains_key(&pos)
    }

    /// Capture area of exit `exit`.
    #[inline]
    pub fn area(&self, exit: usize) -> &[Pos] {
        &self.areas[exit]
    }

    // ── Crowd ─────────────────────────────────────────────────────────────

    /// Recount the occupants in every capture area from `grid`.
    pub fn refresh_crowd(&mut self, grid: &Grid) {
        for (crowd, area) in self.crowd.iter_mut().zip(&self.areas) {
            *crowd = area
                .iter()
                .filter(|&&p| grid.get(p) == CellState::Person)
                .count() as u32;
        }
    }

    /// Crowd count of exit `exit` as of the last refresh.
    #[inline]
    pub fn crowd(&self, exit: usize) -> u32 {
        self.crowd[exit]
    }

    /// Crowd count of the exit at `pos`.
    pub fn crowd_at(&self, pos: Pos) -> FieldResult<u32> {
        self.index_of(pos)
            .map(|i| self.crowd[i])
            .ok_or(FieldError::UnknownExit(pos))
    }

    // ── Grid helpers ──────────────────────────────────────────────────────

    /// Write `Exit` at every exit coordinate of `grid`.
    pub fn stamp(&self, grid: &mut Grid) {
        for &pos in &self.positions {
            grid.set(pos, CellState::Exit);
        }
    }
}
