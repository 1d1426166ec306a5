//! Stochastic primitives shared by exit selection, tie-breaking and seeding.
//!
//! Weighted choice uses cumulative-probability sampling: candidates are
//! scanned in their given order, accumulating probability mass, and the first
//! candidate whose cumulative mass reaches the uniform draw wins.  For a fixed
//! draw and a fixed candidate order the result is fully determined.

use crate::{CellState, EvError, EvResult, SimRng};

/// Normalise non-negative weights into probabilities that sum to 1.
///
/// A sum that is zero, negative or non-finite is a logic defect in the caller
/// and is reported as [`EvError::Invariant`].
pub fn weights_to_probabilities(weights: &[f64]) -> EvResult<Vec<f64>> {
    let total: f64 = weights.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        return Err(EvError::Invariant(format!(
            "cannot normalise weights with sum {total}"
        )));
    }
    Ok(weights.iter().map(|w| w / total).collect())
}

/// Index of the first entry whose cumulative probability is `>= u`.
///
/// Returns `None` when the scan is exhausted, which happens only if the
/// probabilities sum to less than `u`.
pub fn pick_cumulative(probabilities: &[f64], u: f64) -> Option<usize> {
    let mut cumulative = 0.0;
    for (i, p) in probabilities.iter().enumerate() {
        cumulative += p;
        if cumulative >= u {
            return Some(i);
        }
    }
    None
}

/// Draw one item with the given per-item probabilities.
pub fn weighted_choice<'a, T>(
    items:         &'a [T],
    probabilities: &[f64],
    rng:           &mut SimRng,
) -> EvResult<&'a T> {
    if items.len() != probabilities.len() {
        return Err(EvError::Invariant(format!(
            "{} items but {} probabilities",
            items.len(),
            probabilities.len()
        )));
    }
    let u = rng.unit();
    // Floating-point rounding can leave the total a hair under 1.0; a draw
    // that lands in that gap belongs to the last candidate with mass.
    let index = pick_cumulative(probabilities, u).or_else(|| {
        let sum: f64 = probabilities.iter().sum();
        if (1.0 - sum).abs() <= 1e-9 {
            probabilities.iter().rposition(|&p| p > 0.0)
        } else {
            None
        }
    });
    match index {
        Some(i) => Ok(&items[i]),
        None => Err(EvError::Invariant(format!(
            "weighted choice exhausted {} candidates without a selection (u = {u})",
            items.len()
        ))),
    }
}

/// Pick one item uniformly.  `None` for an empty slice.
#[inline]
pub fn uniform_choice<'a, T>(items: &'a [T], rng: &mut SimRng) -> Option<&'a T> {
    rng.choose(items)
}

/// Parameters for [`random_seed`].
#[derive(Copy, Clone, Debug)]
pub struct SeedPattern {
    pub min_state:          CellState,
    pub max_state:          CellState,
    /// Seed only where `row % interval == 0 && col % interval == 0`.
    pub interval:           u32,
    pub fill_state:         CellState,
    /// When `false`, cells past half the height or half the width get
    /// `fill_state` regardless of the interval.
    pub evenly_distributed: bool,
}

/// Generate a row-major `height × width` seed grid.
///
/// Every cell on the interval lattice gets a state drawn uniformly from
/// `[min_state, max_state]`; all others get `fill_state`.  With
/// `evenly_distributed == false` the lattice is additionally clipped to the
/// upper-left quadrant.
pub fn random_seed(
    height:  u32,
    width:   u32,
    pattern: SeedPattern,
    rng:     &mut SimRng,
) -> EvResult<Vec<CellState>> {
    if pattern.interval == 0 {
        return Err(EvError::Config("seed interval must be positive".into()));
    }
    if pattern.min_state > pattern.max_state {
        return Err(EvError::Config(format!(
            "seed state range is empty: {} > {}",
            pattern.min_state, pattern.max_state
        )));
    }
    let lo = pattern.min_state.index();
    let hi = pattern.max_state.index();

    let mut cells = Vec::with_capacity(height as usize * width as usize);
    for row in 0..height {
        for col in 0..width {
            let on_lattice = row % pattern.interval == 0 && col % pattern.interval == 0;
            let clipped = !pattern.evenly_distributed
                && (2 * row as u64 > height as u64 || 2 * col as u64 > width as u64);
            let state = if on_lattice && !clipped {
                let i = rng.gen_range(lo..=hi);
                CellState::from_index(i).unwrap_or(pattern.fill_state)
            } else {
                pattern.fill_state
            };
            cells.push(state);
        }
    }
    Ok(cells)
}
