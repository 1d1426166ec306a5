//! Radius queries over a bounded grid.
//!
//! The scan range is clipped to the grid before enumeration, so
//! out-of-bounds coordinates are never generated (there is no wraparound and
//! no post-filtering step).  Results are in row-major order; callers that need
//! a de-biased order shuffle a copy (see [`crate::NeighborhoodIndex`]).

use ev_core::{Metric, Pos};

/// All in-bounds coordinates within `radius` of `center`, row-major.
///
/// `center` itself is included.  Under [`Metric::Chebyshev`] this is the
/// clipped `(2r+1)²` square; under [`Metric::Euclidean`] the clipped disc.
pub fn cells_in_radius(
    height: u32,
    width:  u32,
    center: Pos,
    radius: u32,
    metric: Metric,
) -> Vec<Pos> {
    if height == 0 || width == 0 {
        return Vec::new();
    }
    let row_lo = center.row.saturating_sub(radius);
    let row_hi = center.row.saturating_add(radius).min(height - 1);
    let col_lo = center.col.saturating_sub(radius);
    let col_hi = center.col.saturating_add(radius).min(width - 1);

    let side = (radius as usize).saturating_mul(2).saturating_add(1);
    let mut out = Vec::with_capacity(side.saturating_mul(side).min(height as usize * width as usize));
    for row in row_lo..=row_hi {
        for col in col_lo..=col_hi {
            let p = Pos::new(row, col);
            if metric == Metric::Chebyshev || metric.within(center, p, radius) {
                out.push(p);
            }
        }
    }
    out
}
