//! `ev-grid`: the cell grid and its radius-based spatial queries.
//!
//! # Crate layout
//!
//! | Module            | Contents                                                  |
//! |-------------------|-----------------------------------------------------------|
//! | [`grid`]          | `Grid` (row-major `CellState` array), `StateCounts`       |
//! | [`region`]        | `cells_in_radius`: bounded, row-major radius scan         |
//! | [`neighborhood`]  | `NeighborhoodIndex`: shuffled-once CSR neighbor table     |
//! | [`error`]         | `GridError`, `GridResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod grid;
pub mod neighborhood;
pub mod region;

#[cfg(test)]
mod tests;

pub use error::{GridError, GridResult};
pub use grid::{Grid, StateCounts};
pub use neighborhood::NeighborhoodIndex;
pub use region::cells_in_radius;
