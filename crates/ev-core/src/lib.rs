//! `ev-core`: foundational types for the `rust_evac` evacuation automaton.
//!
//! This crate is a dependency of every other `ev-*` crate.  It has no `ev-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`pos`]         | `Pos`, `Generation`, Chebyshev / Euclidean distance   |
//! | [`cell`]        | `CellState` enum (`Empty`, `Person`, `Exit`)          |
//! | [`config`]      | `EvacConfig`, `Metric`, `HistoryRetention`            |
//! | [`rng`]         | `SimRng` (injected uniform random source)             |
//! | [`stochastic`]  | weighted / uniform choice, random seed grids          |
//! | [`error`]       | `EvError`, `EvResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//! |         | Required to load `EvacConfig` from JSON.                   |

pub mod cell;
pub mod config;
pub mod error;
pub mod pos;
pub mod rng;
pub mod stochastic;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cell::CellState;
pub use config::{EvacConfig, HistoryRetention, Metric};
pub use error::{EvError, EvResult};
pub use pos::{Generation, Pos};
pub use rng::SimRng;
