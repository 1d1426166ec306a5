//! Automaton configuration.
//!
//! # Design
//!
//! `EvacConfig` is plain data with `pub` fields.  Applications either build
//! one in code with [`EvacConfig::new`] and override fields, or deserialize
//! it (feature `serde`) from a JSON file where every field except `height`,
//! `width` and `exits` may be omitted.
//!
//! [`EvacConfig::validate`] is the single source of construction-time checks;
//! the automaton builder calls it before allocating anything.

use std::collections::HashSet;

use crate::{EvError, EvResult, Pos};

// ── Metric ────────────────────────────────────────────────────────────────────

/// Distance metric for radius queries (neighborhoods, exit capture areas).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Metric {
    /// Square neighborhood: `max(|Δrow|, |Δcol|) <= r`.
    #[default]
    Chebyshev,
    /// Disc neighborhood: `Δrow² + Δcol² <= r²`.
    Euclidean,
}

impl Metric {
    /// `true` if `b` lies within `radius` of `a` under this metric.
    #[inline]
    pub fn within(self, a: Pos, b: Pos, radius: u32) -> bool {
        match self {
            Metric::Chebyshev => a.chebyshev(b) <= radius,
            Metric::Euclidean => a.euclidean_sq(b) <= (radius as u64) * (radius as u64),
        }
    }
}

// ── HistoryRetention ──────────────────────────────────────────────────────────

/// How much of the per-generation state histogram to keep.
///
/// The seed and latest generations are always available; the policy only
/// governs the entries in between.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HistoryRetention {
    /// Every generation is retained (unbounded growth).
    #[default]
    KeepAll,
    /// Only the most recent `n` generations are retained.
    KeepLast(usize),
    /// No per-generation entries; only seed, latest and running aggregates.
    Streaming,
}

// ── EvacConfig ────────────────────────────────────────────────────────────────

mod defaults {
    pub fn exit_radius() -> u32 { 3 }
    pub fn modifier() -> f64 { 3.0 }
    pub fn people_interval() -> u32 { 3 }
    pub fn evenly_distributed() -> bool { true }
    pub fn neighborhood_radius() -> u32 { 1 }
}

/// Construction parameters for an evacuation automaton.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvacConfig {
    /// Number of grid rows.  Must be > 0.
    pub height: u32,

    /// Number of grid columns.  Must be > 0.
    pub width: u32,

    /// Exit coordinates in a fixed order.  At least one, all in bounds,
    /// no duplicates.  The order is the sampling order of exit choice.
    pub exits: Vec<Pos>,

    /// Capture radius for counting the crowd around each exit.  Default 3.
    #[cfg_attr(feature = "serde", serde(default = "defaults::exit_radius"))]
    pub exit_radius: u32,

    /// Exponent on exit distance in the safety function.  Default 3.
    #[cfg_attr(feature = "serde", serde(default = "defaults::modifier"))]
    pub distance_modifier: f64,

    /// Exponent on exit crowd in the safety function.  Default 3.
    /// Zero makes exit choice purely distance-based.
    #[cfg_attr(feature = "serde", serde(default = "defaults::modifier"))]
    pub crowd_modifier: f64,

    /// Occupants are seeded only on cells whose row and column are both
    /// multiples of this interval.  Smaller = denser.  Default 3.
    #[cfg_attr(feature = "serde", serde(default = "defaults::people_interval"))]
    pub people_interval: u32,

    /// When `false`, seeding is confined to the upper-left quadrant.
    #[cfg_attr(feature = "serde", serde(default = "defaults::evenly_distributed"))]
    pub evenly_distributed: bool,

    /// Radius of the movement neighborhood.  Default 1 (the 8 surrounding
    /// cells plus the cell itself under Chebyshev).
    #[cfg_attr(feature = "serde", serde(default = "defaults::neighborhood_radius"))]
    pub neighborhood_radius: u32,

    #[cfg_attr(feature = "serde", serde(default))]
    pub neighborhood_metric: Metric,

    #[cfg_attr(feature = "serde", serde(default))]
    pub exit_area_metric: Metric,

    /// Master RNG seed.  The same seed always produces identical runs.
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: u64,

    #[cfg_attr(feature = "serde", serde(default))]
    pub history: HistoryRetention,

    /// Upper bound on generations for `run`.  `None` runs until terminal.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_generations: Option<u64>,

    /// Emit an observer snapshot every N generations.  0 disables snapshots.
    #[cfg_attr(feature = "serde", serde(default))]
    pub snapshot_interval: u64,
}

impl EvacConfig {
    /// A configuration with every optional field at its default.
    pub fn new(height: u32, width: u32, exits: Vec<Pos>) -> Self {
        Self {
            height,
            width,
            exits,
            exit_radius:         defaults::exit_radius(),
            distance_modifier:   defaults::modifier(),
            crowd_modifier:      defaults::modifier(),
            people_interval:     defaults::people_interval(),
            evenly_distributed:  defaults::evenly_distributed(),
            neighborhood_radius: defaults::neighborhood_radius(),
            neighborhood_metric: Metric::default(),
            exit_area_metric:    Metric::default(),
            seed:                0,
            history:             HistoryRetention::default(),
            max_generations:     None,
            snapshot_interval:   0,
        }
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.height as usize * self.width as usize
    }

    /// `true` if `pos` lies on the grid.
    #[inline]
    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    /// Check every construction parameter.  Returns the first problem found.
    pub fn validate(&self) -> EvResult<()> {
        if self.height == 0 || self.width == 0 {
            return Err(EvError::Config(format!(
                "grid dimensions must be positive, got {}x{}",
                self.height, self.width
            )));
        }
        if self.exits.is_empty() {
            return Err(EvError::Config("at least one exit is required".into()));
        }
        let mut seen = HashSet::with_capacity(self.exits.len());
        for &exit in &self.exits {
            if !self.in_bounds(exit) {
                return Err(EvError::Config(format!(
                    "exit {exit} is outside the {}x{} grid",
                    self.height, self.width
                )));
            }
            if !seen.insert(exit) {
                return Err(EvError::Config(format!("exit {exit} listed more than once")));
            }
        }
        if self.neighborhood_radius == 0 {
            return Err(EvError::Config("neighborhood radius must be positive".into()));
        }
        if self.exit_radius == 0 {
            return Err(EvError::Config("exit radius must be positive".into()));
        }
        if self.people_interval == 0 {
            return Err(EvError::Config("people interval must be positive".into()));
        }
        for (name, value) in [
            ("distance modifier", self.distance_modifier),
            ("crowd modifier", self.crowd_modifier),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(EvError::Config(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if self.history == HistoryRetention::KeepLast(0) {
            return Err(EvError::Config("history window must keep at least one generation".into()));
        }
        Ok(())
    }
}
