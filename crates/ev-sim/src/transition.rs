//! The two-pass generation transition.
//!
//! # Passes
//!
//! ```text
//! ① Intent  row-major over occupants of the current grid:
//!               choose an exit, filter the cached neighbor list down to
//!               passable, unreserved cells strictly closer to that exit,
//!               then reserve the closest (first wins on ties) or stay.
//! ② Commit  write stayers, then apply reservations in reservation order:
//!               Empty target → Person in the next grid
//!               Exit target  → one escape logged at that exit
//! ```
//!
//! Pass ① only reads the current grid and writes into an [`IntentPlan`];
//! pass ② is the only place the next grid and the escape log change.  The
//! plan is returned by value so tests can inspect every reservation.

use ev_core::{CellState, Generation, Pos, SimRng};
use ev_field::{ExitSet, FloorField, choose_exit};
use ev_grid::{Grid, NeighborhoodIndex};

use crate::stats::EscapeLog;
use crate::{SimError, SimResult};

// ── Reservations ──────────────────────────────────────────────────────────────

/// The per-generation target map: which cells have already been claimed as a
/// destination.
///
/// Backed by a dense claim mask over the grid plus the claim order, so
/// lookups are O(1) and iteration is deterministic.
#[derive(Clone, Debug)]
pub struct Reservations {
    width:   u32,
    claimed: Vec<bool>,
    order:   Vec<Pos>,
}

impl Reservations {
    pub fn new(height: u32, width: u32) -> Self {
        Self {
            width,
            claimed: vec![false; height as usize * width as usize],
            order:   Vec::new(),
        }
    }

    #[inline]
    fn slot(&self, pos: Pos) -> usize {
        pos.row as usize * self.width as usize + pos.col as usize
    }

    #[inline]
    pub fn is_reserved(&self, pos: Pos) -> bool {
        self.claimed[self.slot(pos)]
    }

    /// Claim `pos`.  Claiming a cell twice in one generation is a logic
    /// defect and fails.
    pub fn reserve(&mut self, pos: Pos) -> SimResult<()> {
        let slot = self.slot(pos);
        if self.claimed[slot] {
            return Err(SimError::Invariant(format!("cell {pos} reserved twice")));
        }
        self.claimed[slot] = true;
        self.order.push(pos);
        Ok(())
    }

    /// Claimed cells in claim order.
    #[inline]
    pub fn order(&self) -> &[Pos] {
        &self.order
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

// ── IntentPlan ────────────────────────────────────────────────────────────────

/// One occupant's reserved step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Move {
    pub from: Pos,
    pub to:   Pos,
    /// The exit the occupant was heading for when it reserved `to`.
    pub exit: Pos,
}

/// Result of the intent pass.
#[derive(Clone, Debug)]
pub struct IntentPlan {
    /// Reserved steps in reservation order.
    pub moves:        Vec<Move>,
    /// Occupants with no eligible neighbor, row-major.
    pub stays:        Vec<Pos>,
    pub reservations: Reservations,
}

impl IntentPlan {
    /// Occupants covered by the plan.
    #[inline]
    pub fn occupants(&self) -> usize {
        self.moves.len() + self.stays.len()
    }
}

/// Read-only inputs of the intent pass.
pub struct TransitionContext<'a> {
    pub grid:      &'a Grid,
    pub neighbors: &'a NeighborhoodIndex,
    pub exits:     &'a ExitSet,
    pub field:     &'a FloorField,
}

/// Pass ①.  Exit crowd counts must already reflect `ctx.grid`.
pub fn plan_intents(ctx: &TransitionContext<'_>, rng: &mut SimRng) -> SimResult<IntentPlan> {
    let grid = ctx.grid;
    let mut reservations = Reservations::new(grid.height(), grid.width());
    let mut moves = Vec::new();
    let mut stays = Vec::new();

    for from in grid.positions_of(CellState::Person) {
        let exit = choose_exit(ctx.exits, ctx.field, from, rng)?;
        let here = from.chebyshev(exit);

        let mut best: Option<(u32, Pos)> = None;
        for &candidate in ctx.neighbors.neighbors_of(from)? {
            if !grid.get(candidate).is_passable() || reservations.is_reserved(candidate) {
                continue;
            }
            let dist = candidate.chebyshev(exit);
            if dist >= here {
                continue;
            }
            // Strict comparison: the first candidate in cached order wins ties.
            if best.is_none_or(|(d, _)| dist < d) {
                best = Some((dist, candidate));
            }
        }

        match best {
            None => stays.push(from),
            Some((_, to)) => {
                reservations.reserve(to)?;
                moves.push(Move { from, to, exit });
            }
        }
    }

    Ok(IntentPlan { moves, stays, reservations })
}

// ── Commit ────────────────────────────────────────────────────────────────────

/// Activity of one committed generation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TransitionCounts {
    pub moved:   u64,
    pub escaped: u64,
    pub stayed:  u64,
}

/// A fresh next grid: all `Empty`, with every exit stamped.
pub fn target_grid(current: &Grid, exits: &ExitSet) -> SimResult<Grid> {
    let mut next = Grid::filled(current.height(), current.width(), CellState::Empty)?;
    exits.stamp(&mut next);
    Ok(next)
}

/// Pass ②.  Escapes are logged against `generation`, the generation being
/// resolved (not the one being produced).
pub fn commit(
    current:    &Grid,
    plan:       &IntentPlan,
    next:       &mut Grid,
    exits:      &ExitSet,
    generation: Generation,
    log:        &mut EscapeLog,
) -> SimResult<TransitionCounts> {
    let mut counts = TransitionCounts::default();

    for &pos in &plan.stays {
        next.set(pos, CellState::Person);
        counts.stayed += 1;
    }

    for mv in &plan.moves {
        match current.get(mv.to) {
            CellState::Empty => {
                if next.get(mv.to) == CellState::Person {
                    return Err(SimError::Invariant(format!(
                        "move {} -> {} lands on an occupied cell",
                        mv.from, mv.to
                    )));
                }
                next.set(mv.to, CellState::Person);
                counts.moved += 1;
            }
            CellState::Exit => {
                let exit = exits.index_of(mv.to).ok_or_else(|| {
                    SimError::Invariant(format!("exit cell {} is not a known exit", mv.to))
                })?;
                log.record(exit, generation);
                counts.escaped += 1;
            }
            CellState::Person => {
                return Err(SimError::Invariant(format!(
                    "move {} -> {} targets an occupant",
                    mv.from, mv.to
                )));
            }
        }
    }

    Ok(counts)
}
