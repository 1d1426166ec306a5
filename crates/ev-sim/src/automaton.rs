//! The `EscapeAutomaton` struct and its run loop.

use ev_core::{CellState, EvacConfig, Generation, Pos, SimRng};
use ev_field::{ExitSet, FloorField};
use ev_grid::{Grid, NeighborhoodIndex};
use tracing::{debug, error, info, warn};

use crate::stats::{EscapeLog, StateHistory};
use crate::transition::{TransitionContext, commit, plan_intents, target_grid};
use crate::{EvacObserver, SimError, SimResult};

// ── Reports ───────────────────────────────────────────────────────────────────

/// Activity of one call to [`EscapeAutomaton::step`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepReport {
    /// The generation that was produced.  For an idle step on a terminal
    /// automaton this is the unchanged current generation.
    pub generation: Generation,
    pub moved:      u64,
    pub escaped:    u64,
    pub stayed:     u64,
}

impl StepReport {
    fn idle(generation: Generation) -> Self {
        Self { generation, moved: 0, escaped: 0, stayed: 0 }
    }

    /// `true` if nothing happened (terminal automaton).
    pub fn is_idle(&self) -> bool {
        self.moved == 0 && self.escaped == 0 && self.stayed == 0
    }
}

/// How a call to [`EscapeAutomaton::run`] ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunOutcome {
    /// Generation count when the run stopped.
    pub generations: Generation,
    /// `false` if the run stopped at `max_generations` with occupants left.
    pub terminal:    bool,
    /// Total escapes since the seed generation.
    pub escaped:     u64,
}

// ── EscapeAutomaton ───────────────────────────────────────────────────────────

/// A floor-field evacuation cellular automaton.
///
/// Each generation every occupant picks an exit by safety, then steps to the
/// closest free neighbor that brings it strictly closer to that exit.
/// Occupants stepping onto an exit escape and leave the grid.  The automaton
/// is terminal once no occupants remain.
///
/// An invariant violation during [`step`](Self::step) poisons the automaton:
/// the error is returned once and every later step returns
/// [`SimError::Poisoned`].
///
/// Create via [`AutomatonBuilder`][crate::AutomatonBuilder].
pub struct EscapeAutomaton {
    pub(crate) config:     EvacConfig,
    pub(crate) grid:       Grid,
    pub(crate) neighbors:  NeighborhoodIndex,
    pub(crate) exits:      ExitSet,
    pub(crate) field:      FloorField,
    pub(crate) rng:        SimRng,
    pub(crate) generation: Generation,
    pub(crate) history:    StateHistory,
    pub(crate) escapes:    EscapeLog,
    pub(crate) poisoned:   bool,
}

impl EscapeAutomaton {
    // ── Run loop ──────────────────────────────────────────────────────────

    /// Step until terminal or until `config.max_generations` is reached.
    ///
    /// Calls observer hooks around every generation.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: EvacObserver>(&mut self, observer: &mut O) -> SimResult<RunOutcome> {
        let cap = self.config.max_generations;
        self.run_until(observer, |g| cap.is_some_and(|max| g.0 >= max))
    }

    /// Run at most `n` more generations, stopping early if terminal.
    pub fn run_generations<O: EvacObserver>(
        &mut self,
        n:        u64,
        observer: &mut O,
    ) -> SimResult<RunOutcome> {
        let stop = self.generation + n;
        self.run_until(observer, |g| g >= stop)
    }

    fn run_until<O, F>(&mut self, observer: &mut O, capped: F) -> SimResult<RunOutcome>
    where
        O: EvacObserver,
        F: Fn(Generation) -> bool,
    {
        if self.poisoned {
            return Err(SimError::Poisoned);
        }
        if self.generation == Generation::SEED && self.config.snapshot_interval > 0 {
            observer.on_snapshot(self.generation, &self.grid);
        }

        while !self.is_terminal() && !capped(self.generation) {
            observer.on_generation_start(self.generation);
            let report = self.step()?;
            let (_, counts) = self.history.latest();
            observer.on_generation_end(&report, counts);

            let every = self.config.snapshot_interval;
            if every > 0 && report.generation.0.is_multiple_of(every) {
                observer.on_snapshot(report.generation, &self.grid);
            }
        }

        let outcome = RunOutcome {
            generations: self.generation,
            terminal:    self.is_terminal(),
            escaped:     self.escapes.total(),
        };
        if !outcome.terminal {
            info!(
                generation = %outcome.generations,
                remaining = self.history.current_people(),
                "run stopped at generation cap"
            );
        }
        observer.on_run_end(&outcome, &self.escapes);
        Ok(outcome)
    }

    /// Resolve one generation.
    ///
    /// On a terminal automaton this is a no-op returning an idle report for
    /// the current generation.
    pub fn step(&mut self) -> SimResult<StepReport> {
        if self.poisoned {
            return Err(SimError::Poisoned);
        }
        if self.is_terminal() {
            warn!(generation = %self.generation, "step called on a terminal automaton");
            return Ok(StepReport::idle(self.generation));
        }

        match self.advance() {
            Ok(report) => Ok(report),
            Err(e) => {
                error!(generation = %self.generation, error = %e, "transition failed; automaton poisoned");
                self.poisoned = true;
                Err(e)
            }
        }
    }

    fn advance(&mut self) -> SimResult<StepReport> {
        let resolving = self.generation;
        let before = self.history.current_people();

        // ── Crowd refresh ─────────────────────────────────────────────────
        self.exits.refresh_crowd(&self.grid);

        // ── Intent pass ───────────────────────────────────────────────────
        let ctx = TransitionContext {
            grid:      &self.grid,
            neighbors: &self.neighbors,
            exits:     &self.exits,
            field:     &self.field,
        };
        let plan = plan_intents(&ctx, &mut self.rng)?;

        // ── Commit pass ───────────────────────────────────────────────────
        let mut next = target_grid(&self.grid, &self.exits)?;
        let counts = commit(&self.grid, &plan, &mut next, &self.exits, resolving, &mut self.escapes)?;

        // ── Conservation ──────────────────────────────────────────────────
        let next_counts = next.state_counts();
        if next_counts.people() + counts.escaped != before {
            return Err(SimError::Invariant(format!(
                "occupant vanished: {before} before, {} after with {} escapes",
                next_counts.people(),
                counts.escaped
            )));
        }
        if next_counts.get(CellState::Exit) != self.exits.len() as u64 {
            return Err(SimError::Invariant(format!(
                "exit count changed: expected {}, found {}",
                self.exits.len(),
                next_counts.get(CellState::Exit)
            )));
        }

        // ── Swap ──────────────────────────────────────────────────────────
        self.grid = next;
        self.generation = resolving.next();
        self.history.record(self.generation, next_counts);

        debug!(
            generation = %self.generation,
            moved = counts.moved,
            escaped = counts.escaped,
            stayed = counts.stayed,
            remaining = next_counts.people(),
            "generation resolved"
        );
        if next_counts.people() == 0 {
            info!(
                generation = %self.generation,
                escaped = self.escapes.total(),
                "evacuation complete"
            );
        }

        Ok(StepReport {
            generation: self.generation,
            moved:      counts.moved,
            escaped:    counts.escaped,
            stayed:     counts.stayed,
        })
    }

    // ── Read access ───────────────────────────────────────────────────────

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    /// Number of distinct cell states (`Empty`, `Person`, `Exit`).
    #[inline]
    pub fn number_of_states(&self) -> usize {
        CellState::COUNT
    }

    /// Generations resolved so far.  0 for a fresh automaton.
    #[inline]
    pub fn generation_count(&self) -> Generation {
        self.generation
    }

    /// `true` once no occupants remain.  Absorbing.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.history.current_people() == 0
    }

    /// `true` after an invariant violation.
    #[inline]
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    #[inline]
    pub fn state_histogram(&self) -> &StateHistory {
        &self.history
    }

    #[inline]
    pub fn escape_log(&self) -> &EscapeLog {
        &self.escapes
    }

    /// Occupant count of the seed grid.
    #[inline]
    pub fn people_count_at_seed(&self) -> u64 {
        self.history.seed().people()
    }

    #[inline]
    pub fn exits(&self) -> &ExitSet {
        &self.exits
    }

    /// Crowd count of the exit at `exit` as of the last refresh.
    pub fn crowd_at(&self, exit: Pos) -> SimResult<u32> {
        Ok(self.exits.crowd_at(exit)?)
    }

    /// The cached neighbor list of `pos`.  Identical on every call.
    pub fn neighbors_of(&self, pos: Pos) -> SimResult<&[Pos]> {
        Ok(self.neighbors.neighbors_of(pos)?)
    }

    #[inline]
    pub fn config(&self) -> &EvacConfig {
        &self.config
    }
}
