//! Run observer trait for progress reporting and data collection.

use ev_core::Generation;
use ev_grid::{Grid, StateCounts};

use crate::stats::EscapeLog;
use crate::{RunOutcome, StepReport};

/// Callbacks invoked by [`EscapeAutomaton::run`][crate::EscapeAutomaton::run]
/// around every generation.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl EvacObserver for ProgressPrinter {
///     fn on_generation_end(&mut self, report: &StepReport, counts: &StateCounts) {
///         println!("{}: {} left, {} escaped", report.generation, counts.people(), report.escaped);
///     }
/// }
/// ```
pub trait EvacObserver {
    /// Called before generation `generation` is resolved.
    fn on_generation_start(&mut self, _generation: Generation) {}

    /// Called after a generation is produced, with the new grid's counts.
    fn on_generation_end(&mut self, _report: &StepReport, _counts: &StateCounts) {}

    /// Called for generation 0 and then every `config.snapshot_interval`
    /// generations, with read-only access to the grid.
    fn on_snapshot(&mut self, _generation: Generation, _grid: &Grid) {}

    /// Called once when `run` stops, terminal or capped.
    fn on_run_end(&mut self, _outcome: &RunOutcome, _escapes: &EscapeLog) {}
}

/// An [`EvacObserver`] that does nothing.
pub struct NoopObserver;

impl EvacObserver for NoopObserver {}
