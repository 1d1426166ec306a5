//! `EvacOutputObserver<W>` bridges `EvacObserver` to an `OutputWriter`.

use ev_core::{CellState, Generation};
use ev_grid::{Grid, StateCounts};
use ev_sim::{EscapeLog, EvacObserver, RunOutcome, StepReport};

use crate::row::{EscapeRow, GenerationSummaryRow, OccupantSnapshotRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// An [`EvacObserver`] that writes generation summaries, occupant snapshots
/// and the final escape log to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `EvacObserver`
/// methods have no return value.  After `automaton.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct EvacOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> EvacOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `automaton.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

/// Flatten the sparse escape log into rows, exit by exit in construction
/// order, generations ascending.
pub fn escape_rows(log: &EscapeLog) -> Vec<EscapeRow> {
    log.iter()
        .flat_map(|(exit, per_generation)| {
            per_generation.iter().map(move |(generation, &escaped)| EscapeRow {
                exit_row:   exit.row,
                exit_col:   exit.col,
                generation: generation.0,
                escaped,
            })
        })
        .collect()
}

impl<W: OutputWriter> EvacObserver for EvacOutputObserver<W> {
    fn on_generation_end(&mut self, report: &StepReport, counts: &StateCounts) {
        let row = GenerationSummaryRow {
            generation: report.generation.0,
            empty:      counts.get(CellState::Empty),
            person:     counts.get(CellState::Person),
            exit:       counts.get(CellState::Exit),
            moved:      report.moved,
            escaped:    report.escaped,
            stayed:     report.stayed,
        };
        let result = self.writer.write_generation_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, generation: Generation, grid: &Grid) {
        let rows: Vec<OccupantSnapshotRow> = grid
            .positions_of(CellState::Person)
            .map(|pos| OccupantSnapshotRow {
                generation: generation.0,
                row:        pos.row,
                col:        pos.col,
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_run_end(&mut self, _outcome: &RunOutcome, escapes: &EscapeLog) {
        let rows = escape_rows(escapes);
        let result = self.writer.write_escapes(&rows);
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
