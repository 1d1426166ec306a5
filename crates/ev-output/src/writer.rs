//! The `OutputWriter` trait implemented by backend writers.

use crate::{EscapeRow, GenerationSummaryRow, OccupantSnapshotRow, OutputResult};

/// Trait implemented by output backends.
///
/// All methods are infallible from the observer's perspective: errors are
/// stored internally and retrieved with
/// [`EvacOutputObserver::take_error`][crate::EvacOutputObserver::take_error].
pub trait OutputWriter {
    /// Write the occupied cells of one snapshot.
    fn write_snapshots(&mut self, rows: &[OccupantSnapshotRow]) -> OutputResult<()>;

    /// Write one generation summary row.
    fn write_generation_summary(&mut self, row: &GenerationSummaryRow) -> OutputResult<()>;

    /// Write the escape log.  Called once, at the end of a run.
    fn write_escapes(&mut self, rows: &[EscapeRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
