//! Plain data row types written by output backends.

/// Cell counts and activity of one produced generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationSummaryRow {
    pub generation: u64,
    pub empty:      u64,
    pub person:     u64,
    pub exit:       u64,
    pub moved:      u64,
    pub escaped:    u64,
    pub stayed:     u64,
}

/// Escapes through one exit during one generation.  Only generations with
/// at least one escape produce a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscapeRow {
    pub exit_row:   u32,
    pub exit_col:   u32,
    /// The generation being resolved when the escapes happened.
    pub generation: u64,
    pub escaped:    u64,
}

/// One occupied cell in a grid snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccupantSnapshotRow {
    pub generation: u64,
    pub row:        u32,
    pub col:        u32,
}
