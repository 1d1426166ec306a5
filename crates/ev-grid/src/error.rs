//! Grid error type.

use thiserror::Error;

use ev_core::Pos;

/// Errors produced by `ev-grid`.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {height}x{width}")]
    ZeroDimension { height: u32, width: u32 },

    #[error("{pos} is outside the {height}x{width} grid")]
    OutOfBounds { pos: Pos, height: u32, width: u32 },

    #[error("neighborhood radius must be positive")]
    ZeroRadius,

    #[error("expected {expected} cells, got {got}")]
    CellCountMismatch { expected: usize, got: usize },
}

pub type GridResult<T> = Result<T, GridError>;
