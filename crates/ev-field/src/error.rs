//! Exit-model error type.

use thiserror::Error;

use ev_core::{EvError, Pos};
use ev_grid::GridError;

/// Errors produced by `ev-field`.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("at least one exit is required")]
    NoExits,

    #[error("exit {0} listed more than once")]
    DuplicateExit(Pos),

    #[error("{0} is not an exit")]
    UnknownExit(Pos),

    #[error("{name} must be finite and non-negative, got {value}")]
    BadModifier { name: &'static str, value: f64 },

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Core(#[from] EvError),
}

pub type FieldResult<T> = Result<T, FieldError>;
