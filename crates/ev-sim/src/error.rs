use ev_core::EvError;
use ev_field::FieldError;
use ev_grid::GridError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// Invalid construction parameters.  Surfaced from `build()`.
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    #[error("exit model error: {0}")]
    Field(FieldError),

    /// A logic defect inside a transition.  The automaton that raised it is
    /// poisoned and refuses further steps.
    #[error("invariant violation: {0}")]
    Invariant(String),

    #[error("automaton was halted by an earlier invariant violation")]
    Poisoned,
}

impl From<EvError> for SimError {
    fn from(e: EvError) -> Self {
        match e {
            EvError::Config(msg)    => SimError::Config(msg),
            EvError::Invariant(msg) => SimError::Invariant(msg),
        }
    }
}

impl From<FieldError> for SimError {
    fn from(e: FieldError) -> Self {
        match e {
            FieldError::Core(inner) => inner.into(),
            FieldError::Grid(inner) => SimError::Grid(inner),
            other                   => SimError::Field(other),
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;
