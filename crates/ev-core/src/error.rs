//! Base error type.
//!
//! Sub-crates define their own error enums and wrap `EvError` as one variant
//! via `#[from]`, so configuration and invariant failures raised here surface
//! unchanged at the automaton boundary.

use thiserror::Error;

/// The top-level error type for `ev-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum EvError {
    /// Invalid construction parameters.  Fatal; never retried.
    #[error("configuration error: {0}")]
    Config(String),

    /// A logic defect was detected (e.g. a weighted draw selected nothing).
    /// The current run must be abandoned.
    #[error("invariant violation: {0}")]
    Invariant(String),
}

/// Shorthand result type for all `ev-*` crates.
pub type EvResult<T> = Result<T, EvError>;
