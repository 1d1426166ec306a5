//! `ev-field`: the floor-field exit model.
//!
//! Each occupant picks a target exit every generation by sampling from a
//! probability distribution proportional to each exit's *safety*:
//!
//! ```text
//! safety(exit, from) = 1 / (chebyshev(exit, from)^d + crowd(exit)^c)
//! ```
//!
//! where `d` and `c` are the distance and crowd modifiers and `crowd(exit)` is
//! the number of occupants inside the exit's capture area at the start of the
//! generation.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`exits`]    | `ExitSet`: ordered exits, capture areas, crowd counts     |
//! | [`safety`]   | `FloorField`: modifiers and the safety utility            |
//! | [`choice`]   | `choose_exit`, `exit_probabilities`                       |
//! | [`error`]    | `FieldError`, `FieldResult<T>`                            |
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                   |
//! |-----------|----------------------------------------------------------|
//! | `fx-hash` | FxHash instead of SipHash for exit-coordinate lookups.   |

pub mod choice;
pub mod error;
pub mod exits;
pub mod safety;

#[cfg(test)]
mod tests;

pub use choice::{choose_exit, exit_probabilities};
pub use error::{FieldError, FieldResult};
pub use exits::ExitSet;
pub use safety::FloorField;
