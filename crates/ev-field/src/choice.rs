//! Stochastic exit choice.

use ev_core::stochastic::{weighted_choice, weights_to_probabilities};
use ev_core::{Pos, SimRng};

use crate::{ExitSet, FieldResult, FloorField};

/// Probability of choosing each exit (construction order) from `from`.
///
/// Uses the crowd counts of the last [`ExitSet::refresh_crowd`].
pub fn exit_probabilities(
    exits: &ExitSet,
    field: &FloorField,
    from:  Pos,
) -> FieldResult<Vec<f64>> {
    let weights: Vec<f64> = exits
        .positions()
        .iter()
        .enumerate()
        .map(|(i, &exit)| field.safety(exit, from, exits.crowd(i)))
        .collect();
    Ok(weights_to_probabilities(&weights)?)
}

/// Draw a target exit for an occupant standing at `from`.
///
/// Exits are scanned in construction order; the first whose cumulative
/// probability reaches a uniform draw is returned.
pub fn choose_exit(
    exits: &ExitSet,
    field: &FloorField,
    from:  Pos,
    rng:   &mut SimRng,
) -> FieldResult<Pos> {
    let probabilities = exit_probabilities(exits, field, from)?;
    Ok(*weighted_choice(exits.positions(), &probabilities, rng)?)
}
