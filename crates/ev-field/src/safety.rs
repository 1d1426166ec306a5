//! The safety utility.

use ev_core::Pos;

use crate::{FieldError, FieldResult};

/// Exponents of the safety function.
///
/// Larger safety means a closer, less crowded exit.  Both modifiers are
/// finite and non-negative; `0^0` evaluates to 1, so a zero crowd modifier
/// turns the crowd term into a constant and exit choice becomes purely
/// distance-based.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FloorField {
    pub distance_modifier: f64,
    pub crowd_modifier:    f64,
}

impl FloorField {
    pub fn new(distance_modifier: f64, crowd_modifier: f64) -> FieldResult<Self> {
        for (name, value) in [
            ("distance modifier", distance_modifier),
            ("crowd modifier", crowd_modifier),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(FieldError::BadModifier { name, value });
            }
        }
        Ok(Self { distance_modifier, crowd_modifier })
    }

    /// `1 / (distance^d + crowd^c)` with Chebyshev distance.
    ///
    /// For any occupant (who never stands on an exit) the distance is at
    /// least 1, so the denominator is at least 1 and the result lies in
    /// `(0, 1]`.
    #[inline]
    pub fn safety(&self, exit: Pos, from: Pos, crowd: u32) -> f64 {
        let dist_term  = (exit.chebyshev(from) as f64).powf(self.distance_modifier);
        let crowd_term = (crowd as f64).powf(self.crowd_modifier);
        1.0 / (dist_term + crowd_term)
    }
}

impl Default for FloorField {
    fn default() -> Self {
        Self { distance_modifier: 3.0, crowd_modifier: 3.0 }
    }
}
