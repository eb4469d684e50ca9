use crate::DfError;

/// Floating point type used throughout the engine.
pub type Real = f64;

/// Absolute/relative tolerance pair for float comparisons.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, DfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(DfError::NonFinite { what, value: v })
    }
}

/// Finite and strictly greater than zero.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, DfError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(DfError::NonPositive { what, value: v })
    }
}

/// Clamp an angle into [0, 180] degrees, absorbing acos rounding at the ends.
pub fn clamp_half_turn_deg(angle_deg: Real) -> Real {
    angle_deg.clamp(0.0, 180.0)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn nearly_equal_is_symmetric(a in -1e6..1e6_f64, b in -1e6..1e6_f64) {
            let tol = Tolerances::default();
            prop_assert_eq!(nearly_equal(a, b, tol), nearly_equal(b, a, tol));
        }

        #[test]
        fn clamp_stays_in_half_turn(angle in -720.0..720.0_f64) {
            let c = clamp_half_turn_deg(angle);
            prop_assert!((0.0..=180.0).contains(&c));
        }
    }
}
