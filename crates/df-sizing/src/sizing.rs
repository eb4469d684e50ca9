//! Auto-sizing from airflow and a velocity limit, and velocity checks.

use core::f64::consts::PI;
use df_core::{Tolerances, ft_to_in, nearly_equal, velocity_fpm};
use df_model::{
    AirCoefficients, CrossSection, Shape, SizingConstraints, SuggestedFix, Violation,
    ViolationKind,
};
use serde::{Deserialize, Serialize};

use crate::error::{SizingError, SizingResult};
use crate::friction::{hydraulic_diameter_in, pressure_drop_per_100ft};
use crate::standard::{next_round_size, previous_round_size};

pub const DEFAULT_ASPECT_RATIO: f64 = 1.5;

/// Result of sizing one duct. A plain value with no identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DuctSizingResult {
    pub section: CrossSection,
    /// Flow area the size was derived from, sq ft.
    pub area_sq_ft: f64,
    pub velocity_fpm: f64,
    /// in. w.g. per 100 ft
    pub pressure_drop: f64,
    pub equivalent_diameter_in: f64,
}

impl DuctSizingResult {
    pub fn diameter_in(&self) -> Option<f64> {
        match self.section {
            CrossSection::Round { diameter_in } => Some(diameter_in),
            CrossSection::Rectangular { .. } => None,
        }
    }

    pub fn width_in(&self) -> Option<f64> {
        match self.section {
            CrossSection::Rectangular { width_in, .. } => Some(width_in),
            CrossSection::Round { .. } => None,
        }
    }

    pub fn height_in(&self) -> Option<f64> {
        match self.section {
            CrossSection::Rectangular { height_in, .. } => Some(height_in),
            CrossSection::Round { .. } => None,
        }
    }

    pub fn airflow_cfm(&self) -> f64 {
        self.velocity_fpm * self.area_sq_ft
    }
}

/// Size a duct so that `airflow_cfm` moves at exactly `max_velocity_fpm`.
///
/// Velocity is reported as `airflow / area` for the unrounded area; no
/// standard-size rounding is applied here.
pub fn calculate_duct_size(
    airflow_cfm: f64,
    constraints: &SizingConstraints,
    shape: Shape,
    aspect_ratio: f64,
    coefficients: &AirCoefficients,
) -> SizingResult<DuctSizingResult> {
    check_airflow(airflow_cfm)?;
    check_window(constraints)?;
    check_coefficients(coefficients)?;
    size_at_velocity(
        airflow_cfm,
        constraints.max_velocity_fpm,
        shape,
        aspect_ratio,
        coefficients,
    )
}

/// Size a duct for a chosen design velocity.
pub fn size_at_velocity(
    airflow_cfm: f64,
    design_velocity_fpm: f64,
    shape: Shape,
    aspect_ratio: f64,
    coefficients: &AirCoefficients,
) -> SizingResult<DuctSizingResult> {
    check_airflow(airflow_cfm)?;
    check_positive("design velocity", design_velocity_fpm)?;
    check_positive("aspect ratio", aspect_ratio)?;

    let area_sq_ft = airflow_cfm / design_velocity_fpm;
    let velocity = velocity_fpm(airflow_cfm, area_sq_ft);

    let section = match shape {
        Shape::Round => {
            let diameter_ft = (4.0 * area_sq_ft / PI).sqrt();
            CrossSection::round(ft_to_in(diameter_ft))
        }
        Shape::Rectangular => {
            let height_ft = (area_sq_ft / aspect_ratio).sqrt();
            let width_ft = height_ft * aspect_ratio;
            CrossSection::rect(ft_to_in(width_ft), ft_to_in(height_ft))
        }
    };

    let equivalent_diameter_in = hydraulic_diameter_in(&section);
    let pressure_drop = pressure_drop_per_100ft(velocity, equivalent_diameter_in, coefficients);

    Ok(DuctSizingResult {
        section,
        area_sq_ft,
        velocity_fpm: velocity,
        pressure_drop,
        equivalent_diameter_in,
    })
}

/// Velocity check for a sizing result.
///
/// Flags a velocity strictly above the maximum (error) or strictly below the
/// minimum (warning). Values equal to a limit within float tolerance pass.
pub fn validate_sizing(result: &DuctSizingResult, constraints: &SizingConstraints) -> Vec<Violation> {
    velocity_violations(
        result.velocity_fpm,
        result.airflow_cfm(),
        &result.section,
        constraints,
    )
    .into_iter()
    .collect()
}

/// Shared by sizing validation and the entity validation engine.
///
/// A `diameter` patch is only attached when the patched duct lands inside
/// the whole window; otherwise the fix is text guidance.
pub fn velocity_violations(
    velocity_fpm: f64,
    airflow_cfm: f64,
    section: &CrossSection,
    constraints: &SizingConstraints,
) -> Option<Violation> {
    let tol = Tolerances::default();
    let max = constraints.max_velocity_fpm;
    let min = constraints.min_velocity_fpm;

    if velocity_fpm > max && !nearly_equal(velocity_fpm, max, tol) {
        let violation = Violation::error(
            ViolationKind::Velocity,
            format!("Velocity {velocity_fpm:.1} FPM exceeds maximum {max:.1} FPM"),
        );
        let patch = match section {
            CrossSection::Round { .. } => {
                Some(next_round_size(round_diameter_for(airflow_cfm, max)))
            }
            CrossSection::Rectangular { .. } => None,
        }
        .filter(|&d| round_diameter_fits(airflow_cfm, d, constraints));
        return Some(violation.with_fix(match patch {
            Some(d) => SuggestedFix::patch("diameter", d),
            None => SuggestedFix::text(format!(
                "Enlarge the duct to at least {:.2} sq ft of free area",
                airflow_cfm / max
            )),
        }));
    }

    if velocity_fpm < min && !nearly_equal(velocity_fpm, min, tol) {
        let violation = Violation::warning(
            ViolationKind::Velocity,
            format!("Velocity {velocity_fpm:.1} FPM is below minimum {min:.1} FPM"),
        );
        let patch = match section {
            CrossSection::Round { .. } => {
                previous_round_size(round_diameter_for(airflow_cfm, min))
            }
            CrossSection::Rectangular { .. } => None,
        }
        .filter(|&d| round_diameter_fits(airflow_cfm, d, constraints));
        return Some(violation.with_fix(match patch {
            Some(d) => SuggestedFix::patch("diameter", d),
            None => SuggestedFix::text(format!(
                "Reduce the duct to at most {:.2} sq ft of free area",
                airflow_cfm / min
            )),
        }));
    }

    None
}

/// Whether `velocity_fpm` lies in [min, max], limits matched within float
/// tolerance.
pub fn within_velocity_window(velocity_fpm: f64, constraints: &SizingConstraints) -> bool {
    let tol = Tolerances::default();
    let max = constraints.max_velocity_fpm;
    let min = constraints.min_velocity_fpm;
    (velocity_fpm <= max || nearly_equal(velocity_fpm, max, tol))
        && (velocity_fpm >= min || nearly_equal(velocity_fpm, min, tol))
}

/// Whether a round duct of `diameter_in` carries `airflow_cfm` inside the
/// velocity window.
pub fn round_diameter_fits(
    airflow_cfm: f64,
    diameter_in: f64,
    constraints: &SizingConstraints,
) -> bool {
    let area = CrossSection::round(diameter_in).area_sq_ft();
    within_velocity_window(velocity_fpm(airflow_cfm, area), constraints)
}

/// Round diameter (in) that carries `airflow_cfm` at `velocity_fpm`.
pub fn round_diameter_for(airflow_cfm: f64, velocity_fpm: f64) -> f64 {
    ft_to_in((4.0 * (airflow_cfm / velocity_fpm) / PI).sqrt())
}

pub(crate) fn check_airflow(airflow_cfm: f64) -> SizingResult<()> {
    if !airflow_cfm.is_finite() || airflow_cfm <= 0.0 {
        return Err(SizingError::NonPositiveAirflow { airflow_cfm });
    }
    Ok(())
}

pub(crate) fn check_window(constraints: &SizingConstraints) -> SizingResult<()> {
    check_positive("maximum velocity", constraints.max_velocity_fpm)?;
    check_positive("minimum velocity", constraints.min_velocity_fpm)?;
    if constraints.min_velocity_fpm > constraints.max_velocity_fpm {
        return Err(SizingError::InvertedVelocityWindow {
            min_velocity_fpm: constraints.min_velocity_fpm,
            max_velocity_fpm: constraints.max_velocity_fpm,
        });
    }
    Ok(())
}

pub(crate) fn check_coefficients(coefficients: &AirCoefficients) -> SizingResult<()> {
    check_positive("friction factor", coefficients.friction_factor)?;
    check_positive("air density", coefficients.air_density)?;
    check_positive(
        "velocity pressure constant",
        coefficients.velocity_pressure_constant,
    )
}

fn check_positive(what: &'static str, value: f64) -> SizingResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SizingError::InvalidParameter { what, value });
    }
    Ok(())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn velocity_matches_airflow_over_area(
            airflow in 10.0_f64..50_000.0,
            max_v in 200.0_f64..4000.0,
            ratio in 1.0_f64..4.0,
            round in any::<bool>(),
        ) {
            let shape = if round { Shape::Round } else { Shape::Rectangular };
            let limits = SizingConstraints::new(max_v / 2.0, max_v);
            let r = calculate_duct_size(airflow, &limits, shape, ratio, &AirCoefficients::default()).unwrap();
            let recomputed = airflow / r.area_sq_ft;
            let tol = Tolerances { abs: 0.0, rel: 1e-9 };
            prop_assert!(nearly_equal(recomputed, r.velocity_fpm, tol));
            let area_tol = Tolerances { abs: 1e-12, rel: 1e-9 };
            prop_assert!(nearly_equal(r.section.area_sq_ft(), r.area_sq_ft, area_tol));
        }

        #[test]
        fn flags_iff_outside_window(
            v in 1.0_f64..5000.0,
            min_v in 100.0_f64..1000.0,
            span in 0.0_f64..2000.0,
        ) {
            let limits = SizingConstraints::new(min_v, min_v + span);
            let section = CrossSection::round(14.0);
            let flagged = velocity_violations(v, v * section.area_sq_ft(), &section, &limits).is_some();
            let tol = Tolerances::default();
            let outside = (v > limits.max_velocity_fpm && !nearly_equal(v, limits.max_velocity_fpm, tol))
                || (v < limits.min_velocity_fpm && !nearly_equal(v, limits.min_velocity_fpm, tol));
            prop_assert_eq!(flagged, outside);
        }
    }
}
