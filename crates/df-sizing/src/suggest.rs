//! Alternative sizes across the allowed velocity window.

use df_model::{AirCoefficients, Shape, SizingConstraints};
use serde::{Deserialize, Serialize};

use crate::error::SizingResult;
use crate::sizing::{
    DEFAULT_ASPECT_RATIO, DuctSizingResult, check_airflow, check_coefficients, check_window,
    size_at_velocity,
};

/// Number of sample velocities across [min, max].
pub const SUGGESTION_POINTS: usize = 5;

/// How an option sits relative to the target friction rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Recommended,
    /// Larger duct, lower friction and noise.
    Quieter,
    /// Smaller duct, higher friction.
    Compact,
}

impl Recommendation {
    pub fn label(self) -> &'static str {
        match self {
            Recommendation::Recommended => "recommended",
            Recommendation::Quieter => "quieter, larger",
            Recommendation::Compact => "compact, higher friction",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizingOption {
    pub velocity_fpm: f64,
    pub result: DuctSizingResult,
    pub recommendation: Recommendation,
}

/// Evenly spaced velocities from `start` to `end` with the endpoint exact.
pub fn linear_points(start: f64, end: f64, count: usize) -> Vec<f64> {
    if count <= 1 {
        return vec![start];
    }
    let delta = (end - start) / (count - 1) as f64;
    let mut points: Vec<f64> = (0..count).map(|i| start + i as f64 * delta).collect();
    points[count - 1] = end;
    points
}

/// Size the duct at evenly spaced velocities inside the window.
///
/// Options come back in strictly ascending velocity order. A degenerate
/// window (`min == max`) yields a single option.
pub fn suggest_duct_sizes(
    airflow_cfm: f64,
    shape: Shape,
    limits: &SizingConstraints,
    coefficients: &AirCoefficients,
) -> SizingResult<Vec<SizingOption>> {
    check_airflow(airflow_cfm)?;
    check_window(limits)?;
    check_coefficients(coefficients)?;

    let mut velocities = linear_points(
        limits.min_velocity_fpm,
        limits.max_velocity_fpm,
        SUGGESTION_POINTS,
    );
    velocities.dedup_by(|b, a| *b <= *a);

    let sized = velocities
        .into_iter()
        .map(|v| size_at_velocity(airflow_cfm, v, shape, DEFAULT_ASPECT_RATIO, coefficients))
        .collect::<SizingResult<Vec<_>>>()?;

    let target = limits.target_friction;
    let best = sized
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            (a.pressure_drop - target)
                .abs()
                .total_cmp(&(b.pressure_drop - target).abs())
        })
        .map(|(i, _)| i);

    Ok(sized
        .into_iter()
        .enumerate()
        .map(|(i, result)| {
            let recommendation = if Some(i) == best {
                Recommendation::Recommended
            } else if result.pressure_drop < target {
                Recommendation::Quieter
            } else {
                Recommendation::Compact
            };
            SizingOption {
                velocity_fpm: result.velocity_fpm,
                result,
                recommendation,
            }
        })
        .collect())
}
