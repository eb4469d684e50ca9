//! Helpers shared by the strategies.

use df_core::{Tolerances, nearly_equal};
use df_model::{
    Alignment, CrossSection, DesignConstraints, FittingPolicy, FittingRequest, FittingType, Shape,
};
use df_topology::ConnectionPoint;

/// Request sized to `cp`, inheriting its material and service.
pub fn request_for(
    fitting_type: FittingType,
    cp: &ConnectionPoint,
    sequence_index: usize,
) -> FittingRequest {
    FittingRequest::new(fitting_type, cp.material, cp.section, sequence_index)
        .with_service(cp.service_id.clone())
}

/// Axial length and alignment for a transition from `from` to `to`.
///
/// Concentric transitions run `concentric_slope` inches per inch of offset.
/// When a rectangular side changes height the transition is laid flat on one
/// wall and the whole drop lands on the other, so the steeper eccentric slope
/// applies. Round-to-round reducers stay concentric. Never shorter than the
/// policy minimum.
pub fn transition_geometry(
    from: &CrossSection,
    to: &CrossSection,
    policy: &FittingPolicy,
) -> (f64, Alignment) {
    let offset = from.max_offset_in(to);
    let both_round = from.shape() == Shape::Round && to.shape() == Shape::Round;
    let drops = !both_round && from.vertical_offset_in(to) > 0.0;
    let (slope, alignment) = if drops {
        (policy.eccentric_slope, policy.eccentric_alignment)
    } else {
        (policy.concentric_slope, Alignment::Concentric)
    };
    let length = (slope * offset).max(policy.min_transition_length_in);
    (length, alignment)
}

pub fn transition_type(from: &CrossSection, to: &CrossSection) -> FittingType {
    if from.shape() == to.shape() {
        FittingType::Reducer
    } else {
        FittingType::Transition
    }
}

/// Elbow for a deflection of `angle_deg`.
///
/// Turns close to 90 or 45 degrees get a standard elbow; anything else is
/// mitered to the exact angle. When the service forbids the preferred 90
/// degree radius but allows the other one, the other one is used.
pub fn elbow_for(angle_deg: f64, constraints: &DesignConstraints) -> FittingType {
    let policy = constraints.fitting_policy();
    let tol = Tolerances {
        abs: policy.elbow_match_tolerance_deg,
        rel: 0.0,
    };
    if nearly_equal(angle_deg, 90.0, tol) {
        let (preferred, other) = if policy.prefer_long_radius {
            (FittingType::Elbow90LongRadius, FittingType::Elbow90ShortRadius)
        } else {
            (FittingType::Elbow90ShortRadius, FittingType::Elbow90LongRadius)
        };
        if !service_permits(constraints, preferred) && service_permits(constraints, other) {
            return other;
        }
        return preferred;
    }
    if nearly_equal(angle_deg, 45.0, tol) {
        return FittingType::Elbow45;
    }
    FittingType::MiteredElbow
}

/// Nominal angle an elbow of `fitting_type` realizes.
pub fn elbow_angle(fitting_type: FittingType, angle_deg: f64) -> f64 {
    match fitting_type {
        FittingType::Elbow90ShortRadius | FittingType::Elbow90LongRadius => 90.0,
        FittingType::Elbow45 => 45.0,
        _ => angle_deg,
    }
}

pub fn service_permits(constraints: &DesignConstraints, fitting_type: FittingType) -> bool {
    constraints
        .service
        .as_ref()
        .is_none_or(|s| s.check_fitting(fitting_type).is_ok())
}
