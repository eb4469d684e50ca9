//! Feasibility and service-rule checks on fitting requests.
//!
//! Shared by the resolver (before anything is inserted) and the validation
//! engine (re-checking auto-inserted fittings after the fact).

use df_model::{DesignConstraints, FittingPolicy, FittingRequest};

/// Geometric feasibility of one request.
///
/// Lengths must be positive and finite, sections valid, and elbow angles
/// within what a single elbow can realize. Nothing is clamped.
pub fn check_geometry(request: &FittingRequest, policy: &FittingPolicy) -> Result<(), String> {
    let label = request.fitting_type.label();

    request
        .section
        .check()
        .map_err(|e| format!("{label} section is invalid: {e}"))?;
    if let Some(outlet) = &request.outlet {
        outlet
            .check()
            .map_err(|e| format!("{label} outlet is invalid: {e}"))?;
    }

    if let Some(length) = request.length_in
        && !(length.is_finite() && length > 0.0)
    {
        return Err(format!("{label} length {length} in is not positive"));
    }

    if request.fitting_type.is_transition() {
        if request.outlet.is_none() {
            return Err(format!("{label} has no outlet section"));
        }
        if request.length_in.is_none() {
            return Err(format!("{label} has no length"));
        }
    }

    if request.fitting_type.is_elbow() {
        let Some(angle) = request.angle_deg else {
            return Err(format!("{label} has no angle"));
        };
        if !angle.is_finite() || angle <= 0.0 {
            return Err(format!("{label} angle {angle}° is not representable"));
        }
        if angle > policy.max_elbow_angle_deg {
            return Err(format!(
                "{angle:.1}° turn exceeds the {:.1}° a single elbow can make",
                policy.max_elbow_angle_deg
            ));
        }
    }

    // A zero branch angle would lay the branch on top of the primary run.
    if request.fitting_type.is_branch()
        && let Some(angle) = request.angle_deg
        && !(angle.is_finite() && angle > 0.0 && angle <= 180.0)
    {
        return Err(format!("{label} branch angle {angle}° is not representable"));
    }

    Ok(())
}

/// Service rules for one request: fitting type and material.
pub fn check_service_rules(
    request: &FittingRequest,
    constraints: &DesignConstraints,
) -> Result<(), String> {
    let Some(service) = &constraints.service else {
        return Ok(());
    };
    service.check_fitting(request.fitting_type).map_err(|reason| {
        format!(
            "{} not allowed on service '{}': {reason}",
            request.fitting_type.label(),
            service.id
        )
    })?;
    if !service.allows_material(request.material) {
        return Err(format!(
            "{} is not an allowed material on service '{}'",
            request.material.label(),
            service.id
        ));
    }
    Ok(())
}
