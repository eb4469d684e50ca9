//! The individual checks, in the order the engine runs them.

use df_model::{
    CrossSection, DesignConstraints, DimensionLimits, Entity, FittingEntity, FittingRequest,
    ServiceDef, SizingConstraints, SuggestedFix, Violation, ViolationKind,
};
use df_resolver::check_geometry;
use df_sizing::{
    next_round_size, previous_round_size, velocity_violations, within_velocity_window,
};

/// Shape and material against the service's allowed lists.
pub(crate) fn service_membership(entity: &Entity, service: Option<&ServiceDef>) -> Vec<Violation> {
    let Some(service) = service else {
        return Vec::new();
    };
    let mut out = Vec::new();

    if let Some(section) = entity.section()
        && !service.allows_shape(section.shape())
    {
        let allowed = service
            .allowed_shapes
            .iter()
            .map(|s| s.token())
            .collect::<Vec<_>>()
            .join(", ");
        out.push(
            Violation::error(
                ViolationKind::Shape,
                format!(
                    "{} duct is not allowed on service '{}'",
                    section.shape(),
                    service.id
                ),
            )
            .with_fix(SuggestedFix::text(format!("Use one of: {allowed}"))),
        );
    }

    if let Some(material) = entity.material()
        && !service.allows_material(material)
    {
        let allowed = service
            .allowed_materials
            .iter()
            .map(|m| m.label())
            .collect::<Vec<_>>()
            .join(", ");
        out.push(
            Violation::error(
                ViolationKind::Material,
                format!(
                    "{} is not allowed on service '{}'",
                    material.label(),
                    service.id
                ),
            )
            .with_fix(SuggestedFix::text(format!("Use one of: {allowed}"))),
        );
    }

    out
}

/// Section validity, size limits and aspect ratio. Returns `false` in the
/// second slot when the section itself is unusable and later numeric checks
/// must be skipped.
///
/// Size patches are only offered when the patched section stays inside the
/// size limits and, for ducts with airflow, inside the velocity window.
pub(crate) fn dimensions(
    entity: &Entity,
    constraints: &DesignConstraints,
) -> (Vec<Violation>, bool) {
    let limits = constraints.dimension_limits();
    let flow = entity
        .airflow_cfm()
        .filter(|a| a.is_finite() && *a > 0.0)
        .zip(constraints.sizing());
    let Some(section) = entity.section() else {
        return (Vec::new(), true);
    };
    if let Err(e) = section.check() {
        let v = Violation::error(
            ViolationKind::Geometry,
            format!("Invalid cross section: {e}"),
        );
        return (vec![v], false);
    }
    let Some(limits) = limits else {
        return (Vec::new(), true);
    };

    let mut out = Vec::new();
    let largest = section.governing_dimension_in();
    let smallest = section.minor_dimension_in();

    if largest > limits.max_size_in {
        let v = Violation::error(
            ViolationKind::Dimension,
            format!(
                "Size {largest:.1} in exceeds maximum {:.1} in",
                limits.max_size_in
            ),
        );
        let fix = match *section {
            CrossSection::Round { .. } => previous_round_size(limits.max_size_in)
                .map(|d| ("diameter", d, CrossSection::round(d))),
            CrossSection::Rectangular {
                width_in,
                height_in,
            } => single_side_patch(width_in, height_in, |s| s > limits.max_size_in).map(
                |side| patched_side(side, width_in, height_in, limits.max_size_in),
            ),
        }
        .filter(|(_, _, patched)| patch_resolves(patched, limits, flow))
        .map(|(property, value, _)| SuggestedFix::patch(property, value));
        out.push(v.with_fix(fix.unwrap_or_else(|| {
            SuggestedFix::text(format!(
                "Keep every side at or below {:.1} in",
                limits.max_size_in
            ))
        })));
    }

    if smallest < limits.min_size_in {
        let v = Violation::error(
            ViolationKind::Dimension,
            format!(
                "Size {smallest:.1} in is below minimum {:.1} in",
                limits.min_size_in
            ),
        );
        let fix = match *section {
            CrossSection::Round { .. } => {
                let d = next_round_size(limits.min_size_in);
                Some(("diameter", d, CrossSection::round(d)))
            }
            CrossSection::Rectangular {
                width_in,
                height_in,
            } => single_side_patch(width_in, height_in, |s| s < limits.min_size_in).map(
                |side| patched_side(side, width_in, height_in, limits.min_size_in),
            ),
        }
        .filter(|(_, _, patched)| patch_resolves(patched, limits, flow))
        .map(|(property, value, _)| SuggestedFix::patch(property, value));
        out.push(v.with_fix(fix.unwrap_or_else(|| {
            SuggestedFix::text(format!(
                "Keep every side at or above {:.1} in",
                limits.min_size_in
            ))
        })));
    }

    if section.shape() == df_model::Shape::Rectangular {
        let ratio = section.aspect_ratio();
        if ratio > limits.max_aspect_ratio {
            out.push(
                Violation::error(
                    ViolationKind::AspectRatio,
                    format!(
                        "Aspect ratio {ratio:.2}:1 exceeds maximum {:.2}:1",
                        limits.max_aspect_ratio
                    ),
                )
                .with_fix(SuggestedFix::text(format!(
                    "Rebalance width and height to at most {:.2}:1",
                    limits.max_aspect_ratio
                ))),
            );
        }
    }

    (out, true)
}

/// The one side that is out of bounds, when exactly one is.
fn single_side_patch(
    width_in: f64,
    height_in: f64,
    out_of_bounds: impl Fn(f64) -> bool,
) -> Option<&'static str> {
    match (out_of_bounds(width_in), out_of_bounds(height_in)) {
        (true, false) => Some("width"),
        (false, true) => Some("height"),
        _ => None,
    }
}

fn patched_side(
    side: &'static str,
    width_in: f64,
    height_in: f64,
    value: f64,
) -> (&'static str, f64, CrossSection) {
    let patched = if side == "width" {
        CrossSection::rect(value, height_in)
    } else {
        CrossSection::rect(width_in, value)
    };
    (side, value, patched)
}

fn patch_resolves(
    patched: &CrossSection,
    limits: &DimensionLimits,
    flow: Option<(f64, &SizingConstraints)>,
) -> bool {
    let sized = patched.governing_dimension_in() <= limits.max_size_in
        && patched.minor_dimension_in() >= limits.min_size_in;
    let flowing = flow.is_none_or(|(airflow, sizing)| {
        within_velocity_window(df_core::velocity_fpm(airflow, patched.area_sq_ft()), sizing)
    });
    sized && flowing
}

/// Velocity against the sizing window. Ducts without airflow get an info
/// note instead.
pub(crate) fn velocity(entity: &Entity, constraints: &DesignConstraints) -> Vec<Violation> {
    let Some(sizing) = constraints.sizing() else {
        return Vec::new();
    };
    let Some(section) = entity.section() else {
        return Vec::new();
    };
    match entity.airflow_cfm() {
        Some(airflow) if airflow.is_finite() && airflow > 0.0 => {
            let v = df_core::velocity_fpm(airflow, section.area_sq_ft());
            velocity_violations(v, airflow, section, sizing)
                .into_iter()
                .collect()
        }
        Some(airflow) => vec![Violation::warning(
            ViolationKind::MissingData,
            format!("Airflow {airflow} CFM is not a positive value; velocity not checked"),
        )],
        None if matches!(entity, Entity::Duct(_)) => vec![Violation::info(
            ViolationKind::MissingData,
            "No airflow assigned; velocity not checked",
        )],
        None => Vec::new(),
    }
}

/// Pressure class against the service requirement.
pub(crate) fn pressure_class(entity: &Entity, service: Option<&ServiceDef>) -> Vec<Violation> {
    let Some(required) = service.and_then(|s| s.pressure_class) else {
        return Vec::new();
    };
    if matches!(entity, Entity::Equipment(_)) {
        return Vec::new();
    }
    let fix = SuggestedFix::patch("pressure_class", required.rating_in_wg());
    match entity.pressure_class() {
        Some(actual) if actual.satisfies(required) => Vec::new(),
        Some(actual) => vec![
            Violation::error(
                ViolationKind::PressureClass,
                format!(
                    "Pressure class {} in. w.g. is below the required {} in. w.g.",
                    actual.rating_in_wg(),
                    required.rating_in_wg()
                ),
            )
            .with_fix(fix),
        ],
        None => vec![
            Violation::warning(
                ViolationKind::PressureClass,
                format!(
                    "No pressure class assigned; service requires {} in. w.g.",
                    required.rating_in_wg()
                ),
            )
            .with_fix(fix),
        ],
    }
}

/// Fitting-type legality. Auto-inserted fittings are also re-run through the
/// resolver's geometric feasibility check.
pub(crate) fn fitting_legality(entity: &Entity, constraints: &DesignConstraints) -> Vec<Violation> {
    let Entity::Fitting(fitting) = entity else {
        return Vec::new();
    };
    let mut out = Vec::new();

    if let Some(service) = &constraints.service
        && let Err(reason) = service.check_fitting(fitting.fitting_type)
    {
        out.push(
            Violation::error(
                ViolationKind::FittingRule,
                format!(
                    "{} not allowed on service '{}': {reason}",
                    fitting.fitting_type.label(),
                    service.id
                ),
            )
            .with_fix(SuggestedFix::text("Replace with a fitting the service allows")),
        );
    }

    if fitting.auto_inserted()
        && let Err(reason) = check_geometry(&as_request(fitting), &constraints.fitting_policy())
    {
        out.push(Violation::error(ViolationKind::Geometry, reason));
    }

    out
}

fn as_request(fitting: &FittingEntity) -> FittingRequest {
    let mut request =
        FittingRequest::new(fitting.fitting_type, fitting.material, fitting.section, 0)
            .with_service(fitting.service_id.clone());
    request.outlet = fitting.outlet;
    request.length_in = fitting.length_in;
    request.angle_deg = fitting.angle_deg;
    request
}
