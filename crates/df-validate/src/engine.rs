//! Validation entry points.
//!
//! Checks run in a fixed order: service membership (shape, material),
//! dimensional limits, velocity, pressure class, fitting legality. Every
//! call recomputes from scratch; nothing is carried over from earlier
//! passes.

use std::collections::BTreeMap;

use df_core::EntityId;
use df_model::{ConstraintProfile, DesignConstraints, Entity, Violation, ViolationKind};
use rayon::prelude::*;

use crate::checks;
use crate::status::ConstraintStatus;

/// Validate one entity against explicit constraints.
pub fn validate_with(entity: &Entity, constraints: &DesignConstraints) -> ConstraintStatus {
    let service = constraints.service.as_ref();
    let mut violations = checks::service_membership(entity, service);

    let (dimension, section_ok) = checks::dimensions(entity, constraints);
    violations.extend(dimension);
    if section_ok {
        violations.extend(checks::velocity(entity, constraints));
    }
    violations.extend(checks::pressure_class(entity, service));
    violations.extend(checks::fitting_legality(entity, constraints));

    ConstraintStatus::new(entity.id(), violations)
}

/// Validate one entity, resolving its service from the profile.
///
/// An entity naming a service the profile does not define is checked
/// against the industrial profile alone, with a warning.
pub fn validate(entity: &Entity, profile: &ConstraintProfile) -> ConstraintStatus {
    let service_id = entity.service_id();
    let constraints = profile.constraints_for(service_id);
    let mut status = validate_with(entity, &constraints);

    if let Some(id) = service_id
        && constraints.service.is_none()
    {
        status.violations.insert(
            0,
            Violation::warning(
                ViolationKind::UnknownService,
                format!("Service '{id}' is not defined in profile '{}'", profile.name),
            ),
        );
    }
    status
}

pub fn validate_all<'a>(
    entities: impl IntoIterator<Item = &'a Entity>,
    profile: &ConstraintProfile,
) -> BTreeMap<EntityId, ConstraintStatus> {
    let statuses: BTreeMap<_, _> = entities
        .into_iter()
        .map(|e| (e.id(), validate(e, profile)))
        .collect();
    log_summary(&statuses);
    statuses
}

/// Same result as [`validate_all`], spread across the rayon pool.
pub fn validate_all_par(
    entities: &[Entity],
    profile: &ConstraintProfile,
) -> BTreeMap<EntityId, ConstraintStatus> {
    let statuses: BTreeMap<_, _> = entities
        .par_iter()
        .map(|e| (e.id(), validate(e, profile)))
        .collect::<Vec<_>>()
        .into_iter()
        .collect();
    log_summary(&statuses);
    statuses
}

fn log_summary(statuses: &BTreeMap<EntityId, ConstraintStatus>) {
    let blocked = statuses.values().filter(|s| s.blocks_export()).count();
    let violations: usize = statuses.values().map(|s| s.violations.len()).sum();
    tracing::debug!(
        entities = statuses.len(),
        violations,
        blocked,
        "validation pass complete"
    );
    if blocked > 0 {
        tracing::warn!("{blocked} entities have blocking violations");
    }
}
