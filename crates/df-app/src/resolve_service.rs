//! Junction resolution: classify, preview, commit, materialize.

use df_core::EntityId;
use df_model::{Entity, FittingEntity};
use df_resolver::{FittingPreview, FittingResolver, Resolution};
use df_topology::{TopologyContext, TopologyKind, classify};

use crate::error::AppResult;
use crate::snapshot::{DesignSnapshot, JunctionDef};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JunctionStatus {
    /// Fittings were generated and passed every check.
    Fitted,
    /// No automatic fitting applies; placement is left to the user.
    Manual,
    /// The preview was red; nothing was inserted.
    Rejected,
}

impl JunctionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            JunctionStatus::Fitted => "fitted",
            JunctionStatus::Manual => "manual",
            JunctionStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JunctionOutcome {
    pub junction_id: String,
    pub topology: TopologyKind,
    pub fingerprint: String,
    pub preview: FittingPreview,
    pub status: JunctionStatus,
    /// Materialized fittings, empty unless `status` is `Fitted`.
    pub fittings: Vec<FittingEntity>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolveReport {
    pub junctions: Vec<JunctionOutcome>,
}

impl ResolveReport {
    pub fn fittings(&self) -> impl Iterator<Item = &FittingEntity> {
        self.junctions.iter().flat_map(|j| j.fittings.iter())
    }

    pub fn count(&self, status: JunctionStatus) -> usize {
        self.junctions.iter().filter(|j| j.status == status).count()
    }
}

/// Classified context for a junction, carrying the constraints of its
/// service and any primary-run override.
pub fn junction_context(
    design: &DesignSnapshot,
    junction: &JunctionDef,
) -> AppResult<TopologyContext> {
    let constraints = design.profile.constraints_for(junction.service.as_ref());
    let ctx = classify(junction.connections.clone())?.with_constraints(constraints);
    match junction.primary_run {
        Some(index) => Ok(ctx.with_primary_run(index)?),
        None => Ok(ctx),
    }
}

/// Ghost preview for one junction, without committing anything.
pub fn preview_junction(design: &DesignSnapshot, junction_id: &str) -> AppResult<FittingPreview> {
    let junction = design.junction(junction_id)?;
    let ctx = junction_context(design, junction)?;
    Ok(FittingResolver::new().preview(&ctx))
}

/// Resolve one junction. New fittings are numbered from `first_id` upward.
pub fn resolve_junction(
    design: &DesignSnapshot,
    junction: &JunctionDef,
    first_id: EntityId,
) -> AppResult<JunctionOutcome> {
    let ctx = junction_context(design, junction)?;
    let resolver = FittingResolver::new();
    let preview = resolver.preview(&ctx);

    let (status, fittings) = match resolver.commit(&ctx) {
        Ok(Resolution::AutoFitted(requests)) => {
            let pressure_class = ctx
                .connections()
                .iter()
                .filter_map(|c| c.pressure_class)
                .max();
            let fittings = requests
                .iter()
                .zip((first_id.index()..).map(EntityId::from_index))
                .map(|(request, id)| {
                    let mut fitting = FittingEntity::from_request(id, request);
                    fitting.pressure_class = pressure_class;
                    fitting
                })
                .collect();
            (JunctionStatus::Fitted, fittings)
        }
        Ok(Resolution::DeferToManual) => (JunctionStatus::Manual, Vec::new()),
        Err(e) => {
            tracing::warn!(junction = %junction.id, error = %e, "junction rejected");
            (JunctionStatus::Rejected, Vec::new())
        }
    };

    Ok(JunctionOutcome {
        junction_id: junction.id.clone(),
        topology: ctx.kind(),
        fingerprint: ctx.fingerprint(),
        preview,
        status,
        fittings,
    })
}

/// Resolve every junction in the design. Topology errors abort the pass;
/// rejected junctions are reported and skipped.
pub fn resolve_design(design: &DesignSnapshot) -> AppResult<ResolveReport> {
    let mut next = design.next_entity_id();
    let mut junctions = Vec::with_capacity(design.junctions.len());
    for junction in &design.junctions {
        let outcome = resolve_junction(design, junction, next)?;
        if let Some(last) = outcome.fittings.last() {
            next = EntityId::from_index(last.id.get());
        }
        tracing::debug!(
            junction = %outcome.junction_id,
            topology = %outcome.topology,
            status = outcome.status.as_str(),
            fittings = outcome.fittings.len(),
            "junction resolved"
        );
        junctions.push(outcome);
    }
    Ok(ResolveReport { junctions })
}

/// Append the report's fittings to the design's entities.
pub fn apply_resolution(design: &mut DesignSnapshot, report: &ResolveReport) {
    design
        .entities
        .extend(report.fittings().cloned().map(Entity::Fitting));
}
