//! The resolution pipeline: strategy, feasibility, service rules.

use df_fittings::Strategy;
use df_model::{DesignConstraints, FittingRequest};
use df_topology::{ConnectionPoint, TopologyContext, classify};

use crate::checks::{check_geometry, check_service_rules};
use crate::error::{ResolutionError, ResolutionResult};
use crate::preview::{FailureType, FittingPreview, PreviewFitting};

/// Outcome of a successful commit.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Requests to insert, in sequence order.
    AutoFitted(Vec<FittingRequest>),
    /// Nothing to insert automatically; the user places fittings by hand.
    DeferToManual,
}

impl Resolution {
    pub fn requests(&self) -> &[FittingRequest] {
        match self {
            Resolution::AutoFitted(requests) => requests,
            Resolution::DeferToManual => &[],
        }
    }
}

enum Outcome {
    Manual,
    Fitted(Vec<FittingRequest>),
    Rejected {
        requests: Vec<FittingRequest>,
        failure: FailureType,
        reason: String,
    },
}

/// Stateless front door for preview and commit.
#[derive(Debug, Clone, Copy, Default)]
pub struct FittingResolver;

impl FittingResolver {
    pub fn new() -> Self {
        Self
    }

    /// Ghost preview for an already classified junction.
    pub fn preview(&self, ctx: &TopologyContext) -> FittingPreview {
        match run(ctx) {
            Outcome::Manual => FittingPreview::valid(
                Vec::new(),
                "No automatic fitting; place manually".to_string(),
            ),
            Outcome::Fitted(requests) => {
                let tooltip = requests
                    .iter()
                    .map(|r| r.fitting_type.label())
                    .collect::<Vec<_>>()
                    .join(" + ");
                FittingPreview::valid(preview_fittings(&requests), tooltip)
            }
            Outcome::Rejected {
                requests,
                failure,
                reason,
            } => FittingPreview::invalid(preview_fittings(&requests), failure, reason),
        }
    }

    /// Classify then preview. Unclassifiable input previews as impossible.
    pub fn preview_connections(
        &self,
        connections: Vec<ConnectionPoint>,
        constraints: DesignConstraints,
    ) -> FittingPreview {
        match classify(connections) {
            Ok(ctx) => self.preview(&ctx.with_constraints(constraints)),
            Err(e) => FittingPreview::invalid(
                Vec::new(),
                FailureType::GeometryImpossible,
                e.to_string(),
            ),
        }
    }

    /// Run the same pipeline as `preview` and return the requests to insert.
    /// Either every request passes or none is returned.
    pub fn commit(&self, ctx: &TopologyContext) -> ResolutionResult<Resolution> {
        match run(ctx) {
            Outcome::Manual => Ok(Resolution::DeferToManual),
            Outcome::Fitted(requests) => Ok(Resolution::AutoFitted(requests)),
            Outcome::Rejected {
                failure, reason, ..
            } => Err(match failure {
                FailureType::GeometryImpossible => ResolutionError::GeometryImpossible { reason },
                FailureType::ServiceViolation => ResolutionError::ServiceRuleViolation { reason },
            }),
        }
    }

    pub fn commit_connections(
        &self,
        connections: Vec<ConnectionPoint>,
        constraints: DesignConstraints,
    ) -> ResolutionResult<Resolution> {
        let ctx = classify(connections)?.with_constraints(constraints);
        self.commit(&ctx)
    }
}

fn run(ctx: &TopologyContext) -> Outcome {
    let Some(strategy) = Strategy::select(ctx.kind()) else {
        tracing::debug!(topology = %ctx.kind(), "no strategy, deferring to manual placement");
        return Outcome::Manual;
    };
    let requests = strategy.calculate(ctx);
    if requests.is_empty() {
        tracing::debug!(strategy = strategy.name(), "strategy produced nothing");
        return Outcome::Manual;
    }

    let policy = ctx.constraints().fitting_policy();
    if let Some(reason) = requests
        .iter()
        .find_map(|r| check_geometry(r, &policy).err())
    {
        tracing::debug!(strategy = strategy.name(), %reason, "geometry rejected");
        return Outcome::Rejected {
            requests,
            failure: FailureType::GeometryImpossible,
            reason,
        };
    }
    if let Some(reason) = requests
        .iter()
        .find_map(|r| check_service_rules(r, ctx.constraints()).err())
    {
        tracing::debug!(strategy = strategy.name(), %reason, "service rule rejected");
        return Outcome::Rejected {
            requests,
            failure: FailureType::ServiceViolation,
            reason,
        };
    }

    tracing::debug!(
        strategy = strategy.name(),
        count = requests.len(),
        "fittings resolved"
    );
    Outcome::Fitted(requests)
}

fn preview_fittings(requests: &[FittingRequest]) -> Vec<PreviewFitting> {
    requests
        .iter()
        .map(|r| PreviewFitting {
            fitting_type: r.fitting_type,
            sequence_index: r.sequence_index,
        })
        .collect()
}
