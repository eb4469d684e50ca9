//! Tees and wyes off a primary run.

use df_model::{FittingRequest, FittingType};
use df_topology::{Topology, TopologyContext, TopologyKind, angle_between_deg, deflection_deg};

use crate::common::{elbow_for, request_for, transition_geometry, transition_type};
use crate::traits::FittingStrategy;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JunctionStrategy;

impl FittingStrategy for JunctionStrategy {
    fn name(&self) -> &'static str {
        "junction"
    }

    fn handles(&self) -> TopologyKind {
        TopologyKind::Junction
    }

    /// One tee or wye per branch, in branch order. A synthetic two-way
    /// junction is a transition into the branch section followed by an elbow.
    fn calculate(&self, ctx: &TopologyContext) -> Vec<FittingRequest> {
        let Topology::Junction {
            primary_run,
            ref branches,
            synthetic,
        } = *ctx.topology()
        else {
            return Vec::new();
        };
        let Some(primary) = ctx.connections().get(primary_run) else {
            return Vec::new();
        };
        let policy = ctx.constraints().fitting_policy();

        if synthetic {
            let Some(branch) = branches.first().and_then(|&b| ctx.connections().get(b)) else {
                return Vec::new();
            };
            let (length_in, alignment) =
                transition_geometry(&primary.section, &branch.section, &policy);
            let angle_deg = deflection_deg(&primary.direction, &branch.direction);
            let mut turn = request_for(elbow_for(angle_deg, ctx.constraints()), primary, 1)
                .with_angle(angle_deg);
            turn.section = branch.section;
            return vec![
                request_for(transition_type(&primary.section, &branch.section), primary, 0)
                    .with_outlet(branch.section)
                    .with_length(length_in)
                    .with_alignment(alignment),
                turn,
            ];
        }

        branches
            .iter()
            .filter_map(|&b| ctx.connections().get(b))
            .enumerate()
            .map(|(seq, branch)| {
                let angle_deg = angle_between_deg(&primary.direction, &branch.direction);
                let fitting_type = if angle_deg > policy.wye_threshold_deg {
                    FittingType::Wye
                } else {
                    FittingType::Tee
                };
                request_for(fitting_type, primary, seq)
                    .with_outlet(branch.section)
                    .with_angle(angle_deg)
            })
            .collect()
    }
}
