//! Single elbow for a change of direction.

use df_model::FittingRequest;
use df_topology::{Topology, TopologyContext, TopologyKind};

use crate::common::{elbow_for, request_for};
use crate::traits::FittingStrategy;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnStrategy;

impl FittingStrategy for TurnStrategy {
    fn name(&self) -> &'static str {
        "turn"
    }

    fn handles(&self) -> TopologyKind {
        TopologyKind::Turn
    }

    fn calculate(&self, ctx: &TopologyContext) -> Vec<FittingRequest> {
        let Topology::Turn { angle_deg } = *ctx.topology() else {
            return Vec::new();
        };
        let Some(upstream) = ctx.upstream() else {
            return Vec::new();
        };
        let elbow = elbow_for(angle_deg, ctx.constraints());
        vec![request_for(elbow, upstream, 0).with_angle(angle_deg)]
    }
}
