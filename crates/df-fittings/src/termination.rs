//! End caps.

use df_model::{FittingRequest, FittingType};
use df_topology::{Topology, TopologyContext, TopologyKind};

use crate::common::request_for;
use crate::traits::FittingStrategy;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TerminationStrategy;

impl FittingStrategy for TerminationStrategy {
    fn name(&self) -> &'static str {
        "termination"
    }

    fn handles(&self) -> TopologyKind {
        TopologyKind::Termination
    }

    fn calculate(&self, ctx: &TopologyContext) -> Vec<FittingRequest> {
        match (ctx.topology(), ctx.connections()) {
            (Topology::Termination, [lone]) => vec![request_for(FittingType::Cap, lone, 0)],
            _ => Vec::new(),
        }
    }
}
