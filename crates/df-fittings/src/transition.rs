//! Reducers and shape transitions, with a trailing elbow when the run also
//! turns.

use df_model::FittingRequest;
use df_topology::{Topology, TopologyContext, TopologyKind};

use crate::common::{elbow_for, request_for, transition_geometry, transition_type};
use crate::traits::FittingStrategy;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransitionStrategy;

impl FittingStrategy for TransitionStrategy {
    fn name(&self) -> &'static str {
        "transition"
    }

    fn handles(&self) -> TopologyKind {
        TopologyKind::Transition
    }

    fn calculate(&self, ctx: &TopologyContext) -> Vec<FittingRequest> {
        let Topology::Transition {
            signature,
            angle_deg,
        } = *ctx.topology()
        else {
            return Vec::new();
        };
        let [from, to] = ctx.connections() else {
            return Vec::new();
        };
        if signature.from != from.shape() || signature.to != to.shape() {
            return Vec::new();
        }

        let policy = ctx.constraints().fitting_policy();
        let (length_in, alignment) = transition_geometry(&from.section, &to.section, &policy);
        let mut requests = vec![
            request_for(transition_type(&from.section, &to.section), from, 0)
                .with_outlet(to.section)
                .with_length(length_in)
                .with_alignment(alignment),
        ];

        if let Some(angle_deg) = angle_deg {
            // The turn happens downstream of the transition, at the new size.
            let elbow = elbow_for(angle_deg, ctx.constraints());
            let mut turn = request_for(elbow, from, 1).with_angle(angle_deg);
            turn.section = to.section;
            requests.push(turn);
        }
        requests
    }
}
