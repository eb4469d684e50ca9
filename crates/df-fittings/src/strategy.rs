//! Strategy selection.

use df_model::FittingRequest;
use df_topology::{TopologyContext, TopologyKind};

use crate::junction::JunctionStrategy;
use crate::termination::TerminationStrategy;
use crate::traits::FittingStrategy;
use crate::transition::TransitionStrategy;
use crate::turn::TurnStrategy;

/// The closed set of strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Turn(TurnStrategy),
    Transition(TransitionStrategy),
    Junction(JunctionStrategy),
    Termination(TerminationStrategy),
}

impl Strategy {
    /// Strategy for a topology kind. A straight run needs no fitting and has
    /// none; callers treat that as "place manually".
    pub fn select(kind: TopologyKind) -> Option<Strategy> {
        match kind {
            TopologyKind::Termination => Some(Strategy::Termination(TerminationStrategy)),
            TopologyKind::Straight => None,
            TopologyKind::Turn => Some(Strategy::Turn(TurnStrategy)),
            TopologyKind::Transition => Some(Strategy::Transition(TransitionStrategy)),
            TopologyKind::Junction => Some(Strategy::Junction(JunctionStrategy)),
        }
    }

    fn inner(&self) -> &dyn FittingStrategy {
        match self {
            Strategy::Turn(s) => s,
            Strategy::Transition(s) => s,
            Strategy::Junction(s) => s,
            Strategy::Termination(s) => s,
        }
    }

    pub fn name(&self) -> &'static str {
        self.inner().name()
    }

    pub fn handles(&self) -> TopologyKind {
        self.inner().handles()
    }

    pub fn calculate(&self, ctx: &TopologyContext) -> Vec<FittingRequest> {
        self.inner().calculate(ctx)
    }
}

/// Select and run in one step; `None` when no strategy applies.
pub fn calculate(ctx: &TopologyContext) -> Option<(Strategy, Vec<FittingRequest>)> {
    let strategy = Strategy::select(ctx.kind())?;
    let requests = strategy.calculate(ctx);
    Some((strategy, requests))
}
