//! The strategy seam.

use df_model::FittingRequest;
use df_topology::{TopologyContext, TopologyKind};

/// Turns a classified junction into an ordered list of fitting requests.
///
/// Strategies are pure: the same context always yields the same requests,
/// and nothing is retained between calls. A strategy handed a topology it
/// does not service returns an empty list.
pub trait FittingStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn handles(&self) -> TopologyKind;

    fn calculate(&self, ctx: &TopologyContext) -> Vec<FittingRequest>;
}
