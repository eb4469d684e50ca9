//! df-fittings: fitting strategies for ductflow.
//!
//! One strategy per junction kind:
//! - Turn: a single elbow
//! - Transition: reducer or shape transition, plus an elbow when the run turns
//! - Junction: a tee or wye per branch
//! - Termination: an end cap
//!
//! All strategies implement [`FittingStrategy`] and are dispatched through
//! the closed [`Strategy`] enum.

pub mod common;
pub mod junction;
pub mod strategy;
pub mod termination;
pub mod traits;
pub mod transition;
pub mod turn;

pub use junction::JunctionStrategy;
pub use strategy::{Strategy, calculate};
pub use termination::TerminationStrategy;
pub use traits::FittingStrategy;
pub use transition::TransitionStrategy;
pub use turn::TurnStrategy;
